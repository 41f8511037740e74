//! Car catalog routes
//!
//! - `POST /api/v1/cars` - Submit a car
//! - `GET /api/v1/cars/accepted` - Accepted cars, newest first
//! - `PUT /api/v1/cars/:id/status` - Moderate a submission
//! - `GET /api/v1/cars/reference` - Cached attribute taxonomies

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};

use gridbook_common::GridbookError;

use super::commands::{SetCarStatusCommand, SetCarStatusError, SubmitCarCommand, SubmitCarError, SubmitOutcome};
use super::queries::{GetCarReferenceError, GetCarReferenceQuery, ListAcceptedCarsError, ListAcceptedCarsQuery};
use crate::api::response::ApiResponse;
use crate::error::{ApiResult, AppError};
use crate::features::FeatureState;

pub fn cars_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", post(submit_car))
        .route("/accepted", get(list_accepted))
        .route("/:id/status", put(set_status))
        .route("/reference", get(get_reference))
}

/// Submit a car
///
/// # Response
///
/// - `201 Created` - Stored as a draft, outcome `registered`
/// - `200 OK` - Identical car exists, outcome `already_registered`
/// - `422 Unprocessable Entity` - `{ field, message }` for the first invalid field
#[tracing::instrument(skip(state, command), fields(manufacturer = %command.manufacturer, car_model = %command.car_model))]
async fn submit_car(
    State(state): State<FeatureState>,
    Json(command): Json<SubmitCarCommand>,
) -> ApiResult<Response> {
    let response = super::commands::submit::handle(state.db, command).await?;

    let status = match response.outcome {
        SubmitOutcome::Registered => StatusCode::CREATED,
        SubmitOutcome::AlreadyRegistered => StatusCode::OK,
    };

    Ok(ApiResponse::success(response).with_status(status).into_response())
}

#[tracing::instrument(skip(state))]
async fn list_accepted(State(state): State<FeatureState>) -> ApiResult<Response> {
    let cars = super::queries::list_accepted::handle(state.db, ListAcceptedCarsQuery::default()).await?;

    tracing::debug!(count = cars.len(), "Accepted cars listed via API");

    Ok(ApiResponse::success(cars).into_response())
}

/// Set a submission's moderation status
///
/// Body: `{ "status": "Draft" | "Accepted" | "Declined" }`
#[tracing::instrument(skip(state, command), fields(id = id))]
async fn set_status(
    State(state): State<FeatureState>,
    Path(id): Path<i64>,
    Json(mut command): Json<SetCarStatusCommand>,
) -> ApiResult<Response> {
    command.id = id;
    let record = super::commands::set_status::handle(state.db, command).await?;
    Ok(ApiResponse::success(record).into_response())
}

#[tracing::instrument(skip(state))]
async fn get_reference(State(state): State<FeatureState>) -> ApiResult<Response> {
    let response =
        super::queries::reference::handle(state.reference, GetCarReferenceQuery::default()).await?;
    Ok(ApiResponse::success(response).into_response())
}

impl From<SubmitCarError> for AppError {
    fn from(err: SubmitCarError) -> Self {
        match err {
            SubmitCarError::Field(e) => AppError::validation(e.field(), e.to_string()),
            SubmitCarError::Choice(GridbookError::InvalidChoice { field, value, allowed }) => {
                AppError::validation(field, format!("'{}' is not one of {}", value, allowed.trim()))
            },
            SubmitCarError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<SetCarStatusError> for AppError {
    fn from(err: SetCarStatusError) -> Self {
        match err {
            SetCarStatusError::NotFound(id) => AppError::not_found("Car", id),
            SetCarStatusError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<ListAcceptedCarsError> for AppError {
    fn from(err: ListAcceptedCarsError) -> Self {
        match err {
            ListAcceptedCarsError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetCarReferenceError> for AppError {
    fn from(err: GetCarReferenceError) -> Self {
        match err {
            GetCarReferenceError::Database(e) => AppError::Database(e),
        }
    }
}
