//! Race API routes
//!
//! - `GET /api/v1/f1/races` - All races grouped by season, newest first
//! - `GET /api/v1/f1/races/:id` - Race, circuit and results
//! - `GET /api/v1/f1/races/:id/standings` - Drivers' standings after the race

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use sqlx::PgPool;

use super::queries::{
    GetRaceError, GetRaceQuery, GetRaceStandingsError, GetRaceStandingsQuery, ListRacesError,
    ListRacesQuery,
};
use crate::api::response::ApiResponse;
use crate::error::{ApiResult, AppError};

pub fn races_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_races))
        .route("/:id", get(get_race))
        .route("/:id/standings", get(get_race_standings))
}

#[tracing::instrument(skip(pool))]
async fn list_races(State(pool): State<PgPool>) -> ApiResult<Response> {
    let response = super::queries::list::handle(pool, ListRacesQuery::default()).await?;

    tracing::debug!(
        total = response.total_races,
        seasons = response.seasons.len(),
        "Races listed via API"
    );

    Ok(ApiResponse::success(response).into_response())
}

/// Get one race
///
/// # Response
///
/// - `200 OK` - `{ race, circuit, results }`, results in entry order
/// - `404 Not Found` - No race with this id
#[tracing::instrument(skip(pool), fields(race_id = id))]
async fn get_race(State(pool): State<PgPool>, Path(id): Path<i64>) -> ApiResult<Response> {
    let response = super::queries::get::handle(pool, GetRaceQuery { race_id: id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool), fields(race_id = id))]
async fn get_race_standings(State(pool): State<PgPool>, Path(id): Path<i64>) -> ApiResult<Response> {
    let response =
        super::queries::standings::handle(pool, GetRaceStandingsQuery { race_id: id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

impl From<ListRacesError> for AppError {
    fn from(err: ListRacesError) -> Self {
        match err {
            ListRacesError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetRaceError> for AppError {
    fn from(err: GetRaceError) -> Self {
        match err {
            GetRaceError::NotFound(id) => AppError::not_found("Race", id),
            GetRaceError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetRaceStandingsError> for AppError {
    fn from(err: GetRaceStandingsError) -> Self {
        match err {
            GetRaceStandingsError::NotFound(id) => AppError::not_found("Race", id),
            GetRaceStandingsError::Database(e) => AppError::Database(e),
        }
    }
}
