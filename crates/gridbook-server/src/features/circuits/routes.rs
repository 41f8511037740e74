//! Circuit API routes
//!
//! - `GET /api/v1/f1/circuits` - Every circuit, ordered by country, with totals
//! - `GET /api/v1/f1/circuits/:id` - One circuit and the races held there

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use sqlx::PgPool;

use super::queries::{GetCircuitError, GetCircuitQuery, ListCircuitsError, ListCircuitsQuery};
use crate::api::response::ApiResponse;
use crate::error::{ApiResult, AppError};

pub fn circuits_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_circuits))
        .route("/:id", get(get_circuit))
}

/// List circuits
///
/// # Response
///
/// - `200 OK` - `{ total_circuits, total_countries, circuits }`
#[tracing::instrument(skip(pool))]
async fn list_circuits(State(pool): State<PgPool>) -> ApiResult<Response> {
    let response = super::queries::list::handle(pool, ListCircuitsQuery::default()).await?;

    tracing::debug!(count = response.circuits.len(), "Circuits listed via API");

    Ok(ApiResponse::success(response).into_response())
}

/// Get one circuit with its races
///
/// # Response
///
/// - `200 OK` - Circuit found
/// - `404 Not Found` - No circuit with this id
#[tracing::instrument(skip(pool), fields(circuit_id = id))]
async fn get_circuit(State(pool): State<PgPool>, Path(id): Path<i64>) -> ApiResult<Response> {
    let response = super::queries::get::handle(pool, GetCircuitQuery { circuit_id: id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

impl From<ListCircuitsError> for AppError {
    fn from(err: ListCircuitsError) -> Self {
        match err {
            ListCircuitsError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetCircuitError> for AppError {
    fn from(err: GetCircuitError) -> Self {
        match err {
            GetCircuitError::NotFound(id) => AppError::not_found("Circuit", id),
            GetCircuitError::Database(e) => AppError::Database(e),
        }
    }
}
