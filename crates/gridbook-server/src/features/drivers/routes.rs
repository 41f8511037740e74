//! Driver API routes
//!
//! - `GET /api/v1/f1/drivers?search=&page=&per_page=` - Searchable, paginated driver list
//! - `GET /api/v1/f1/drivers/:id` - Driver profile with career history

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::queries::{GetDriverError, GetDriverQuery, ListDriversError, ListDriversQuery};
use crate::api::response::ApiResponse;
use crate::error::{ApiResult, AppError};
use crate::features::FeatureState;

pub fn drivers_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_drivers))
        .route("/:id", get(get_driver))
}

/// List drivers
///
/// # Query Parameters
///
/// - `search` - Whitespace-separated terms; each must match first name,
///   last name, nationality or car number
/// - `page` - Page number (default: 1, clamped into range)
/// - `per_page` - Items per page (default: 20, max: 100)
#[tracing::instrument(skip(state, query), fields(search = ?query.search))]
async fn list_drivers(
    State(state): State<FeatureState>,
    Query(query): Query<ListDriversQuery>,
) -> ApiResult<Response> {
    let response = super::queries::list::handle(state.db, query).await?;

    tracing::debug!(
        count = response.items.len(),
        total = response.totals.drivers,
        "Drivers listed via API"
    );

    let meta = json!({
        "pagination": response.pagination,
        "totals": response.totals,
    });

    Ok(ApiResponse::success_with_meta(response.items, meta).into_response())
}

/// Get a driver's profile and career
///
/// # Response
///
/// - `200 OK` - `{ driver, current_team, career, seasons, results }`
/// - `404 Not Found` - No driver with this id
#[tracing::instrument(skip(state), fields(driver_id = id))]
async fn get_driver(State(state): State<FeatureState>, Path(id): Path<i64>) -> ApiResult<Response> {
    let query = GetDriverQuery {
        driver_id: id,
        current_year: state.season.current_year(),
    };

    let response = super::queries::get::handle(state.db, query).await?;
    Ok(ApiResponse::success(response).into_response())
}

impl From<ListDriversError> for AppError {
    fn from(err: ListDriversError) -> Self {
        match err {
            ListDriversError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetDriverError> for AppError {
    fn from(err: GetDriverError) -> Self {
        match err {
            GetDriverError::NotFound(id) => AppError::not_found("Driver", id),
            GetDriverError::Database(e) => AppError::Database(e),
        }
    }
}
