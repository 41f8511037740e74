//! Team API routes
//!
//! - `GET /api/v1/f1/teams?search=&page=&per_page=` - Searchable, paginated team list
//! - `GET /api/v1/f1/teams/:id` - Team profile with seasons and drivers

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::queries::{GetTeamError, GetTeamQuery, ListTeamsError, ListTeamsQuery};
use crate::api::response::ApiResponse;
use crate::error::{ApiResult, AppError};
use crate::features::FeatureState;

pub fn teams_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_teams))
        .route("/:id", get(get_team))
}

/// List teams
///
/// # Query Parameters
///
/// - `search` - Whitespace-separated terms matched against the team name
/// - `page` - Page number (default: 1, clamped into range)
/// - `per_page` - Items per page (default: 20, max: 100)
#[tracing::instrument(skip(state, query), fields(search = ?query.search))]
async fn list_teams(
    State(state): State<FeatureState>,
    Query(mut query): Query<ListTeamsQuery>,
) -> ApiResult<Response> {
    query.current_year = state.season.current_year();
    let response = super::queries::list::handle(state.db, query).await?;

    let meta = json!({
        "pagination": response.pagination,
        "totals": response.totals,
    });

    Ok(ApiResponse::success_with_meta(response.items, meta).into_response())
}

#[tracing::instrument(skip(state), fields(constructor_id = id))]
async fn get_team(State(state): State<FeatureState>, Path(id): Path<i64>) -> ApiResult<Response> {
    let query = GetTeamQuery {
        constructor_id: id,
        current_year: state.season.current_year(),
    };

    let response = super::queries::get::handle(state.db, query).await?;
    Ok(ApiResponse::success(response).into_response())
}

impl From<ListTeamsError> for AppError {
    fn from(err: ListTeamsError) -> Self {
        match err {
            ListTeamsError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<GetTeamError> for AppError {
    fn from(err: GetTeamError) -> Self {
        match err {
            GetTeamError::NotFound(id) => AppError::not_found("Team", id),
            GetTeamError::Database(e) => AppError::Database(e),
        }
    }
}
