//! Current season API routes
//!
//! - `GET /api/v1/f1/season` - Winners of every race of the current season

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::queries::{GetSeasonWinnersError, GetSeasonWinnersQuery};
use crate::api::response::ApiResponse;
use crate::error::{ApiResult, AppError};
use crate::features::FeatureState;

pub fn season_routes() -> Router<FeatureState> {
    Router::new().route("/", get(current_season))
}

#[tracing::instrument(skip(state))]
async fn current_season(State(state): State<FeatureState>) -> ApiResult<Response> {
    let query = GetSeasonWinnersQuery {
        year: state.season.current_year(),
    };

    let response = super::queries::winners::handle(state.db, query).await?;

    tracing::debug!(
        year = response.year,
        winners = response.winners.len(),
        "Season winners listed via API"
    );

    Ok(ApiResponse::success(response).into_response())
}

impl From<GetSeasonWinnersError> for AppError {
    fn from(err: GetSeasonWinnersError) -> Self {
        match err {
            GetSeasonWinnersError::Database(e) => AppError::Database(e),
        }
    }
}
