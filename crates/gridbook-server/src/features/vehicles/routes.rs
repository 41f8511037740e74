//! Vehicle lookup routes backed by NHTSA vPIC
//!
//! - `GET /api/v1/vehicles/models?make=&year=&vehicle_type=` - Model names for a make
//! - `GET /api/v1/vehicles/vin/:vin?year=` - Decode a VIN

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use super::queries::{DecodeVinError, DecodeVinQuery, SearchModelsError, SearchModelsQuery};
use crate::api::response::ApiResponse;
use crate::error::{ApiResult, AppError};
use crate::features::FeatureState;
use crate::vpic::VpicError;

pub fn vehicles_routes() -> Router<FeatureState> {
    Router::new()
        .route("/models", get(search_models))
        .route("/vin/:vin", get(decode_vin))
}

#[tracing::instrument(skip(state, query), fields(make = %query.make))]
async fn search_models(
    State(state): State<FeatureState>,
    Query(query): Query<SearchModelsQuery>,
) -> ApiResult<Response> {
    let response = super::queries::models::handle(state.vpic, query).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[derive(Debug, Deserialize)]
struct VinParams {
    year: Option<i32>,
}

#[tracing::instrument(skip(state, params), fields(vin = %vin))]
async fn decode_vin(
    State(state): State<FeatureState>,
    Path(vin): Path<String>,
    Query(params): Query<VinParams>,
) -> ApiResult<Response> {
    let query = DecodeVinQuery {
        vin,
        year: params.year,
    };

    let response = super::queries::vin::handle(state.vpic, query).await?;
    Ok(ApiResponse::success(response).into_response())
}

impl From<VpicError> for AppError {
    fn from(err: VpicError) -> Self {
        match err {
            VpicError::VinNotFound(vin) => AppError::not_found("Vehicle with VIN", vin),
            VpicError::Status(_) | VpicError::Transport(_) | VpicError::Body(_) => {
                AppError::UpstreamUnavailable(err.to_string())
            },
            VpicError::InvalidBaseUrl(_) | VpicError::Client(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<SearchModelsError> for AppError {
    fn from(err: SearchModelsError) -> Self {
        match err {
            SearchModelsError::MakeRequired => AppError::BadRequest(err.to_string()),
            SearchModelsError::Vpic(e) => e.into(),
        }
    }
}

impl From<DecodeVinError> for AppError {
    fn from(err: DecodeVinError) -> Self {
        match err {
            DecodeVinError::VinRequired => AppError::BadRequest(err.to_string()),
            DecodeVinError::Vpic(e) => e.into(),
        }
    }
}
