//! Reference-data lookup routes
//!
//! - `GET /api/v1/reference/{entity}?key=value` - Rows matching the allowlisted keys
//! - `GET /api/v1/reference/{entity}/all` - Every row
//! - `GET /api/v1/reference/drivers/:id/results?grid=` - A driver's results
//! - `GET /api/v1/reference/results?driver_id=|name=&year=` - A driver's season

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use sqlx::PgPool;
use std::collections::HashMap;

use super::queries::{
    DriverResultsError, DriverResultsQuery, DriverSelector, LookupError, LookupQuery, ReferenceEntity,
    SeasonResultsQuery,
};
use crate::api::response::ApiResponse;
use crate::error::{ApiResult, AppError};

type LookupParams = Query<HashMap<String, String>>;

pub fn reference_routes() -> Router<PgPool> {
    let mut router = Router::new()
        .route("/drivers/:id/results", get(driver_results))
        .route("/results", get(season_results));

    for (path, entity) in [
        ("drivers", ReferenceEntity::Drivers),
        ("circuits", ReferenceEntity::Circuits),
        ("races", ReferenceEntity::Races),
        ("constructors", ReferenceEntity::Constructors),
    ] {
        router = router
            .route(
                &format!("/{}", path),
                get(move |state: State<PgPool>, params: LookupParams| lookup(state, params, entity, false)),
            )
            .route(
                &format!("/{}/all", path),
                get(move |state: State<PgPool>, params: LookupParams| lookup(state, params, entity, true)),
            );
    }

    router
}

#[tracing::instrument(skip(pool, params), fields(keys = params.len()))]
async fn lookup(
    State(pool): State<PgPool>,
    Query(params): LookupParams,
    entity: ReferenceEntity,
    include_all: bool,
) -> ApiResult<Response> {
    let query = LookupQuery {
        entity,
        filters: params,
        include_all,
    };

    let response = super::queries::lookup::handle(pool, query).await?;

    tracing::debug!(count = response.len(), "Reference rows returned");

    Ok(ApiResponse::success(response).into_response())
}

fn parse_param<T: std::str::FromStr>(params: &HashMap<String, String>, key: &str) -> ApiResult<Option<T>> {
    match params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("'{}' is not a valid {}", raw, key))),
    }
}

/// Results of one driver
///
/// # Query Parameters
///
/// - `grid` - Only results started from this grid position
#[tracing::instrument(skip(pool, params), fields(driver_id = id))]
async fn driver_results(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Response> {
    let query = DriverResultsQuery {
        driver_id: id,
        grid: parse_param(&params, "grid")?,
    };

    let response = super::queries::results::handle_driver(pool, query).await?;
    Ok(ApiResponse::success(response).into_response())
}

/// Results of one driver in one season
///
/// # Query Parameters
///
/// - `year` - Season (required)
/// - `driver_id` or `name` - Driver id, or driver reference name (one required)
#[tracing::instrument(skip(pool, params))]
async fn season_results(
    State(pool): State<PgPool>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Response> {
    let year: i32 = parse_param(&params, "year")?
        .ok_or_else(|| AppError::BadRequest("'year' is required".to_string()))?;

    let driver = match parse_param::<i64>(&params, "driver_id")? {
        Some(id) => DriverSelector::Id(id),
        None => match params.get("name").map(|v| v.trim()).filter(|v| !v.is_empty()) {
            Some(name) => DriverSelector::RefName(name.to_string()),
            None => {
                return Err(AppError::BadRequest(
                    "either 'driver_id' or 'name' is required".to_string(),
                ))
            },
        },
    };

    let response =
        super::queries::results::handle_season(pool, SeasonResultsQuery { driver, year }).await?;
    Ok(ApiResponse::success(response).into_response())
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<DriverResultsError> for AppError {
    fn from(err: DriverResultsError) -> Self {
        match err {
            DriverResultsError::DriverNotFound(id) => AppError::not_found("Driver", id),
            DriverResultsError::Database(e) => AppError::Database(e),
        }
    }
}
