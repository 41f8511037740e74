//! Driver result lookups ordered by finishing position

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::filters::escape_like;
use crate::features::shared::ordering::sort_by_position;

/// How the season lookup names its driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverSelector {
    Id(i64),
    /// Driver reference name, e.g. `hamilton`
    RefName(String),
}

/// Every result of one driver, optionally from one grid slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverResultsQuery {
    pub driver_id: i64,
    pub grid: Option<i16>,
}

/// One driver's results in one season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonResultsQuery {
    pub driver: DriverSelector,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ResultRecord {
    pub result_id: i64,
    pub race_id: i64,
    pub race_name: String,
    pub year: i32,
    pub round: i32,
    pub constructor_id: i64,
    pub constructor_name: String,
    pub car_number: i16,
    pub starting_grid_position: i16,
    pub final_position: String,
    pub points: i16,
    pub laps: i16,
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DriverResultsResponse {
    pub driver_id: i64,
    pub results: Vec<ResultRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum DriverResultsError {
    #[error("Driver '{0}' not found")]
    DriverNotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DriverResultsResponse, DriverResultsError>> for DriverResultsQuery {}

impl crate::cqrs::middleware::Query for DriverResultsQuery {}

impl Request<Result<DriverResultsResponse, DriverResultsError>> for SeasonResultsQuery {}

impl crate::cqrs::middleware::Query for SeasonResultsQuery {}

async fn resolve_driver(pool: &PgPool, driver: &DriverSelector) -> Result<i64, DriverResultsError> {
    let found: Option<i64> = match driver {
        DriverSelector::Id(id) => {
            sqlx::query_scalar("SELECT driver_id FROM drivers WHERE driver_id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?
        },
        DriverSelector::RefName(name) => {
            sqlx::query_scalar(
                "SELECT driver_id FROM drivers WHERE ref_name ILIKE $1 ORDER BY driver_id LIMIT 1",
            )
            .bind(format!("%{}%", escape_like(name)))
            .fetch_optional(pool)
            .await?
        },
    };

    found.ok_or_else(|| {
        DriverResultsError::DriverNotFound(match driver {
            DriverSelector::Id(id) => id.to_string(),
            DriverSelector::RefName(name) => name.clone(),
        })
    })
}

async fn fetch_results(
    pool: &PgPool,
    driver_id: i64,
    grid: Option<i16>,
    year: Option<i32>,
) -> Result<Vec<ResultRecord>, sqlx::Error> {
    let mut results = sqlx::query_as::<_, ResultRecord>(
        r#"
        SELECT r.result_id, r.race_id, ra.name AS race_name, ra.year, ra.round,
               r.constructor_id, c.name AS constructor_name, r.car_number,
               r.starting_grid_position, r.final_position, r.points, r.laps, r.time
        FROM results r
        JOIN races ra ON ra.race_id = r.race_id
        JOIN constructors c ON c.constructor_id = r.constructor_id
        WHERE r.driver_id = $1
          AND ($2::smallint IS NULL OR r.starting_grid_position = $2)
          AND ($3::integer IS NULL OR ra.year = $3)
        ORDER BY r.result_id
        "#,
    )
    .bind(driver_id)
    .bind(grid)
    .bind(year)
    .fetch_all(pool)
    .await?;

    sort_by_position(&mut results, |r| r.final_position.as_str());
    Ok(results)
}

#[tracing::instrument(skip(pool))]
pub async fn handle_driver(
    pool: PgPool,
    query: DriverResultsQuery,
) -> Result<DriverResultsResponse, DriverResultsError> {
    let driver_id = resolve_driver(&pool, &DriverSelector::Id(query.driver_id)).await?;
    let results = fetch_results(&pool, driver_id, query.grid, None).await?;
    Ok(DriverResultsResponse { driver_id, results })
}

#[tracing::instrument(skip(pool))]
pub async fn handle_season(
    pool: PgPool,
    query: SeasonResultsQuery,
) -> Result<DriverResultsResponse, DriverResultsError> {
    let driver_id = resolve_driver(&pool, &query.driver).await?;
    let results = fetch_results(&pool, driver_id, None, Some(query.year)).await?;
    Ok(DriverResultsResponse { driver_id, results })
}
