//! Drivers' championship table as it stood after one race

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRaceStandingsQuery {
    pub race_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StandingRow {
    pub position: i16,
    pub driver_id: i64,
    pub driver_name: String,
    pub points: i16,
    pub wins_in_season: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRaceStandingsResponse {
    pub race_id: i64,
    pub standings: Vec<StandingRow>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetRaceStandingsError {
    #[error("Race '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<GetRaceStandingsResponse, GetRaceStandingsError>> for GetRaceStandingsQuery {}

impl crate::cqrs::middleware::Query for GetRaceStandingsQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetRaceStandingsQuery,
) -> Result<GetRaceStandingsResponse, GetRaceStandingsError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM races WHERE race_id = $1)")
        .bind(query.race_id)
        .fetch_one(&pool)
        .await?;
    if !exists {
        return Err(GetRaceStandingsError::NotFound(query.race_id));
    }

    let standings = sqlx::query_as::<_, StandingRow>(
        r#"
        SELECT ds.position, d.driver_id,
               d.first_name || ' ' || d.last_name AS driver_name,
               ds.points, ds.wins_in_season
        FROM driver_standings ds
        JOIN drivers d ON d.driver_id = ds.driver_id
        WHERE ds.race_id = $1
        ORDER BY ds.position, ds.ds_id
        "#,
    )
    .bind(query.race_id)
    .fetch_all(&pool)
    .await?;

    Ok(GetRaceStandingsResponse {
        race_id: query.race_id,
        standings,
    })
}
