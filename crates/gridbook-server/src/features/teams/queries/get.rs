//! Constructor profile with its seasons and drivers

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::BTreeMap;

use crate::aggregate::career::{constructor_career, SeasonSpan};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTeamQuery {
    pub constructor_id: i64,
    pub current_year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeamProfile {
    pub constructor_id: i64,
    pub ref_name: String,
    pub name: String,
    pub nationality: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonDriver {
    pub driver_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonDrivers {
    pub year: i32,
    pub drivers: Vec<SeasonDriver>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetTeamResponse {
    pub team: TeamProfile,
    pub seasons: SeasonSpan,
    /// Newest season first
    pub drivers_by_season: Vec<SeasonDrivers>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetTeamError {
    #[error("Team '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<GetTeamResponse, GetTeamError>> for GetTeamQuery {}

impl crate::cqrs::middleware::Query for GetTeamQuery {}

#[derive(Debug, sqlx::FromRow)]
struct SeasonDriverRecord {
    year: i32,
    driver_id: i64,
    name: String,
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetTeamQuery) -> Result<GetTeamResponse, GetTeamError> {
    let team = sqlx::query_as::<_, TeamProfile>(
        "SELECT constructor_id, ref_name, name, nationality FROM constructors WHERE constructor_id = $1",
    )
    .bind(query.constructor_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetTeamError::NotFound(query.constructor_id))?;

    let fielded = sqlx::query_as::<_, SeasonDriverRecord>(
        r#"
        SELECT DISTINCT ra.year, d.driver_id, d.first_name || ' ' || d.last_name AS name,
               d.last_name, d.first_name
        FROM results r
        JOIN races ra ON ra.race_id = r.race_id
        JOIN drivers d ON d.driver_id = r.driver_id
        WHERE r.constructor_id = $1
        ORDER BY ra.year, d.last_name, d.first_name, d.driver_id
        "#,
    )
    .bind(query.constructor_id)
    .fetch_all(&pool)
    .await?;

    let seasons = constructor_career(fielded.iter().map(|f| f.year), query.current_year);

    let mut by_year: BTreeMap<i32, Vec<SeasonDriver>> = BTreeMap::new();
    for record in fielded {
        by_year.entry(record.year).or_default().push(SeasonDriver {
            driver_id: record.driver_id,
            name: record.name,
        });
    }

    let drivers_by_season = by_year
        .into_iter()
        .rev()
        .map(|(year, drivers)| SeasonDrivers { year, drivers })
        .collect();

    Ok(GetTeamResponse {
        team,
        seasons,
        drivers_by_season,
    })
}
