//! Driver profile with career history and results by season

use chrono::NaiveDate;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::aggregate::career::{driver_career, CareerEntry, TeamRef, TeamTenure};
use crate::aggregate::listing::{group_races_by_year, SeasonGroup, Seasonal};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDriverQuery {
    pub driver_id: i64,
    /// Season treated as ongoing for "present" labels
    pub current_year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DriverProfile {
    pub driver_id: i64,
    pub ref_name: String,
    pub number: i16,
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub nationality: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DriverRaceResult {
    pub result_id: i64,
    pub race_id: i64,
    pub race_name: String,
    pub year: i32,
    pub round: i32,
    pub constructor_id: i64,
    pub constructor_name: String,
    pub starting_grid_position: i16,
    pub final_position: String,
    pub points: i16,
}

impl Seasonal for DriverRaceResult {
    fn season(&self) -> i32 {
        self.year
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetDriverResponse {
    pub driver: DriverProfile,
    pub current_team: Option<TeamRef>,
    pub career: Vec<TeamTenure>,
    /// Newest first
    pub seasons: Vec<i32>,
    /// Newest season first; results in entry order within a season
    pub results: Vec<SeasonGroup<DriverRaceResult>>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetDriverError {
    #[error("Driver '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<GetDriverResponse, GetDriverError>> for GetDriverQuery {}

impl crate::cqrs::middleware::Query for GetDriverQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetDriverQuery) -> Result<GetDriverResponse, GetDriverError> {
    let driver = sqlx::query_as::<_, DriverProfile>(
        r#"
        SELECT driver_id, ref_name, number, code, first_name, last_name, date_of_birth, nationality
        FROM drivers
        WHERE driver_id = $1
        "#,
    )
    .bind(query.driver_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetDriverError::NotFound(query.driver_id))?;

    let results = sqlx::query_as::<_, DriverRaceResult>(
        r#"
        SELECT r.result_id, ra.race_id, ra.name AS race_name, ra.year, ra.round,
               c.constructor_id, c.name AS constructor_name,
               r.starting_grid_position, r.final_position, r.points
        FROM results r
        JOIN races ra ON ra.race_id = r.race_id
        JOIN constructors c ON c.constructor_id = r.constructor_id
        WHERE r.driver_id = $1
        ORDER BY r.result_id
        "#,
    )
    .bind(query.driver_id)
    .fetch_all(&pool)
    .await?;

    let history = driver_career(
        results.iter().map(|r| CareerEntry {
            year: r.year,
            round: r.round,
            result_id: r.result_id,
            team: TeamRef {
                constructor_id: r.constructor_id,
                name: r.constructor_name.clone(),
            },
        }),
        query.current_year,
    );

    let mut seasons = history.seasons();
    seasons.reverse();

    tracing::debug!(
        driver_id = driver.driver_id,
        results = results.len(),
        teams = history.teams.len(),
        "Driver career assembled"
    );

    Ok(GetDriverResponse {
        driver,
        current_team: history.current_team,
        career: history.teams,
        seasons,
        results: group_races_by_year(results),
    })
}
