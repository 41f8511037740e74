use chrono::{NaiveDate, NaiveTime};
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRaceQuery {
    pub race_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RaceDetail {
    pub race_id: i64,
    pub year: i32,
    pub round: i32,
    pub name: String,
    pub race_date: NaiveDate,
    pub race_time: Option<NaiveTime>,
    pub quali_date: Option<NaiveDate>,
    pub quali_time: Option<NaiveTime>,
    pub sprint_race_date: Option<NaiveDate>,
    pub sprint_race_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RaceCircuit {
    pub circuit_id: i64,
    pub name: String,
    pub location: String,
    pub country: String,
}

/// One classified (or not) finisher of a race
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RaceResultRow {
    pub result_id: i64,
    pub driver_id: i64,
    pub driver_name: String,
    pub constructor_id: i64,
    pub constructor_name: String,
    pub car_number: i16,
    pub starting_grid_position: i16,
    pub final_position: String,
    pub points: i16,
    pub laps: i16,
    pub time: Option<String>,
    /// Fastest lap in seconds
    pub fastest_lap: f64,
    pub top_speed_of_fl: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRaceResponse {
    pub race: RaceDetail,
    pub circuit: RaceCircuit,
    pub results: Vec<RaceResultRow>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetRaceError {
    #[error("Race '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<GetRaceResponse, GetRaceError>> for GetRaceQuery {}

impl crate::cqrs::middleware::Query for GetRaceQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetRaceQuery) -> Result<GetRaceResponse, GetRaceError> {
    let race = sqlx::query_as::<_, RaceDetail>(
        r#"
        SELECT race_id, year, round, name, race_date, race_time,
               quali_date, quali_time, sprint_race_date, sprint_race_time
        FROM races
        WHERE race_id = $1
        "#,
    )
    .bind(query.race_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetRaceError::NotFound(query.race_id))?;

    let circuit = sqlx::query_as::<_, RaceCircuit>(
        r#"
        SELECT c.circuit_id, c.name, c.location, c.country
        FROM circuits c
        JOIN races ra ON ra.circuit_id = c.circuit_id
        WHERE ra.race_id = $1
        "#,
    )
    .bind(query.race_id)
    .fetch_one(&pool)
    .await?;

    let results = sqlx::query_as::<_, RaceResultRow>(
        r#"
        SELECT r.result_id,
               d.driver_id, d.first_name || ' ' || d.last_name AS driver_name,
               c.constructor_id, c.name AS constructor_name,
               r.car_number, r.starting_grid_position, r.final_position,
               r.points, r.laps, r.time,
               EXTRACT(EPOCH FROM r.fastest_lap)::float8 AS fastest_lap,
               r.top_speed_of_fl
        FROM results r
        JOIN drivers d ON d.driver_id = r.driver_id
        JOIN constructors c ON c.constructor_id = r.constructor_id
        WHERE r.race_id = $1
        ORDER BY r.result_id
        "#,
    )
    .bind(query.race_id)
    .fetch_all(&pool)
    .await?;

    Ok(GetRaceResponse {
        race,
        circuit,
        results,
    })
}
