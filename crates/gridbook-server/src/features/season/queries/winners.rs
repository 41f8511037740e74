//! Race winners of one championship season

use chrono::NaiveDate;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSeasonWinnersQuery {
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RaceWinner {
    pub race_id: i64,
    pub round: i32,
    pub race_name: String,
    pub race_date: NaiveDate,
    pub driver_id: i64,
    pub driver_name: String,
    pub constructor_id: i64,
    pub constructor_name: String,
    pub points: i16,
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSeasonWinnersResponse {
    pub year: i32,
    pub winners: Vec<RaceWinner>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetSeasonWinnersError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<GetSeasonWinnersResponse, GetSeasonWinnersError>> for GetSeasonWinnersQuery {}

impl crate::cqrs::middleware::Query for GetSeasonWinnersQuery {}

/// Winners are the results whose final position is exactly "1"
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetSeasonWinnersQuery,
) -> Result<GetSeasonWinnersResponse, GetSeasonWinnersError> {
    let winners = sqlx::query_as::<_, RaceWinner>(
        r#"
        SELECT ra.race_id, ra.round, ra.name AS race_name, ra.race_date,
               d.driver_id, d.first_name || ' ' || d.last_name AS driver_name,
               c.constructor_id, c.name AS constructor_name,
               r.points, r.time
        FROM results r
        JOIN races ra ON ra.race_id = r.race_id
        JOIN drivers d ON d.driver_id = r.driver_id
        JOIN constructors c ON c.constructor_id = r.constructor_id
        WHERE ra.year = $1 AND r.final_position = '1'
        ORDER BY ra.race_id
        "#,
    )
    .bind(query.year)
    .fetch_all(&pool)
    .await?;

    Ok(GetSeasonWinnersResponse {
        year: query.year,
        winners,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_only_winners_of_the_season(pool: PgPool) -> sqlx::Result<()> {
        let bahrain = TestCircuit::new("bahrain", "Bahrain", "Bahrain").insert(&pool).await?;
        let jeddah = TestCircuit::new("jeddah", "Jeddah", "Saudi Arabia").insert(&pool).await?;
        let r1 = TestRace::new(bahrain, 2024, 1, "Bahrain Grand Prix").insert(&pool).await?;
        let r2 = TestRace::new(jeddah, 2024, 2, "Saudi Arabian Grand Prix").insert(&pool).await?;
        let old = TestRace::new(bahrain, 2023, 1, "Bahrain Grand Prix").insert(&pool).await?;

        let red_bull = insert_constructor(&pool, "Red Bull", "Austrian").await?;
        let ver = TestDriver::new("Max", "Verstappen", "Dutch").insert(&pool).await?;
        let per = TestDriver::new("Sergio", "Perez", "Mexican").insert(&pool).await?;

        TestResult::new(r2, ver, red_bull, "1").insert(&pool).await?;
        TestResult::new(r1, ver, red_bull, "1").insert(&pool).await?;
        TestResult::new(r1, per, red_bull, "2").insert(&pool).await?;
        TestResult::new(r2, per, red_bull, "DNF").insert(&pool).await?;
        TestResult::new(old, per, red_bull, "1").insert(&pool).await?;

        let response = handle(pool, GetSeasonWinnersQuery { year: 2024 }).await.unwrap();

        let races: Vec<i64> = response.winners.iter().map(|w| w.race_id).collect();
        assert_eq!(races, vec![r1, r2]);
        assert!(response.winners.iter().all(|w| w.driver_id == ver));
        Ok(())
    }
}
