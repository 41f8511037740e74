use chrono::NaiveDate;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCircuitQuery {
    pub circuit_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CircuitDetail {
    pub circuit_id: i64,
    pub ref_name: String,
    pub name: String,
    pub location: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CircuitRace {
    pub race_id: i64,
    pub year: i32,
    pub round: i32,
    pub name: String,
    pub race_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCircuitResponse {
    pub circuit: CircuitDetail,
    pub race_count: usize,
    pub races: Vec<CircuitRace>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetCircuitError {
    #[error("Circuit '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<GetCircuitResponse, GetCircuitError>> for GetCircuitQuery {}

impl crate::cqrs::middleware::Query for GetCircuitQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetCircuitQuery,
) -> Result<GetCircuitResponse, GetCircuitError> {
    let circuit = sqlx::query_as::<_, CircuitDetail>(
        r#"
        SELECT circuit_id, ref_name, name, location, country, latitude, longitude, altitude
        FROM circuits
        WHERE circuit_id = $1
        "#,
    )
    .bind(query.circuit_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetCircuitError::NotFound(query.circuit_id))?;

    let races = sqlx::query_as::<_, CircuitRace>(
        r#"
        SELECT race_id, year, round, name, race_date
        FROM races
        WHERE circuit_id = $1
        ORDER BY year, round
        "#,
    )
    .bind(query.circuit_id)
    .fetch_all(&pool)
    .await?;

    Ok(GetCircuitResponse {
        circuit,
        race_count: races.len(),
        races,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{TestCircuit, TestRace};

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_races_ordered_by_year(pool: PgPool) -> sqlx::Result<()> {
        let monza = TestCircuit::new("monza", "Monza", "Italy").insert(&pool).await?;
        TestRace::new(monza, 2024, 16, "Italian Grand Prix").insert(&pool).await?;
        TestRace::new(monza, 2019, 14, "Italian Grand Prix").insert(&pool).await?;

        let response = handle(pool, GetCircuitQuery { circuit_id: monza }).await.unwrap();

        assert_eq!(response.circuit.name, "Monza");
        assert_eq!(response.race_count, 2);
        assert_eq!(response.races[0].year, 2019);
        assert_eq!(response.races[1].year, 2024);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_missing_circuit(pool: PgPool) -> sqlx::Result<()> {
        let result = handle(pool, GetCircuitQuery { circuit_id: 404 }).await;
        assert!(matches!(result, Err(GetCircuitError::NotFound(404))));
        Ok(())
    }
}
