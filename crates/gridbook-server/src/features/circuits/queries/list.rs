use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCircuitsQuery {}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CircuitListItem {
    pub circuit_id: i64,
    pub ref_name: String,
    pub name: String,
    pub location: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCircuitsResponse {
    pub total_circuits: i64,
    pub total_countries: i64,
    pub circuits: Vec<CircuitListItem>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListCircuitsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListCircuitsResponse, ListCircuitsError>> for ListCircuitsQuery {}

impl crate::cqrs::middleware::Query for ListCircuitsQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    _query: ListCircuitsQuery,
) -> Result<ListCircuitsResponse, ListCircuitsError> {
    let circuits = sqlx::query_as::<_, CircuitListItem>(
        r#"
        SELECT circuit_id, ref_name, name, location, country
        FROM circuits
        ORDER BY country, name
        "#,
    )
    .fetch_all(&pool)
    .await?;

    let (total_circuits, total_countries): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COUNT(DISTINCT country) FROM circuits")
            .fetch_one(&pool)
            .await?;

    Ok(ListCircuitsResponse {
        total_circuits,
        total_countries,
        circuits,
    })
}
