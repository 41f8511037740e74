use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::cars::types::{CarRecord, CAR_COLUMNS};

/// Accepted cars only, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAcceptedCarsQuery {}

#[derive(Debug, thiserror::Error)]
pub enum ListAcceptedCarsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Vec<CarRecord>, ListAcceptedCarsError>> for ListAcceptedCarsQuery {}

impl crate::cqrs::middleware::Query for ListAcceptedCarsQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    _query: ListAcceptedCarsQuery,
) -> Result<Vec<CarRecord>, ListAcceptedCarsError> {
    let sql = format!(
        "SELECT {} FROM car_submissions WHERE status = 'Accepted' ORDER BY created_at DESC, id DESC",
        CAR_COLUMNS
    );

    let cars = sqlx::query_as::<_, CarRecord>(&sql).fetch_all(&pool).await?;
    Ok(cars)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn insert_car(pool: &PgPool, model: &str, status: &str, minutes_ago: i32) -> sqlx::Result<i64> {
        sqlx::query_scalar(
            r#"
            INSERT INTO car_submissions (
                manufacturer, car_model, cylinders, engine_type, transmission,
                fuel_type, engine_volume, drive_type, status, created_at
            )
            VALUES ('Toyota', $1, 4, 'i', 'Manual', 'Gas', 1.6, 'FWD', $2,
                    NOW() - make_interval(mins => $3))
            RETURNING id
            "#,
        )
        .bind(model)
        .bind(status)
        .bind(minutes_ago)
        .fetch_one(pool)
        .await
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_only_accepted_newest_first(pool: PgPool) -> sqlx::Result<()> {
        insert_car(&pool, "Corolla", "Accepted", 30).await?;
        insert_car(&pool, "Yaris", "Draft", 10).await?;
        insert_car(&pool, "Celica", "Accepted", 5).await?;
        insert_car(&pool, "Supra", "Declined", 1).await?;

        let cars = handle(pool, ListAcceptedCarsQuery::default()).await.unwrap();

        let models: Vec<&str> = cars.iter().map(|c| c.car_model.as_str()).collect();
        assert_eq!(models, vec!["Celica", "Corolla"]);
        assert!(cars.iter().all(|c| c.status == "Accepted"));
        Ok(())
    }
}
