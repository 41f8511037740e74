use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use gridbook_common::types::SubmissionStatus;

use crate::features::cars::types::{CarRecord, CAR_COLUMNS};

/// Move a submission through moderation (`Draft`, `Accepted`, `Declined`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetCarStatusCommand {
    #[serde(skip)]
    pub id: i64,
    pub status: SubmissionStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum SetCarStatusError {
    #[error("Car '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CarRecord, SetCarStatusError>> for SetCarStatusCommand {}

impl crate::cqrs::middleware::Command for SetCarStatusCommand {}

#[tracing::instrument(skip(pool), fields(id = command.id, status = %command.status))]
pub async fn handle(pool: PgPool, command: SetCarStatusCommand) -> Result<CarRecord, SetCarStatusError> {
    let sql = format!(
        "UPDATE car_submissions SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
        CAR_COLUMNS
    );

    let record = sqlx::query_as::<_, CarRecord>(&sql)
        .bind(command.id)
        .bind(command.status.as_str())
        .fetch_optional(&pool)
        .await?
        .ok_or(SetCarStatusError::NotFound(command.id))?;

    tracing::info!("Car status updated");
    Ok(record)
}
