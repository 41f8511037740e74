//! Submit car command
//!
//! New cars enter the catalog as drafts. A submission identical to an
//! existing row in every mechanical field is reported back instead of stored
//! a second time.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use gridbook_common::types::{Cylinders, DriveType, EngineType, FuelType, SubmissionStatus, Transmission};
use gridbook_common::GridbookError;

use crate::features::shared::validation::{
    validate_engine_volume, validate_manufacturer, validate_model, FieldValidationError,
};

pub const ALREADY_REGISTERED_MESSAGE: &str = "this model is already registered";

/// Command to submit a car for the catalog
///
/// Choice fields arrive as their stored spelling (`"V"`, `"Manual"`,
/// `"RWD"`, ...) and are checked against the closed sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitCarCommand {
    pub manufacturer: String,
    pub car_model: String,
    pub cylinders: i16,
    pub engine_type: String,
    pub transmission: String,
    pub fuel_type: String,
    /// Litres, one decimal place
    pub engine_volume: f64,
    pub drive_type: String,
    #[serde(default)]
    pub image_paths: Vec<String>,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    Registered,
    AlreadyRegistered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitCarResponse {
    pub outcome: SubmitOutcome,
    /// Id of the new row, or of the existing identical one
    pub id: i64,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitCarError {
    #[error("{0}")]
    Field(#[from] FieldValidationError),

    #[error("{0}")]
    Choice(#[from] GridbookError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<SubmitCarResponse, SubmitCarError>> for SubmitCarCommand {}

impl crate::cqrs::middleware::Command for SubmitCarCommand {}

/// Submission with every choice field parsed
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCar {
    pub manufacturer: String,
    pub car_model: String,
    pub cylinders: Cylinders,
    pub engine_type: EngineType,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub engine_volume: f64,
    pub drive_type: DriveType,
}

impl SubmitCarCommand {
    /// Check every field, reporting the first failure in form order
    #[tracing::instrument(skip(self), fields(manufacturer = %self.manufacturer, car_model = %self.car_model))]
    pub fn validate(&self) -> Result<ValidatedCar, SubmitCarError> {
        validate_manufacturer(&self.manufacturer)?;
        validate_model(&self.car_model)?;

        let validated = ValidatedCar {
            manufacturer: self.manufacturer.clone(),
            car_model: self.car_model.clone(),
            cylinders: Cylinders::try_from(self.cylinders)?,
            engine_type: self.engine_type.parse()?,
            transmission: self.transmission.parse()?,
            fuel_type: self.fuel_type.parse()?,
            engine_volume: {
                validate_engine_volume(self.engine_volume)?;
                self.engine_volume
            },
            drive_type: self.drive_type.parse()?,
        };

        tracing::debug!("Command validation passed");
        Ok(validated)
    }
}

#[tracing::instrument(
    skip(pool, command),
    fields(manufacturer = %command.manufacturer, car_model = %command.car_model)
)]
pub async fn handle(pool: PgPool, command: SubmitCarCommand) -> Result<SubmitCarResponse, SubmitCarError> {
    let car = command.validate()?;
    let status = SubmissionStatus::default();

    // The unique index on the mechanical fields settles concurrent identical submissions.
    let inserted: Option<i64> = sqlx::query_scalar(
        r#"
        INSERT INTO car_submissions (
            manufacturer, car_model, cylinders, engine_type, transmission,
            fuel_type, engine_volume, drive_type, image_paths, details, status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7::float8::numeric(2, 1), $8, $9, $10, $11)
        ON CONFLICT (
            manufacturer, car_model, cylinders, engine_type,
            transmission, fuel_type, engine_volume, drive_type
        ) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(&car.manufacturer)
    .bind(&car.car_model)
    .bind(car.cylinders.get())
    .bind(car.engine_type.as_str())
    .bind(car.transmission.as_str())
    .bind(car.fuel_type.as_str())
    .bind(car.engine_volume)
    .bind(car.drive_type.as_str())
    .bind(&command.image_paths)
    .bind(&command.details)
    .bind(status.as_str())
    .fetch_optional(&pool)
    .await?;

    if let Some(id) = inserted {
        tracing::info!(id, "Car submitted");
        return Ok(SubmitCarResponse {
            outcome: SubmitOutcome::Registered,
            id,
            status,
            message: None,
        });
    }

    let (id, existing_status): (i64, String) = sqlx::query_as(
        r#"
        SELECT id, status
        FROM car_submissions
        WHERE manufacturer = $1
          AND car_model = $2
          AND cylinders = $3
          AND engine_type = $4
          AND transmission = $5
          AND fuel_type = $6
          AND engine_volume = $7::float8::numeric(2, 1)
          AND drive_type = $8
        "#,
    )
    .bind(&car.manufacturer)
    .bind(&car.car_model)
    .bind(car.cylinders.get())
    .bind(car.engine_type.as_str())
    .bind(car.transmission.as_str())
    .bind(car.fuel_type.as_str())
    .bind(car.engine_volume)
    .bind(car.drive_type.as_str())
    .fetch_one(&pool)
    .await?;

    tracing::info!(id, "Identical car already registered");
    Ok(SubmitCarResponse {
        outcome: SubmitOutcome::AlreadyRegistered,
        id,
        status: existing_status.parse()?,
        message: Some(ALREADY_REGISTERED_MESSAGE.to_string()),
    })
}
