//! Shared validation utilities
//!
//! Field rules for car submissions. Each error knows which request field it
//! belongs to so the API layer can report `{field, message}`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use gridbook_server::features::shared::validation::{validate_manufacturer, validate_model};
//!
//! validate_manufacturer("Porsche")?;
//! validate_model("911 Carrera")?;
//! ```

use thiserror::Error;

/// Smallest accepted engine displacement, in litres
pub const MIN_ENGINE_VOLUME: f64 = 0.1;

/// Largest accepted engine displacement, in litres
pub const MAX_ENGINE_VOLUME: f64 = 9.9;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldValidationError {
    #[error("Manufacturer is required")]
    ManufacturerRequired,

    #[error("Manufacturer must contain letters only")]
    ManufacturerNotAlphabetic,

    #[error("Model is required")]
    ModelRequired,

    #[error("Model words must be letters or digits separated by single spaces")]
    ModelNotAlphanumeric,

    #[error("Engine volume must be between 0.1 and 9.9 litres")]
    EngineVolumeOutOfRange,

    #[error("Engine volume must have at most one decimal place")]
    EngineVolumePrecision,
}

impl FieldValidationError {
    /// Request field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::ManufacturerRequired | Self::ManufacturerNotAlphabetic => "manufacturer",
            Self::ModelRequired | Self::ModelNotAlphanumeric => "car_model",
            Self::EngineVolumeOutOfRange | Self::EngineVolumePrecision => "engine_volume",
        }
    }
}

/// Manufacturer names are a single run of letters (any script)
pub fn validate_manufacturer(name: &str) -> Result<(), FieldValidationError> {
    if name.is_empty() {
        return Err(FieldValidationError::ManufacturerRequired);
    }
    if !name.chars().all(char::is_alphabetic) {
        return Err(FieldValidationError::ManufacturerNotAlphabetic);
    }
    Ok(())
}

/// Model names are alphanumeric words separated by exactly one space
///
/// Leading, trailing or doubled spaces produce an empty word and fail.
pub fn validate_model(model: &str) -> Result<(), FieldValidationError> {
    if model.is_empty() {
        return Err(FieldValidationError::ModelRequired);
    }
    let valid = model
        .split(' ')
        .all(|word| !word.is_empty() && word.chars().all(char::is_alphanumeric));
    if !valid {
        return Err(FieldValidationError::ModelNotAlphanumeric);
    }
    Ok(())
}

/// Displacement in litres, 0.1 to 9.9 with one decimal place
pub fn validate_engine_volume(litres: f64) -> Result<(), FieldValidationError> {
    if !litres.is_finite() || !(MIN_ENGINE_VOLUME..=MAX_ENGINE_VOLUME).contains(&litres) {
        return Err(FieldValidationError::EngineVolumeOutOfRange);
    }
    let tenths = litres * 10.0;
    if (tenths - tenths.round()).abs() > 1e-9 {
        return Err(FieldValidationError::EngineVolumePrecision);
    }
    Ok(())
}
