use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column list matching [`CarRecord`]
pub(crate) const CAR_COLUMNS: &str = "id, manufacturer, car_model, cylinders, engine_type, transmission, \
     fuel_type, engine_volume::float8 AS engine_volume, drive_type, image_paths, details, status, \
     created_at, updated_at";

/// A stored car submission
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CarRecord {
    pub id: i64,
    pub manufacturer: String,
    pub car_model: String,
    pub cylinders: i16,
    pub engine_type: String,
    pub transmission: String,
    pub fuel_type: String,
    pub engine_volume: f64,
    pub drive_type: String,
    pub image_paths: Vec<String>,
    pub details: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
