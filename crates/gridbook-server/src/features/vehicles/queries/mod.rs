pub mod models;
pub mod vin;

pub use models::{SearchModelsError, SearchModelsQuery, SearchModelsResponse};
pub use vin::{DecodeVinError, DecodeVinQuery, DecodeVinResponse};
