use mediator::Request;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::vpic::{VpicClient, VpicError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeVinQuery {
    pub vin: String,
    /// Improves decoding of pre-1980 and ambiguous VINs
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecodeVinResponse {
    pub vin: String,
    /// vPIC's flat attribute record, keys as vPIC names them
    pub vehicle: Map<String, Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeVinError {
    #[error("VIN is required")]
    VinRequired,
    #[error(transparent)]
    Vpic(#[from] VpicError),
}

impl Request<Result<DecodeVinResponse, DecodeVinError>> for DecodeVinQuery {}

impl crate::cqrs::middleware::Query for DecodeVinQuery {}

#[tracing::instrument(skip(client))]
pub async fn handle(client: VpicClient, query: DecodeVinQuery) -> Result<DecodeVinResponse, DecodeVinError> {
    let vin = query.vin.trim().to_uppercase();
    if vin.is_empty() {
        return Err(DecodeVinError::VinRequired);
    }

    let vehicle = client.decode_vin(&vin, query.year).await?;

    Ok(DecodeVinResponse { vin, vehicle })
}
