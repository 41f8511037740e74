//! NHTSA vPIC client: models-for-make search and VIN decoding
//!
//! Only the two read endpoints the lookup pages need. Requests always ask for
//! `format=json`; a response without a `Results` array counts as malformed.

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum VpicError {
    #[error("Invalid vPIC base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("vPIC request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("vPIC returned HTTP {0}")]
    Status(u16),

    #[error("vPIC response was not valid JSON: {0}")]
    Body(#[source] reqwest::Error),

    #[error("No vehicle found for VIN '{0}'")]
    VinNotFound(String),
}

/// Search parameters for the models endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSearch {
    pub make: String,
    pub year: Option<i32>,
    pub vehicle_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResultsEnvelope {
    #[serde(rename = "Results")]
    results: Vec<Value>,
}

/// Path segments below the API root for a model search
///
/// A bare make uses `GetModelsForMake`; adding a year or vehicle type
/// switches to `GetModelsForMakeYear` with the extra segments appended.
/// The make is lower-cased.
pub fn model_search_segments(search: &ModelSearch) -> Vec<String> {
    let make = search.make.trim().to_lowercase();
    let vehicle_type = search
        .vehicle_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if search.year.is_none() && vehicle_type.is_none() {
        return vec!["GetModelsForMake".to_string(), make];
    }

    let mut segments = vec!["GetModelsForMakeYear".to_string(), "make".to_string(), make];
    if let Some(year) = search.year {
        segments.push("modelyear".to_string());
        segments.push(year.to_string());
    }
    if let Some(vehicle_type) = vehicle_type {
        segments.push("vehicletype".to_string());
        segments.push(vehicle_type.to_string());
    }
    segments
}

/// Client for the vPIC vehicles API
#[derive(Debug, Clone)]
pub struct VpicClient {
    client: Client,
    base_url: Url,
}

impl VpicClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, VpicError> {
        let mut base_url =
            Url::parse(base_url).map_err(|_| VpicError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(VpicError::InvalidBaseUrl(base_url.to_string()));
        }
        // keep the last path segment when segments are appended
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("gridbook/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(VpicError::Client)?;

        Ok(Self { client, base_url })
    }

    /// Absolute URL for `segments` below the API root, with `format=json`
    pub fn endpoint(&self, segments: &[String]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        url.query_pairs_mut().append_pair("format", "json");
        url
    }

    /// Model names for a make, optionally narrowed by year and vehicle type, sorted
    pub async fn models_for_make(&self, search: &ModelSearch) -> Result<Vec<String>, VpicError> {
        let url = self.endpoint(&model_search_segments(search));
        let results = self.fetch_results(url).await?;

        let mut models: Vec<String> = results
            .iter()
            .filter_map(|item| item.get("Model_Name").and_then(Value::as_str))
            .map(str::to_string)
            .collect();
        models.sort();

        Ok(models)
    }

    /// Decode a VIN into vPIC's flat attribute record
    pub async fn decode_vin(
        &self,
        vin: &str,
        model_year: Option<i32>,
    ) -> Result<Map<String, Value>, VpicError> {
        let vin = vin.trim().to_uppercase();
        let mut url = self.endpoint(&["DecodeVinValues".to_string(), vin.clone()]);
        if let Some(year) = model_year {
            url.query_pairs_mut().append_pair("modelyear", &year.to_string());
        }

        let results = self.fetch_results(url).await?;

        match results.into_iter().next() {
            Some(Value::Object(record)) => Ok(record),
            _ => Err(VpicError::VinNotFound(vin)),
        }
    }

    async fn fetch_results(&self, url: Url) -> Result<Vec<Value>, VpicError> {
        debug!(url = %url, "Querying vPIC");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(VpicError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(VpicError::Status(status.as_u16()));
        }

        let envelope: ResultsEnvelope = response.json().await.map_err(VpicError::Body)?;
        Ok(envelope.results)
    }
}
