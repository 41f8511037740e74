use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::vpic::{ModelSearch, VpicClient, VpicError};

/// Model names for a make, optionally narrowed by model year and vehicle type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchModelsQuery {
    #[serde(default)]
    pub make: String,
    pub year: Option<i32>,
    pub vehicle_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchModelsResponse {
    pub make: String,
    pub models: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchModelsError {
    #[error("Make is required")]
    MakeRequired,
    #[error(transparent)]
    Vpic(#[from] VpicError),
}

impl Request<Result<SearchModelsResponse, SearchModelsError>> for SearchModelsQuery {}

impl crate::cqrs::middleware::Query for SearchModelsQuery {}

impl SearchModelsQuery {
    pub fn validate(&self) -> Result<(), SearchModelsError> {
        if self.make.trim().is_empty() {
            return Err(SearchModelsError::MakeRequired);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(client))]
pub async fn handle(
    client: VpicClient,
    query: SearchModelsQuery,
) -> Result<SearchModelsResponse, SearchModelsError> {
    query.validate()?;

    let search = ModelSearch {
        make: query.make.trim().to_lowercase(),
        year: query.year,
        vehicle_type: query.vehicle_type,
    };

    let models = client.models_for_make(&search).await?;
    tracing::debug!(count = models.len(), "Models found");

    Ok(SearchModelsResponse {
        make: search.make,
        models,
    })
}
