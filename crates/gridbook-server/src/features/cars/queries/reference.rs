//! Cached vehicle attribute taxonomies for the submission form

use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::refresh::{ReferenceInfo, ReferenceInfoStore};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetCarReferenceQuery {}

#[derive(Debug, Clone, Serialize)]
pub struct CarReferenceResponse {
    #[serde(flatten)]
    pub info: ReferenceInfo,
    /// `None` until the first refresh succeeds
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetCarReferenceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CarReferenceResponse, GetCarReferenceError>> for GetCarReferenceQuery {}

impl crate::cqrs::middleware::Query for GetCarReferenceQuery {}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: Arc<dyn ReferenceInfoStore>,
    _query: GetCarReferenceQuery,
) -> Result<CarReferenceResponse, GetCarReferenceError> {
    let response = match store.latest().await? {
        Some(stored) => CarReferenceResponse {
            info: ReferenceInfo::from_document(&stored.info),
            refreshed_at: Some(stored.refreshed_at),
        },
        None => CarReferenceResponse {
            info: ReferenceInfo::from_document(&Value::Null),
            refreshed_at: None,
        },
    };

    Ok(response)
}
