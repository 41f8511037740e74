//! HTTP client for the CarAPI vehicle-attributes endpoint

use futures::future::try_join_all;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

use super::categories::{Category, CATEGORIES};
use super::RefreshError;

/// Fetches attribute taxonomies from CarAPI
#[derive(Debug, Clone)]
pub struct AttributeClient {
    client: Client,
    base_url: String,
}

impl AttributeClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, RefreshError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("gridbook/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RefreshError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one category's taxonomy
    pub async fn fetch(&self, category: &Category) -> Result<Value, RefreshError> {
        let url = format!("{}/api/vehicle-attributes", self.base_url);
        debug!(attribute = category.attribute, "Fetching vehicle attribute");

        let response = self
            .client
            .get(&url)
            .query(&[("attribute", category.attribute)])
            .send()
            .await
            .map_err(|source| RefreshError::Transport {
                attribute: category.attribute,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RefreshError::Status {
                attribute: category.attribute,
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| RefreshError::Body {
                attribute: category.attribute,
                source,
            })
    }

    /// Fetch every category concurrently and assemble the stored document
    ///
    /// Fails as a whole if any single category fails.
    pub async fn fetch_all(&self) -> Result<Value, RefreshError> {
        let bodies = try_join_all(CATEGORIES.iter().map(|c| self.fetch(c))).await?;

        let document: Map<String, Value> = CATEGORIES
            .iter()
            .zip(bodies)
            .map(|(category, body)| (category.key.to_string(), body))
            .collect();

        Ok(Value::Object(document))
    }
}
