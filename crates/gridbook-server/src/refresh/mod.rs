//! Background refresh of the cached CarAPI reference document
//!
//! Every few minutes the seven vehicle attribute taxonomies are re-fetched
//! and the single stored document is replaced. Readers never wait on a run;
//! they read whatever was last committed.

pub mod categories;
pub mod client;
pub mod job;
pub mod scheduler;
pub mod store;

pub use categories::{Category, ReferenceInfo, CATEGORIES};
pub use client::AttributeClient;
pub use job::{RefreshJob, RunOutcome};
pub use scheduler::{RefreshHandle, RefreshScheduler};
pub use store::{MemoryReferenceInfoStore, PgReferenceInfoStore, ReferenceInfoStore, StoredReference};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request for '{attribute}' failed: {source}")]
    Transport {
        attribute: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request for '{attribute}' returned HTTP {status}")]
    Status { attribute: &'static str, status: u16 },

    #[error("Response for '{attribute}' was not JSON: {source}")]
    Body {
        attribute: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to store reference info: {0}")]
    Store(#[from] sqlx::Error),
}
