//! Gridbook Server Library
//!
//! HTTP server for browsing Formula 1 history and a user-submitted car
//! catalog.
//!
//! # Overview
//!
//! - **F1 browsing**: Season winners, circuits, races, drivers and teams
//! - **Reference lookups**: Allowlisted filters over the F1 tables
//! - **Car catalog**: Validated submissions with duplicate detection
//! - **Vehicle lookups**: Model search and VIN decoding through NHTSA vPIC
//! - **Reference refresh**: A background job caching CarAPI attribute taxonomies
//!
//! # Architecture
//!
//! The server follows a **CQRS (Command Query Responsibility Segregation)** layout:
//!
//! - **Commands** (write operations): submit a car, change its moderation status
//! - **Queries** (read operations): everything else
//!
//! Pure aggregation (career history and season grouping)
//! lives in [`aggregate`] and never touches the database.
//!
//! ## Framework Stack
//!
//! - **Axum**: Web framework
//! - **SQLx**: PostgreSQL access and migrations
//! - **Tower**: Middleware and service abstractions
//! - **reqwest**: Upstream HTTP clients
//!
//! # Example
//!
//! ```no_run
//! use gridbook_server::{api, config::Config, db, features::FeatureState};
//! use gridbook_server::refresh::PgReferenceInfoStore;
//! use gridbook_server::vpic::VpicClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     let state = FeatureState {
//!         db: pool.clone(),
//!         season: config.season.clone(),
//!         vpic: VpicClient::new(&config.upstream.nhtsa_base_url, config.upstream.timeout_secs)?,
//!         reference: Arc::new(PgReferenceInfoStore::new(pool)),
//!     };
//!     let app = api::create_router(state, &config);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod refresh;
pub mod vpic;

// Re-export commonly used types
pub use error::{ApiResult, AppError};
