//! Feature modules implementing the Gridbook API
//!
//! Each feature is a vertical slice with its own commands, queries and
//! routes, following the CQRS (Command Query Responsibility Segregation)
//! split used throughout the server.
//!
//! # Features
//!
//! - **season**: Winners of every race in the current season
//! - **circuits**: Circuit list and circuit detail with its races
//! - **races**: Races grouped by season, race detail, standings snapshots
//! - **drivers**: Searchable driver list and driver career pages
//! - **teams**: Searchable constructor list and team pages
//! - **reference**: Allowlisted filter lookups over the F1 tables
//! - **cars**: Car catalog submissions, moderation and cached taxonomies
//! - **vehicles**: Model search and VIN decoding through NHTSA vPIC
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations
//! - `queries/` - Read operations
//! - `routes.rs` - HTTP route definitions
//!
//! Commands and queries implement the mediator pattern using the `mediator` crate.

pub mod cars;
pub mod circuits;
pub mod drivers;
pub mod races;
pub mod reference;
pub mod season;
pub mod shared;
pub mod teams;
pub mod vehicles;

use axum::Router;
use std::sync::Arc;

use crate::config::SeasonConfig;
use crate::refresh::ReferenceInfoStore;
use crate::vpic::VpicClient;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// PostgreSQL connection pool for database operations
    pub db: sqlx::PgPool,
    /// Which season counts as current
    pub season: SeasonConfig,
    pub vpic: VpicClient,
    /// Last committed CarAPI reference document
    pub reference: Arc<dyn ReferenceInfoStore>,
}

/// Creates the main API router with all feature routes mounted
///
/// - `/f1/season`, `/f1/circuits`, `/f1/races`, `/f1/drivers`, `/f1/teams` - Browsing views
/// - `/reference` - Filtered reference lookups
/// - `/cars` - Car catalog
/// - `/vehicles` - vPIC lookups
pub fn router(state: FeatureState) -> Router<()> {
    let f1 = Router::new()
        .nest("/season", season::season_routes().with_state(state.clone()))
        .nest("/circuits", circuits::circuits_routes().with_state(state.db.clone()))
        .nest("/races", races::races_routes().with_state(state.db.clone()))
        .nest("/drivers", drivers::drivers_routes().with_state(state.clone()))
        .nest("/teams", teams::teams_routes().with_state(state.clone()));

    Router::new()
        .nest("/f1", f1)
        .nest("/reference", reference::reference_routes().with_state(state.db.clone()))
        .nest("/cars", cars::cars_routes().with_state(state.clone()))
        .nest("/vehicles", vehicles::vehicles_routes().with_state(state))
}
