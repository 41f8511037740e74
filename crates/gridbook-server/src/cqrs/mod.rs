//! Mediator wiring for every command and query handler
//!
//! Route handlers call the feature `handle` functions directly; the mediator
//! offers the same handlers behind a single `send` entry point.

pub use mediator::DefaultAsyncMediator;

use crate::features::FeatureState;

pub mod middleware;

pub type AppMediator = DefaultAsyncMediator;

pub fn build_mediator(state: FeatureState) -> AppMediator {
    let pool = state.db;

    DefaultAsyncMediator::builder()
        // Season
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::season::queries::winners::handle(pool, query).await }
            }
        })
        // Circuits
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::circuits::queries::list::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::circuits::queries::get::handle(pool, query).await }
            }
        })
        // Races
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::races::queries::list::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::races::queries::get::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::races::queries::standings::handle(pool, query).await }
            }
        })
        // Drivers
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::drivers::queries::list::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::drivers::queries::get::handle(pool, query).await }
            }
        })
        // Teams
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::teams::queries::list::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::teams::queries::get::handle(pool, query).await }
            }
        })
        // Reference lookups
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::reference::queries::lookup::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::reference::queries::results::handle_driver(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::reference::queries::results::handle_season(pool, query).await }
            }
        })
        // Cars
        .add_handler({
            let pool = pool.clone();
            move |cmd| {
                let pool = pool.clone();
                async move { crate::features::cars::commands::submit::handle(pool, cmd).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |cmd| {
                let pool = pool.clone();
                async move { crate::features::cars::commands::set_status::handle(pool, cmd).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::cars::queries::list_accepted::handle(pool, query).await }
            }
        })
        .add_handler({
            let store = state.reference.clone();
            move |query| {
                let store = store.clone();
                async move { crate::features::cars::queries::reference::handle(store, query).await }
            }
        })
        // Vehicles
        .add_handler({
            let client = state.vpic.clone();
            move |query| {
                let client = client.clone();
                async move { crate::features::vehicles::queries::models::handle(client, query).await }
            }
        })
        .add_handler({
            let client = state.vpic.clone();
            move |query| {
                let client = client.clone();
                async move { crate::features::vehicles::queries::vin::handle(client, query).await }
            }
        })
        .build()
}
