//! Common utilities for Gridbook server integration tests
//!
//! Databases come from `#[sqlx::test]`, which creates a fresh database per
//! test and applies the workspace migrations. These helpers build the full
//! router on top of it and seed a small Formula 1 history.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//!
//! #[sqlx::test(migrations = "../../migrations")]
//! async fn test_something(pool: sqlx::PgPool) -> sqlx::Result<()> {
//!     let app = common::test_app(pool);
//!     let (status, json) = common::get_json(app, "/api/v1/f1/season").await;
//!     assert_eq!(status, axum::http::StatusCode::OK);
//!     Ok(())
//! }
//! ```

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

use gridbook_server::{
    api,
    config::{
        Config, CorsConfig, DatabaseConfig, RefreshConfig, SeasonConfig, ServerConfig, UpstreamConfig,
    },
    features::FeatureState,
    refresh::{MemoryReferenceInfoStore, ReferenceInfoStore},
    vpic::VpicClient,
};

/// Season treated as current in every integration test
pub const CURRENT_SEASON: i32 = 2024;

pub fn test_config(nhtsa_base_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            shutdown_timeout_secs: 1,
        },
        database: DatabaseConfig {
            url: "postgresql://localhost/gridbook_test".to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 5,
            idle_timeout_secs: 60,
        },
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            allow_credentials: true,
        },
        refresh: RefreshConfig {
            enabled: false,
            interval_secs: 300,
        },
        upstream: UpstreamConfig {
            carapi_base_url: "http://127.0.0.1:9".to_string(),
            nhtsa_base_url: nhtsa_base_url.to_string(),
            timeout_secs: 5,
        },
        season: SeasonConfig {
            current_season: Some(CURRENT_SEASON),
        },
    }
}

/// Router backed by `pool`, an in-memory reference store and a vPIC client
/// pointing at `nhtsa_base_url`
pub fn test_app_with(pool: PgPool, nhtsa_base_url: &str, reference: Arc<dyn ReferenceInfoStore>) -> Router {
    let config = test_config(nhtsa_base_url);
    let state = FeatureState {
        db: pool,
        season: config.season.clone(),
        vpic: VpicClient::new(&config.upstream.nhtsa_base_url, config.upstream.timeout_secs)
            .expect("valid vPIC base URL"),
        reference,
    };
    api::create_router(state, &config)
}

pub fn test_app(pool: PgPool) -> Router {
    test_app_with(
        pool,
        "http://127.0.0.1:9/api/vehicles",
        Arc::new(MemoryReferenceInfoStore::new()),
    )
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request handled");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, json)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

pub async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(app, request).await
}

/// Ids of the rows laid down by [`seed_history`]
#[derive(Debug, Clone, Copy)]
pub struct History {
    pub monza: i64,
    pub spa: i64,
    pub ferrari: i64,
    pub mclaren: i64,
    pub leclerc: i64,
    pub norris: i64,
    pub spa_2023: i64,
    pub monza_2023: i64,
    pub spa_2024: i64,
    pub monza_2024: i64,
}

async fn insert_id(pool: &PgPool, sql: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar(sql).fetch_one(pool).await
}

/// Two seasons, two circuits, two teams, two drivers
///
/// Leclerc drives for McLaren in 2023 and Ferrari in 2024; Norris drives for
/// McLaren in both. Winners: Norris at Spa 2024, Leclerc at Monza 2024.
pub async fn seed_history(pool: &PgPool) -> sqlx::Result<History> {
    let monza = insert_id(
        pool,
        "INSERT INTO circuits (ref_name, name, location, country) \
         VALUES ('monza', 'Autodromo Nazionale di Monza', 'Monza', 'Italy') RETURNING circuit_id",
    )
    .await?;
    let spa = insert_id(
        pool,
        "INSERT INTO circuits (ref_name, name, location, country) \
         VALUES ('spa', 'Circuit de Spa-Francorchamps', 'Spa', 'Belgium') RETURNING circuit_id",
    )
    .await?;

    let ferrari = insert_id(
        pool,
        "INSERT INTO constructors (ref_name, name, nationality) \
         VALUES ('ferrari', 'Ferrari', 'Italian') RETURNING constructor_id",
    )
    .await?;
    let mclaren = insert_id(
        pool,
        "INSERT INTO constructors (ref_name, name, nationality) \
         VALUES ('mclaren', 'McLaren', 'British') RETURNING constructor_id",
    )
    .await?;

    let leclerc = insert_id(
        pool,
        "INSERT INTO drivers (ref_name, number, code, first_name, last_name, date_of_birth, nationality) \
         VALUES ('leclerc', 16, 'LEC', 'Charles', 'Leclerc', '1997-10-16', 'Monegasque') RETURNING driver_id",
    )
    .await?;
    let norris = insert_id(
        pool,
        "INSERT INTO drivers (ref_name, number, code, first_name, last_name, date_of_birth, nationality) \
         VALUES ('norris', 4, 'NOR', 'Lando', 'Norris', '1999-11-13', 'British') RETURNING driver_id",
    )
    .await?;

    let mut races = Vec::new();
    for (circuit, year, round, name, date) in [
        (spa, 2023, 12, "Belgian Grand Prix", "2023-07-30"),
        (monza, 2023, 14, "Italian Grand Prix", "2023-09-03"),
        (spa, 2024, 14, "Belgian Grand Prix", "2024-07-28"),
        (monza, 2024, 16, "Italian Grand Prix", "2024-09-01"),
    ] {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO races (circuit_id, year, round, name, race_date) \
             VALUES ($1, $2, $3, $4, $5::date) RETURNING race_id",
        )
        .bind(circuit)
        .bind(year)
        .bind(round)
        .bind(name)
        .bind(date)
        .fetch_one(pool)
        .await?;
        races.push(id);
    }
    let [spa_2023, monza_2023, spa_2024, monza_2024] = [races[0], races[1], races[2], races[3]];

    for (race, driver, constructor, grid, position, points) in [
        (spa_2023, leclerc, mclaren, 3, "3", 15),
        (spa_2023, norris, mclaren, 5, "7", 6),
        (monza_2023, leclerc, mclaren, 2, "DNF", 0),
        (monza_2023, norris, mclaren, 1, "2", 18),
        (spa_2024, leclerc, ferrari, 1, "3", 15),
        (spa_2024, norris, mclaren, 2, "1", 25),
        (monza_2024, leclerc, ferrari, 4, "1", 25),
        (monza_2024, norris, mclaren, 1, "3", 15),
    ] {
        sqlx::query(
            "INSERT INTO results (race_id, driver_id, constructor_id, car_number, \
                starting_grid_position, final_position, points, laps, fastest_lap, top_speed_of_fl) \
             VALUES ($1, $2, $3, 0, $4, $5, $6, 44, INTERVAL '1 minute 46 seconds', 330.0)",
        )
        .bind(race)
        .bind(driver)
        .bind(constructor)
        .bind(grid as i16)
        .bind(position)
        .bind(points as i16)
        .execute(pool)
        .await?;
    }

    Ok(History {
        monza,
        spa,
        ferrari,
        mclaren,
        leclerc,
        norris,
        spa_2023,
        monza_2023,
        spa_2024,
        monza_2024,
    })
}
