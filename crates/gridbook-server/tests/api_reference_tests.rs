//! Integration tests for the reference lookup endpoints

use axum::http::StatusCode;
use sqlx::PgPool;

mod common;
use common::{get_json, seed_history, test_app};

fn positions(json: &serde_json::Value) -> Vec<String> {
    json["data"]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["final_position"].as_str().unwrap().to_string())
        .collect()
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_lookup_without_recognised_key_is_empty(pool: PgPool) -> sqlx::Result<()> {
    seed_history(&pool).await?;

    let (status, json) = get_json(test_app(pool.clone()), "/api/v1/reference/drivers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 0);

    let (_, json) = get_json(test_app(pool.clone()), "/api/v1/reference/drivers?team=ferrari").await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);

    let (_, json) = get_json(test_app(pool), "/api/v1/reference/drivers/all").await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_lookup_filters(pool: PgPool) -> sqlx::Result<()> {
    seed_history(&pool).await?;

    let (_, json) = get_json(test_app(pool.clone()), "/api/v1/reference/drivers?number=16").await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["last_name"], "Leclerc");

    let (_, json) = get_json(test_app(pool.clone()), "/api/v1/reference/circuits?country=ital").await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let (_, json) =
        get_json(test_app(pool.clone()), "/api/v1/reference/races?name=belgian&year=2024").await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["race_date"], "2024-07-28");

    let (_, json) = get_json(test_app(pool.clone()), "/api/v1/reference/races?date=2023-09").await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let (_, json) = get_json(test_app(pool), "/api/v1/reference/constructors?nationality=BRIT").await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "McLaren");
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_driver_results_by_grid(pool: PgPool) -> sqlx::Result<()> {
    let history = seed_history(&pool).await?;

    let uri = format!("/api/v1/reference/drivers/{}/results", history.norris);
    let (status, json) = get_json(test_app(pool.clone()), &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(positions(&json), vec!["1", "2", "3", "7"]);

    let uri = format!("/api/v1/reference/drivers/{}/results?grid=1", history.norris);
    let (_, json) = get_json(test_app(pool.clone()), &uri).await;
    assert_eq!(positions(&json), vec!["2", "3"]);

    let uri = format!("/api/v1/reference/drivers/{}/results?grid=pole", history.norris);
    let (status, _) = get_json(test_app(pool.clone()), &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(test_app(pool), "/api/v1/reference/drivers/999999/results").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_season_results(pool: PgPool) -> sqlx::Result<()> {
    let history = seed_history(&pool).await?;

    let uri = format!("/api/v1/reference/results?driver_id={}&year=2023", history.leclerc);
    let (status, json) = get_json(test_app(pool.clone()), &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(positions(&json), vec!["3", "DNF"]);

    let (_, json) = get_json(test_app(pool.clone()), "/api/v1/reference/results?name=leclerc&year=2024").await;
    assert_eq!(json["data"]["driver_id"], history.leclerc);
    assert_eq!(positions(&json), vec!["1", "3"]);

    let (status, _) = get_json(test_app(pool.clone()), "/api/v1/reference/results?name=leclerc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(test_app(pool.clone()), "/api/v1/reference/results?year=2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) =
        get_json(test_app(pool), "/api/v1/reference/results?name=senna&year=1988").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["message"], "Driver 'senna' not found");
    Ok(())
}
