//! Integration tests for the middleware stack on the full router
//!
//! - CORS headers for configured origins and preflight requests
//! - Compression when the client asks for it

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use sqlx::PgPool;
use tower::ServiceExt;

mod common;
use common::test_app;

#[sqlx::test(migrations = "../../migrations")]
async fn test_cors_headers_with_specific_origin(pool: PgPool) -> sqlx::Result<()> {
    let response = test_app(pool)
        .oneshot(
            Request::builder()
                .uri("/api/v1/f1/circuits")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_cors_preflight_for_submission(pool: PgPool) -> sqlx::Result<()> {
    let response = test_app(pool)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/v1/cars")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    assert_eq!(headers.get(header::ACCESS_CONTROL_MAX_AGE).unwrap(), "3600");
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_origin_gets_no_cors_header(pool: PgPool) -> sqlx::Result<()> {
    let response = test_app(pool)
        .oneshot(
            Request::builder()
                .uri("/api/v1/f1/circuits")
                .header(header::ORIGIN, "https://elsewhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_gzip_when_requested(pool: PgPool) -> sqlx::Result<()> {
    let response = test_app(pool)
        .oneshot(
            Request::builder()
                .uri("/api/v1/f1/races")
                .header(header::ACCEPT_ENCODING, "gzip")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CONTENT_ENCODING).unwrap(), "gzip");
    Ok(())
}
