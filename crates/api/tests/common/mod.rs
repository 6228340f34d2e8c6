//! Shared helpers for HTTP-level integration tests.
//!
//! `build_test_app` mirrors the router construction in `main.rs` so the
//! tests exercise the same middleware stack (CORS, request ID, timeout,
//! tracing, panic recovery) that production uses.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use worktrack_core::types::DbId;

use worktrack_api::auth::jwt::{generate_access_token, JwtConfig};
use worktrack_api::config::ServerConfig;
use worktrack_api::routes;
use worktrack_api::state::AppState;

/// Fixed signing secret for test tokens.
const TEST_JWT_SECRET: &str = "integration-test-secret-that-is-long-enough";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Mint a `Bearer ...` header value for an account, signed with the test
/// secret.
pub fn bearer_for(account_id: DbId) -> String {
    let token = generate_access_token(account_id, &test_config().jwt)
        .expect("test token generation should succeed");
    format!("Bearer {token}")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, account_id: DbId) -> Response<Body> {
    app.oneshot(
        Request::get(uri)
            .header(AUTHORIZATION, bearer_for(account_id))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    account_id: DbId,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, bearer_for(account_id))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Create a company and return its id.
pub async fn create_company(pool: &PgPool, name: &str) -> DbId {
    let (id,): (DbId,) = sqlx::query_as("INSERT INTO companies (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("company insert should succeed");
    id
}

/// Create an account, optionally attached to a company, and return its id.
pub async fn create_account(pool: &PgPool, name: &str, company_id: Option<DbId>) -> DbId {
    let (id,): (DbId,) = sqlx::query_as(
        "INSERT INTO accounts (display_name, company_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(company_id)
    .fetch_one(pool)
    .await
    .expect("account insert should succeed");
    id
}

/// Add an allow-list entry; `company_id = None` makes it global.
pub async fn allow_domain(pool: &PgPool, company_id: Option<DbId>, domain: &str) {
    sqlx::query("INSERT INTO allowed_domains (company_id, domain_name) VALUES ($1, $2)")
        .bind(company_id)
        .bind(domain)
        .execute(pool)
        .await
        .expect("allow-list insert should succeed");
}

/// Check an account in through the API and return the session id.
pub async fn check_in(
    app: Router,
    account_id: DbId,
    attendance_activity_id: DbId,
    date: &str,
) -> DbId {
    let response = post_json_auth(
        app,
        "/api/v1/attendance/check-in",
        account_id,
        serde_json::json!({
            "attendance_activity_id": attendance_activity_id,
            "account_id": account_id,
            "attendance_date": date,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["id"].as_i64().expect("check-in response must carry the session id")
}

/// Fetch a session token for an account through the API.
pub async fn fetch_token(app: Router, account_id: DbId) -> String {
    let response = post_json_auth(
        app,
        "/api/v1/sessions/token",
        account_id,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["token"]
        .as_str()
        .expect("token response must carry the token")
        .to_string()
}
