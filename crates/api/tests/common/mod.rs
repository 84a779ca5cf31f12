//! Shared test harness: builds the real application router (same middleware
//! stack as production) on a per-test database pool, plus request helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use sitequote_api::auth::jwt::{generate_access_token, JwtConfig};
use sitequote_api::auth::password::hash_password;
use sitequote_api::config::ServerConfig;
use sitequote_api::router::build_app_router;
use sitequote_api::state::AppState;
use sitequote_core::rate_card::RateCardConfig;
use sitequote_db::models::enums::UserRole;
use sitequote_db::models::user::CreateUser;
use sitequote_db::repositories::UserRepo;

/// JWT secret shared by the test app and test token generation.
const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Password used for all seeded test users.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 30,
        },
        rate_card: RateCardConfig::default(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors `main.rs` via [`build_app_router`].
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Create a user directly through the repository and return `(id, token)`.
pub async fn seed_user(pool: &PgPool, username: &str, role: UserRole) -> (i64, String) {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: TEST_PASSWORD.to_string(),
        role: Some(role),
    };
    let hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let user = UserRepo::create(pool, &input, &hash)
        .await
        .expect("user creation should succeed");

    let role_name = match role {
        UserRole::Admin => "admin",
        UserRole::User => "user",
    };
    let token = generate_access_token(user.id, role_name, &test_config().jwt)
        .expect("token generation should succeed");

    (user.id, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("request should not fail")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(json), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    json: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(json), Some(token)).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(json), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    json: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(json), Some(token)).await
}

pub async fn put_empty_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::PUT, uri, None, Some(token)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None, None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, None, Some(token)).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert a status and return the parsed body for further checks.
pub async fn expect_status(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
