//! Integration tests for the error envelope: every failure mode returns the
//! `{ "error": ..., "code": ... }` JSON shape with the right status.

mod common;

use axum::http::StatusCode;
use common::{expect_status, get, post_json, seed_user};
use sitequote_db::models::enums::UserRole;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn not_found_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/projects/424242").await;

    let json = expect_status(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].as_str().unwrap().contains("424242"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn validation_envelope(pool: PgPool) {
    let (manager_id, _) = seed_user(&pool, "manager", UserRole::User).await;
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        serde_json::json!({ "name": "Bad", "manager_id": manager_id, "progress": -1 }),
    )
    .await;

    let json = expect_status(response, StatusCode::UNPROCESSABLE_ENTITY).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("progress"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn conflict_envelope_names_the_constraint(pool: PgPool) {
    let body = serde_json::json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "long-enough-password"
    });

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/users", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/users", body).await;
    let json = expect_status(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("uq_users_"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_enum_value_is_a_client_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    // "galactic" is not a project status.
    let response = get(app, "/api/v1/projects?status=galactic").await;
    assert!(
        response.status().is_client_error(),
        "bad enum value must not be a server error"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_json_body_is_a_client_error(pool: PgPool) {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/materials")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}
