//! HTTP-level integration tests for notifications and authentication.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, expect_status, get, get_auth, post_json_auth, put_empty_auth, seed_user,
};
use sitequote_db::models::enums::UserRole;
use sqlx::PgPool;

async fn create_notification(pool: &PgPool, token: &str, user_id: i64, title: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json_auth(
            app,
            "/api/v1/notifications",
            serde_json::json!({
                "user_id": user_id,
                "type": "budget",
                "severity": "high",
                "title": title,
                "message": "over budget"
            }),
            token,
        )
        .await,
    )
    .await;
    json["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notifications_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/notifications").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_token_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications", "not-a-real-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_list_newest_first(pool: PgPool) {
    let (user_id, token) = seed_user(&pool, "dana", UserRole::User).await;

    for title in ["first", "second"] {
        create_notification(&pool, &token, user_id, title).await;
    }

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/notifications", &token).await).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "second");
    assert_eq!(items[0]["type"], "budget");
    assert_eq!(items[0]["is_read"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_is_scoped_to_token_subject(pool: PgPool) {
    let (dana_id, dana_token) = seed_user(&pool, "dana", UserRole::User).await;
    let (_, eve_token) = seed_user(&pool, "eve", UserRole::User).await;

    create_notification(&pool, &dana_token, dana_id, "dana's").await;

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/notifications", &eve_token).await).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_read_flow(pool: PgPool) {
    let (user_id, token) = seed_user(&pool, "dana", UserRole::User).await;
    let id = create_notification(&pool, &token, user_id, "unread").await;

    let app = common::build_test_app(pool.clone());
    let response = put_empty_auth(app, &format!("/api/v1/notifications/{id}/read"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/notifications/unread", &token).await).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_read_of_another_users_notification_is_404(pool: PgPool) {
    let (dana_id, dana_token) = seed_user(&pool, "dana", UserRole::User).await;
    let (_, eve_token) = seed_user(&pool, "eve", UserRole::User).await;
    let id = create_notification(&pool, &dana_token, dana_id, "dana's").await;

    let app = common::build_test_app(pool);
    let response =
        put_empty_auth(app, &format!("/api/v1/notifications/{id}/read"), &eve_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_all_read_is_idempotent(pool: PgPool) {
    let (user_id, token) = seed_user(&pool, "dana", UserRole::User).await;
    for title in ["a", "b", "c"] {
        create_notification(&pool, &token, user_id, title).await;
    }

    let app = common::build_test_app(pool.clone());
    let response = put_empty_auth(app, "/api/v1/notifications/read-all", &token).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["marked_read"], 3);

    let app = common::build_test_app(pool);
    let response = put_empty_auth(app, "/api/v1/notifications/read-all", &token).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["marked_read"], 0);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_issues_usable_token(pool: PgPool) {
    seed_user(&pool, "dana", UserRole::User).await;

    let app = common::build_test_app(pool.clone());
    let response = common::post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": "dana", "password": common::TEST_PASSWORD }),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    let token = json["access_token"].as_str().unwrap().to_string();
    assert_eq!(json["user"]["username"], "dana");
    assert!(json["user"]["password_hash"].is_null());

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_wrong_password_is_401(pool: PgPool) {
    seed_user(&pool, "dana", UserRole::User).await;

    let app = common::build_test_app(pool);
    let response = common::post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": "dana", "password": "wrong" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Admin gating
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_reject_non_admin(pool: PgPool) {
    let (_, user_token) = seed_user(&pool, "dana", UserRole::User).await;
    let (_, admin_token) = seed_user(&pool, "root", UserRole::Admin).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/admin/dashboard/stats", &user_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/dashboard/stats", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
