//! HTTP-level integration tests for the rate-card calculator.

mod common;

use axum::http::StatusCode;
use common::{expect_status, post_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn rate_card_standard_calculation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/calculator/rate-card",
        serde_json::json!({
            "client_name": "Acme",
            "region": "Sydney Metro",
            "product_sor": "SOR-001",
            "sor_code": "SOR-001",
            "risk_uplift": 10.0,
            "additional_support": ["traffic control", "after hours"]
        }),
    )
    .await;

    let json = expect_status(response, StatusCode::OK).await;
    // (1000 + 2x100) x 1.10 = 1320, + 10% tax = 1452.
    assert_eq!(json["base_amount"], 1000.0);
    assert_eq!(json["support_amount"], 200.0);
    assert_eq!(json["subtotal"], 1320.0);
    assert_eq!(json["total_amount"], 1452.0);
    assert_eq!(json["breakdown"]["tax_amount"], 132.0);
    assert_eq!(json["breakdown"]["risk_multiplier"], 1.1);
    assert_eq!(json["breakdown"]["sor_code"], "SOR-001");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rate_card_defaults_apply_without_uplift_or_support(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/calculator/rate-card",
        serde_json::json!({
            "client_name": "Acme",
            "region": "Regional VIC",
            "product_sor": "SOR-002"
        }),
    )
    .await;

    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["subtotal"], 1000.0);
    assert_eq!(json["total_amount"], 1100.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rate_card_rejects_out_of_range_uplift(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/calculator/rate-card",
        serde_json::json!({
            "client_name": "Acme",
            "region": "Sydney Metro",
            "product_sor": "SOR-001",
            "risk_uplift": 250.0
        }),
    )
    .await;

    let json = expect_status(response, StatusCode::UNPROCESSABLE_ENTITY).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
