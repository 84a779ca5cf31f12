//! HTTP-level integration tests for projects, components, and rollups.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, expect_status, get, post_json, put_json, seed_user};
use sitequote_db::models::enums::UserRole;
use sqlx::PgPool;

async fn create_project(pool: &PgPool, manager_id: i64, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            "/api/v1/projects",
            serde_json::json!({ "name": name, "manager_id": manager_id }),
        )
        .await,
    )
    .await;
    json["id"].as_i64().unwrap()
}

async fn create_material(pool: &PgPool, part: &str, cost: f64) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            "/api/v1/materials",
            serde_json::json!({
                "sales_part_no": part,
                "description": "part",
                "state_code": "NSW",
                "unit_cost": cost
            }),
        )
        .await,
    )
    .await;
    json["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_create_defaults_and_detail_shape(pool: PgPool) {
    let (manager_id, _) = seed_user(&pool, "manager", UserRole::User).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/projects",
        serde_json::json!({ "name": "Depot Upgrade", "manager_id": manager_id }),
    )
    .await;
    let created = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(created["status"], "planning");
    assert_eq!(created["priority"], "medium");
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let detail = body_json(get(app, &format!("/api/v1/projects/{id}")).await).await;
    assert_eq!(detail["name"], "Depot Upgrade");
    assert!(detail["materials"].as_array().unwrap().is_empty());
    assert!(detail["labor"].as_array().unwrap().is_empty());
    assert!(detail["tasks"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_unknown_manager_returns_422(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        serde_json::json!({ "name": "Orphan", "manager_id": 999999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_invalid_progress_returns_422(pool: PgPool) {
    let (manager_id, _) = seed_user(&pool, "manager", UserRole::User).await;
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        serde_json::json!({ "name": "Bad", "manager_id": manager_id, "progress": 150 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attach_material_snapshots_catalog_price(pool: PgPool) {
    let (manager_id, _) = seed_user(&pool, "manager", UserRole::User).await;
    let project_id = create_project(&pool, manager_id, "Snapshot").await;
    let material_id = create_material(&pool, "PIPE-90", 15.0).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/materials"),
        serde_json::json!({ "material_id": material_id, "quantity": 4 }),
    )
    .await;
    let row = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(row["unit_price"], 15.0);
    assert_eq!(row["total_price"], 60.0);

    // Catalog price moves; the snapshot must not.
    let app = common::build_test_app(pool.clone());
    put_json(
        app,
        &format!("/api/v1/materials/{material_id}"),
        serde_json::json!({ "unit_cost": 99.0 }),
    )
    .await;

    let app = common::build_test_app(pool);
    let totals = body_json(get(app, &format!("/api/v1/projects/{project_id}/totals")).await).await;
    assert_eq!(totals["materials"], 60.0);
    assert_eq!(totals["grand_total"], 60.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attach_labor_resolves_rate(pool: PgPool) {
    let (manager_id, _) = seed_user(&pool, "manager", UserRole::User).await;
    let project_id = create_project(&pool, manager_id, "Labour").await;

    let app = common::build_test_app(pool.clone());
    let rate = body_json(
        post_json(
            app,
            "/api/v1/labour-rates",
            serde_json::json!({
                "labour_type": "electrician",
                "cost_per_person": 50.0,
                "state_code": "NSW"
            }),
        )
        .await,
    )
    .await;
    let rate_id = rate["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/labor"),
        serde_json::json!({ "labour_rate_id": rate_id, "persons": 2, "hours": 8 }),
    )
    .await;
    let row = expect_status(response, StatusCode::CREATED).await;
    // 2 persons x 8 hours x 50.0
    assert_eq!(row["unit_rate"], 50.0);
    assert_eq!(row["total_cost"], 800.0);

    let app = common::build_test_app(pool);
    let totals = body_json(get(app, &format!("/api/v1/projects/{project_id}/totals")).await).await;
    assert_eq!(totals["labour"], 800.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attach_labor_with_unknown_rate_returns_404(pool: PgPool) {
    let (manager_id, _) = seed_user(&pool, "manager", UserRole::User).await;
    let project_id = create_project(&pool, manager_id, "NoRate").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/labor"),
        serde_json::json!({ "labour_rate_id": 999999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn totals_on_empty_project_are_zero(pool: PgPool) {
    let (manager_id, _) = seed_user(&pool, "manager", UserRole::User).await;
    let project_id = create_project(&pool, manager_id, "Empty").await;

    let app = common::build_test_app(pool);
    let totals = body_json(get(app, &format!("/api/v1/projects/{project_id}/totals")).await).await;
    assert_eq!(totals["materials"], 0.0);
    assert_eq!(totals["equipment"], 0.0);
    assert_eq!(totals["labour"], 0.0);
    assert_eq!(totals["external"], 0.0);
    assert_eq!(totals["grand_total"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_project_cascades_and_404s(pool: PgPool) {
    let (manager_id, _) = seed_user(&pool, "manager", UserRole::User).await;
    let project_id = create_project(&pool, manager_id, "Doomed").await;
    let material_id = create_material(&pool, "MAT-1", 10.0).await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &format!("/api/v1/projects/{project_id}/materials"),
        serde_json::json!({ "material_id": material_id }),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/projects/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/projects/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again is 404, never a silent success.
    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/projects/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recent_projects_returns_newest_first(pool: PgPool) {
    let (manager_id, _) = seed_user(&pool, "manager", UserRole::User).await;
    for name in ["one", "two", "three"] {
        create_project(&pool, manager_id, name).await;
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/projects/recent?limit=2").await).await;
    let projects = json.as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["name"], "three");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_deletion_is_audited(pool: PgPool) {
    let (manager_id, _) = seed_user(&pool, "manager", UserRole::User).await;
    let project_id = create_project(&pool, manager_id, "Audited").await;

    let app = common::build_test_app(pool.clone());
    delete(app, &format!("/api/v1/projects/{project_id}")).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/audit-logs?entity_type=project").await).await;
    let actions: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["action"].as_str().unwrap().to_string())
        .collect();
    assert!(actions.contains(&"project.created".to_string()));
    assert!(actions.contains(&"project.deleted".to_string()));
}
