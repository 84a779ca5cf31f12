//! Integration tests for filtered search and the statistics aggregates.

use sqlx::PgPool;

use sitequote_db::models::dashboard::AdvancedProjectFilters;
use sitequote_db::models::enums::{ProjectStatus, StateCode};
use sitequote_db::models::equipment::{CreateEquipment, EquipmentFilters};
use sitequote_db::models::material::{CreateMaterial, MaterialFilters};
use sitequote_db::models::project::{CreateProject, ProjectFilters};
use sitequote_db::models::user::CreateUser;
use sitequote_db::repositories::{
    DashboardRepo, EquipmentRepo, MaterialRepo, ProjectRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: "irrelevant".to_string(),
        role: None,
    };
    UserRepo::create(pool, &input, "hash").await.unwrap().id
}

fn new_material(part_no: &str, description: &str, state: StateCode, cost: f64) -> CreateMaterial {
    CreateMaterial {
        sales_part_no: part_no.to_string(),
        description: description.to_string(),
        name: None,
        state_code: state,
        qty: None,
        unit_cost: cost,
        image_url: None,
        sor_code: None,
    }
}

fn new_equipment(part_no: &str, name: &str, category: &str, price: f64) -> CreateEquipment {
    CreateEquipment {
        sales_part_no: part_no.to_string(),
        equipment_name: name.to_string(),
        category: category.to_string(),
        state_code: StateCode::Nsw,
        price,
        price_incl_tax: price * 1.1,
        sor_code: None,
    }
}

async fn seed_materials(pool: &PgPool) {
    for (part, desc, state, cost) in [
        ("PIPE-90", "90mm PVC pipe", StateCode::Nsw, 15.0),
        ("PIPE-50", "50mm PVC pipe", StateCode::Vic, 8.0),
        ("CABLE-16", "16mm copper cable", StateCode::Nsw, 4.0),
    ] {
        MaterialRepo::create(pool, &new_material(part, desc, state, cost))
            .await
            .unwrap();
    }
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn no_filters_is_plain_listing(pool: PgPool) {
    seed_materials(&pool).await;

    let all = MaterialRepo::search(&pool, &MaterialFilters::default(), 100, 0)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn term_matches_part_number_and_description_case_insensitively(pool: PgPool) {
    seed_materials(&pool).await;

    let filters = MaterialFilters {
        search: Some("pipe".to_string()),
        ..Default::default()
    };
    let hits = MaterialRepo::search(&pool, &filters, 100, 0).await.unwrap();
    assert_eq!(hits.len(), 2);

    let filters = MaterialFilters {
        search: Some("COPPER".to_string()),
        ..Default::default()
    };
    let hits = MaterialRepo::search(&pool, &filters, 100, 0).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].sales_part_no, "CABLE-16");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn price_range_bounds_are_inclusive(pool: PgPool) {
    seed_materials(&pool).await;

    let filters = MaterialFilters {
        min_price: Some(4.0),
        max_price: Some(8.0),
        ..Default::default()
    };
    let hits = MaterialRepo::search(&pool, &filters, 100, 0).await.unwrap();

    let parts: Vec<_> = hits.iter().map(|m| m.sales_part_no.as_str()).collect();
    assert_eq!(hits.len(), 2);
    assert!(parts.contains(&"PIPE-50"));
    assert!(parts.contains(&"CABLE-16"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filters_combine_with_and_semantics(pool: PgPool) {
    seed_materials(&pool).await;

    let filters = MaterialFilters {
        search: Some("pipe".to_string()),
        state_code: Some(StateCode::Nsw),
        ..Default::default()
    };
    let hits = MaterialRepo::search(&pool, &filters, 100, 0).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].sales_part_no, "PIPE-90");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ilike_wildcards_in_terms_are_literal(pool: PgPool) {
    seed_materials(&pool).await;

    // "%" must not act as a wildcard.
    let filters = MaterialFilters {
        search: Some("%".to_string()),
        ..Default::default()
    };
    let hits = MaterialRepo::search(&pool, &filters, 100, 0).await.unwrap();
    assert!(hits.is_empty());
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn equipment_category_filter(pool: PgPool) {
    for (part, name, category, price) in [
        ("EXC-20", "20t excavator", "earthmoving", 1500.0),
        ("EXC-05", "5t excavator", "earthmoving", 600.0),
        ("GEN-10", "10kVA generator", "power", 200.0),
    ] {
        EquipmentRepo::create(&pool, &new_equipment(part, name, category, price))
            .await
            .unwrap();
    }

    let filters = EquipmentFilters {
        category: Some("earthmoving".to_string()),
        max_price: Some(600.0),
        ..Default::default()
    };
    let hits = EquipmentRepo::search(&pool, &filters, 100, 0).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].sales_part_no, "EXC-05");
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_list_filters_by_status_and_term(pool: PgPool) {
    let manager_id = seed_user(&pool, "manager").await;
    for (name, status) in [
        ("Depot refurbishment", Some(ProjectStatus::InProgress)),
        ("Depot demolition", Some(ProjectStatus::Completed)),
        ("Fence install", Some(ProjectStatus::InProgress)),
    ] {
        let input = CreateProject {
            name: name.to_string(),
            description: None,
            sor_code: None,
            sor_description: None,
            sor_type: None,
            category: None,
            region: None,
            manager_id,
            status,
            priority: None,
            budget: None,
            actual_cost: None,
            progress: None,
            start_date: None,
            end_date: None,
        };
        ProjectRepo::create(&pool, &input).await.unwrap();
    }

    let filters = ProjectFilters {
        search: Some("depot".to_string()),
        status: Some(ProjectStatus::InProgress),
        ..Default::default()
    };
    let hits = ProjectRepo::list(&pool, &filters, 100, 0).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Depot refurbishment");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_projects_carry_rollups_and_budget_range(pool: PgPool) {
    let manager_id = seed_user(&pool, "manager").await;

    let mut cheap = CreateProject {
        name: "Small job".to_string(),
        description: None,
        sor_code: None,
        sor_description: None,
        sor_type: None,
        category: None,
        region: None,
        manager_id,
        status: None,
        priority: None,
        budget: Some(1000.0),
        actual_cost: None,
        progress: None,
        start_date: None,
        end_date: None,
    };
    ProjectRepo::create(&pool, &cheap).await.unwrap();

    cheap.name = "Big job".to_string();
    cheap.budget = Some(50_000.0);
    ProjectRepo::create(&pool, &cheap).await.unwrap();

    let filters = AdvancedProjectFilters {
        budget_min: Some(10_000.0),
        ..Default::default()
    };
    let hits = DashboardRepo::admin_projects(&pool, &filters, 100, 0)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Big job");
    assert_eq!(hits[0].manager_name, "manager");
    assert_eq!(hits[0].grand_total, 0.0);
}

// ---------------------------------------------------------------------------
// Dashboard stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_count_entities_and_sums(pool: PgPool) {
    let manager_id = seed_user(&pool, "manager").await;
    seed_materials(&pool).await;

    for (status, budget, actual) in [
        (ProjectStatus::InProgress, 10_000.0, 2_500.0),
        (ProjectStatus::Completed, 5_000.0, 5_000.0),
    ] {
        let input = CreateProject {
            name: format!("{status:?}"),
            description: None,
            sor_code: None,
            sor_description: None,
            sor_type: None,
            category: None,
            region: None,
            manager_id,
            status: Some(status),
            priority: None,
            budget: Some(budget),
            actual_cost: Some(actual),
            progress: None,
            start_date: None,
            end_date: None,
        };
        ProjectRepo::create(&pool, &input).await.unwrap();
    }

    let stats = DashboardRepo::stats(&pool).await.unwrap();
    assert_eq!(stats.total_projects, 2);
    assert_eq!(stats.active_projects, 1);
    assert_eq!(stats.completed_projects, 1);
    assert_eq!(stats.total_budget, 15_000.0);
    assert_eq!(stats.total_spent, 7_500.0);
    assert_eq!(stats.total_materials, 3);
    assert_eq!(stats.total_equipment, 0);
    assert_eq!(stats.unread_notifications, 0);
}
