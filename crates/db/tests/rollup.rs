//! Integration tests for cost rollups, price snapshots, and quote total
//! recomputation.

use sqlx::PgPool;

use sitequote_core::pricing::{labour_total, line_total};
use sitequote_db::models::enums::{QuoteItemType, StateCode};
use sitequote_db::models::labour_rate::CreateLabourRate;
use sitequote_db::models::material::{CreateMaterial, UpdateMaterial};
use sitequote_db::models::project::CreateProject;
use sitequote_db::models::project_component::CreateExternalCost;
use sitequote_db::models::quote::{CreateQuote, CreateQuoteItem, UpdateQuote, UpdateQuoteItem};
use sitequote_db::models::user::CreateUser;
use sitequote_db::repositories::{
    LabourRateRepo, MaterialRepo, ProjectComponentRepo, ProjectRepo, QuoteRepo, UserRepo,
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

async fn seed_project(pool: &PgPool, manager_id: i64) -> i64 {
    let input = CreateProject {
        name: "Rollup Project".to_string(),
        description: None,
        sor_code: None,
        sor_description: None,
        sor_type: None,
        category: None,
        region: None,
        manager_id,
        status: None,
        priority: None,
        budget: None,
        actual_cost: None,
        progress: None,
        start_date: None,
        end_date: None,
    };
    ProjectRepo::create(pool, &input).await.unwrap().id
}

fn new_quote(client: &str) -> CreateQuote {
    CreateQuote {
        quote_number: None,
        client_name: client.to_string(),
        client_email: None,
        client_phone: None,
        client_address: None,
        project_name: "Pump replacement".to_string(),
        project_description: None,
        sor_code: None,
        sor_description: None,
        region: None,
        status: None,
        tax_rate: Some(10.0),
        valid_until: None,
        notes: None,
        items: Vec::new(),
    }
}

fn new_item(name: &str, quantity: i32, unit_price: f64) -> CreateQuoteItem {
    CreateQuoteItem {
        item_type: QuoteItemType::Material,
        item_name: name.to_string(),
        description: None,
        quantity: Some(quantity),
        unit_price,
        sort_order: None,
    }
}

// ---------------------------------------------------------------------------
// Project rollups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn rollup_with_no_components_is_zero(pool: PgPool) {
    let manager_id = seed_user(&pool, "manager").await;
    let project_id = seed_project(&pool, manager_id).await;

    let rollup = ProjectComponentRepo::cost_rollup(&pool, project_id)
        .await
        .unwrap();
    assert_eq!(rollup.materials, 0.0);
    assert_eq!(rollup.equipment, 0.0);
    assert_eq!(rollup.labour, 0.0);
    assert_eq!(rollup.external, 0.0);
    assert_eq!(rollup.grand_total, 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rollup_sums_per_category(pool: PgPool) {
    let manager_id = seed_user(&pool, "manager").await;
    let project_id = seed_project(&pool, manager_id).await;

    let material = MaterialRepo::create(
        &pool,
        &CreateMaterial {
            sales_part_no: "CABLE-16".to_string(),
            description: "16mm cable".to_string(),
            name: None,
            state_code: StateCode::Nsw,
            qty: None,
            unit_cost: 4.0,
            image_url: None,
            sor_code: None,
        },
    )
    .await
    .unwrap();

    // Two material lines: 10 x 4.0 and 5 x 4.0.
    for quantity in [10, 5] {
        let total = line_total(quantity, material.unit_cost);
        ProjectComponentRepo::add_material(
            &pool,
            project_id,
            material.id,
            quantity,
            material.unit_cost,
            total,
        )
        .await
        .unwrap();
    }

    let rate = LabourRateRepo::create(
        &pool,
        &CreateLabourRate {
            labour_type: "electrician".to_string(),
            cost_per_person: 50.0,
            hours: None,
            state_code: StateCode::Nsw,
        },
    )
    .await
    .unwrap();
    let labour = labour_total(2, 8, rate.cost_per_person);
    ProjectComponentRepo::add_labor(
        &pool,
        project_id,
        rate.id,
        2,
        8,
        StateCode::Nsw,
        rate.cost_per_person,
        labour,
    )
    .await
    .unwrap();

    // One enabled and one disabled external cost; only the enabled one counts.
    for (amount, enabled) in [(250.0, true), (999.0, false)] {
        ProjectComponentRepo::add_external_cost(
            &pool,
            project_id,
            &CreateExternalCost {
                cost_type: "crane_fee".to_string(),
                description: None,
                amount,
                percentage: None,
                is_enabled: Some(enabled),
            },
        )
        .await
        .unwrap();
    }

    let rollup = ProjectComponentRepo::cost_rollup(&pool, project_id)
        .await
        .unwrap();
    assert_eq!(rollup.materials, 60.0);
    assert_eq!(rollup.equipment, 0.0);
    assert_eq!(rollup.labour, 800.0);
    assert_eq!(rollup.external, 250.0);
    assert_eq!(rollup.grand_total, 1110.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn snapshot_survives_catalog_price_change(pool: PgPool) {
    let manager_id = seed_user(&pool, "manager").await;
    let project_id = seed_project(&pool, manager_id).await;

    let material = MaterialRepo::create(
        &pool,
        &CreateMaterial {
            sales_part_no: "VALVE-2".to_string(),
            description: "2in valve".to_string(),
            name: None,
            state_code: StateCode::Vic,
            qty: None,
            unit_cost: 30.0,
            image_url: None,
            sor_code: None,
        },
    )
    .await
    .unwrap();

    ProjectComponentRepo::add_material(&pool, project_id, material.id, 3, 30.0, 90.0)
        .await
        .unwrap();

    // The catalog price doubles after attach.
    MaterialRepo::update(
        &pool,
        material.id,
        &UpdateMaterial {
            unit_cost: Some(60.0),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("material should exist");

    let rows = ProjectComponentRepo::list_materials(&pool, project_id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].unit_price, 30.0);
    assert_eq!(rows[0].total_price, 90.0);

    let rollup = ProjectComponentRepo::cost_rollup(&pool, project_id)
        .await
        .unwrap();
    assert_eq!(rollup.materials, 90.0);
}

// ---------------------------------------------------------------------------
// Quote totals
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_with_no_items_has_zero_totals(pool: PgPool) {
    let user_id = seed_user(&pool, "sales").await;
    let detail = QuoteRepo::create(&pool, &new_quote("Acme"), user_id)
        .await
        .unwrap();

    assert!(detail.items.is_empty());
    assert_eq!(detail.quote.subtotal, 0.0);
    assert_eq!(detail.quote.tax_amount, 0.0);
    assert_eq!(detail.quote.total_amount, 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_number_is_generated_per_year(pool: PgPool) {
    let user_id = seed_user(&pool, "sales").await;
    let year = chrono::Utc::now().format("%Y").to_string();

    let first = QuoteRepo::create(&pool, &new_quote("Acme"), user_id)
        .await
        .unwrap();
    let second = QuoteRepo::create(&pool, &new_quote("Bmec"), user_id)
        .await
        .unwrap();

    assert_eq!(first.quote.quote_number, format!("Q-{year}-0001"));
    assert_eq!(second.quote.quote_number, format!("Q-{year}-0002"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_totals_follow_item_mutations(pool: PgPool) {
    let user_id = seed_user(&pool, "sales").await;
    let mut input = new_quote("Acme");
    input.items = vec![new_item("Pump", 2, 100.0)];
    let detail = QuoteRepo::create(&pool, &input, user_id).await.unwrap();
    let quote_id = detail.quote.id;

    // 2 x 100 at 10% tax.
    assert_eq!(detail.quote.subtotal, 200.0);
    assert_eq!(detail.quote.tax_amount, 20.0);
    assert_eq!(detail.quote.total_amount, 220.0);

    // Adding an item re-derives totals.
    let added = QuoteRepo::add_item(&pool, quote_id, &new_item("Fittings", 4, 25.0))
        .await
        .unwrap()
        .expect("quote should exist");
    assert_eq!(added.total_price, 100.0);

    let quote = QuoteRepo::find_by_id(&pool, quote_id).await.unwrap().unwrap();
    assert_eq!(quote.subtotal, 300.0);
    assert_eq!(quote.total_amount, 330.0);

    // Updating quantity re-derives the line and the quote.
    let updated = QuoteRepo::update_item(
        &pool,
        quote_id,
        added.id,
        &UpdateQuoteItem {
            quantity: Some(8),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("item should exist");
    assert_eq!(updated.total_price, 200.0);

    let quote = QuoteRepo::find_by_id(&pool, quote_id).await.unwrap().unwrap();
    assert_eq!(quote.subtotal, 400.0);
    assert_eq!(quote.tax_amount, 40.0);

    // Deleting the item drops it from the totals.
    assert!(QuoteRepo::delete_item(&pool, quote_id, added.id)
        .await
        .unwrap());
    let quote = QuoteRepo::find_by_id(&pool, quote_id).await.unwrap().unwrap();
    assert_eq!(quote.subtotal, 200.0);
    assert_eq!(quote.total_amount, 220.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_tax_rate_change_recomputes_totals(pool: PgPool) {
    let user_id = seed_user(&pool, "sales").await;
    let mut input = new_quote("Acme");
    input.items = vec![new_item("Pump", 1, 1000.0)];
    let detail = QuoteRepo::create(&pool, &input, user_id).await.unwrap();

    let updated = QuoteRepo::update(
        &pool,
        detail.quote.id,
        &UpdateQuote {
            tax_rate: Some(20.0),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("quote should exist");

    assert_eq!(updated.subtotal, 1000.0);
    assert_eq!(updated.tax_amount, 200.0);
    assert_eq!(updated.total_amount, 1200.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quote_item_on_missing_quote_is_none(pool: PgPool) {
    let result = QuoteRepo::add_item(&pool, 987_654, &new_item("Ghost", 1, 1.0))
        .await
        .unwrap();
    assert!(result.is_none());
}
