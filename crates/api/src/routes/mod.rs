pub mod admin;
pub mod equipment;
pub mod health;
pub mod labour_rate;
pub mod material;
pub mod notification;
pub mod project;
pub mod quote;
pub mod system_config;
pub mod user;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
///
/// /users                                           list, create
/// /users/{id}                                      get, update (admin)
///
/// /projects                                        list, create
/// /projects/recent                                 recent projects
/// /projects/{id}                                   get (detail), update, delete
/// /projects/{id}/totals                            category cost rollup
/// /projects/{id}/materials[/{component_id}]        list, attach, detach
/// /projects/{id}/equipment[/{component_id}]        list, attach, detach
/// /projects/{id}/labor[/{component_id}]            list, attach, detach
/// /projects/{id}/tasks[/{task_id}]                 list, create, update, delete
/// /projects/{id}/external-costs[/{cost_id}]        list, attach, detach
///
/// /materials                                       list/search, create
/// /materials/{id}                                  get, update, delete
///
/// /equipment                                       list/search, create
/// /equipment/{id}                                  get, update, delete
///
/// /labour-rates                                    list (?state_code), create
/// /labour-rates/rate/{labour_type}/{state_code}    effective rate lookup
/// /labour-rates/{id}                               get, update, delete
///
/// /quotes                                          list/search, create (auth)
/// /quotes/{id}                                     get (with items), update, delete (auth)
/// /quotes/{id}/items                               list, add (auth)
/// /quotes/{id}/items/{item_id}                     update, delete (auth)
///
/// /notifications                                   list, create (auth)
/// /notifications/unread                            unread list (auth)
/// /notifications/read-all                          mark all read (auth)
/// /notifications/{id}/read                         mark one read (auth)
///
/// /dashboard/stats                                 headline statistics
/// /admin/dashboard/stats                           extended statistics (admin)
/// /admin/projects                                  advanced search + rollups (admin)
///
/// /audit-logs                                      audit trail (?user_id, entity_type)
/// /price-changes                                   price change log (?entity_type)
///
/// /config                                          list, create
/// /config/{key}                                    get, update
///
/// /calculator/rate-card                            rate-card calculation (POST)
///
/// /search/projects                                 advanced project search
/// /search/materials                                material search
/// /search/equipment                                equipment search
///
/// /bulk/import                                     bulk import (admin, POST)
/// /bulk/export                                     bulk export (admin, POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication.
        .route("/auth/login", post(handlers::auth::login))
        // Users.
        .nest("/users", user::router())
        // Projects and their component sub-resources.
        .nest("/projects", project::router())
        // Catalog resources.
        .nest("/materials", material::router())
        .nest("/equipment", equipment::router())
        .nest("/labour-rates", labour_rate::router())
        // Quotes and items.
        .nest("/quotes", quote::router())
        // Notifications (auth required).
        .nest("/notifications", notification::router())
        // Dashboard statistics.
        .route("/dashboard/stats", get(handlers::dashboard::stats))
        // Admin surfaces.
        .nest("/admin", admin::router())
        // Audit trail and price changes.
        .route("/audit-logs", get(handlers::audit::list_audit_logs))
        .route("/price-changes", get(handlers::audit::list_price_changes))
        // System configuration.
        .nest("/config", system_config::router())
        // Rate-card calculator.
        .route("/calculator/rate-card", post(handlers::calculator::rate_card))
        // Search surfaces (GET query parameters only).
        .route("/search/projects", get(handlers::search::projects))
        .route("/search/materials", get(handlers::search::materials))
        .route("/search/equipment", get(handlers::search::equipment))
        // Bulk operations (admin).
        .route("/bulk/import", post(handlers::bulk::import))
        .route("/bulk/export", post(handlers::bulk::export))
}
