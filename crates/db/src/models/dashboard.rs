//! Dashboard statistics models, computed by aggregate queries.

use serde::{Deserialize, Serialize};
use sitequote_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::enums::{ProjectPriority, ProjectStatus};

/// Aggregate counters for `GET /dashboard/stats`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardStats {
    pub total_projects: i64,
    pub active_projects: i64,
    pub completed_projects: i64,
    pub total_budget: f64,
    pub total_spent: f64,
    pub total_materials: i64,
    pub total_equipment: i64,
    pub total_labour_rates: i64,
    pub unread_notifications: i64,
}

/// Extended counters for `GET /admin/dashboard/stats`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminDashboardStats {
    pub total_projects: i64,
    pub active_projects: i64,
    pub completed_projects: i64,
    pub pending_projects: i64,
    pub cancelled_projects: i64,
    pub total_budget: f64,
    pub total_spent: f64,
    /// Spend as a percentage of budget; 0 when there is no budget.
    pub budget_utilization: f64,
    pub total_materials: i64,
    pub total_equipment: i64,
    pub total_labour_rates: i64,
    pub total_quotes: i64,
    pub unread_notifications: i64,
}

/// A project summary row for the admin listing, with per-category rollups.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminProjectSummary {
    pub id: DbId,
    pub name: String,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub budget: f64,
    pub actual_cost: f64,
    pub progress: i32,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub manager_name: String,
    pub total_materials: f64,
    pub total_equipment: f64,
    pub total_labor: f64,
    pub total_external: f64,
    pub grand_total: f64,
}

/// Advanced project search filters, used by `GET /search/projects` and
/// `GET /admin/projects`. Unset filters impose no constraint; ranges are
/// inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvancedProjectFilters {
    pub search: Option<String>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<ProjectPriority>,
    pub manager_id: Option<DbId>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub sor_type: Option<String>,
    pub sor_code: Option<String>,
    pub start_date_from: Option<Timestamp>,
    pub start_date_to: Option<Timestamp>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub progress_min: Option<i32>,
    pub progress_max: Option<i32>,
}
