//! Repository for dashboard and admin statistics.
//!
//! Each statistics endpoint is backed by a single aggregate query; there is
//! no materialisation or caching.

use sitequote_core::search::ilike_pattern;
use sqlx::PgPool;

use crate::models::dashboard::{
    AdminDashboardStats, AdminProjectSummary, AdvancedProjectFilters, DashboardStats,
};

/// Provides aggregate statistics queries.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Headline counters for the main dashboard.
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            "SELECT
                (SELECT COUNT(*) FROM projects) AS total_projects,
                (SELECT COUNT(*) FROM projects WHERE status = 'in_progress')
                    AS active_projects,
                (SELECT COUNT(*) FROM projects WHERE status = 'completed')
                    AS completed_projects,
                COALESCE((SELECT SUM(budget) FROM projects), 0) AS total_budget,
                COALESCE((SELECT SUM(actual_cost) FROM projects), 0) AS total_spent,
                (SELECT COUNT(*) FROM materials) AS total_materials,
                (SELECT COUNT(*) FROM equipment) AS total_equipment,
                (SELECT COUNT(*) FROM labour_rates) AS total_labour_rates,
                (SELECT COUNT(*) FROM notifications WHERE is_read = FALSE)
                    AS unread_notifications",
        )
        .fetch_one(pool)
        .await
    }

    /// Extended counters for the admin dashboard.
    pub async fn admin_stats(pool: &PgPool) -> Result<AdminDashboardStats, sqlx::Error> {
        sqlx::query_as::<_, AdminDashboardStats>(
            "SELECT
                (SELECT COUNT(*) FROM projects) AS total_projects,
                (SELECT COUNT(*) FROM projects WHERE status = 'in_progress')
                    AS active_projects,
                (SELECT COUNT(*) FROM projects WHERE status = 'completed')
                    AS completed_projects,
                (SELECT COUNT(*) FROM projects WHERE status IN ('planning', 'on_hold'))
                    AS pending_projects,
                (SELECT COUNT(*) FROM projects WHERE status = 'cancelled')
                    AS cancelled_projects,
                COALESCE((SELECT SUM(budget) FROM projects), 0) AS total_budget,
                COALESCE((SELECT SUM(actual_cost) FROM projects), 0) AS total_spent,
                CASE WHEN COALESCE((SELECT SUM(budget) FROM projects), 0) > 0
                     THEN COALESCE((SELECT SUM(actual_cost) FROM projects), 0)
                          / (SELECT SUM(budget) FROM projects) * 100
                     ELSE 0
                END AS budget_utilization,
                (SELECT COUNT(*) FROM materials) AS total_materials,
                (SELECT COUNT(*) FROM equipment) AS total_equipment,
                (SELECT COUNT(*) FROM labour_rates) AS total_labour_rates,
                (SELECT COUNT(*) FROM quotes) AS total_quotes,
                (SELECT COUNT(*) FROM notifications WHERE is_read = FALSE)
                    AS unread_notifications",
        )
        .fetch_one(pool)
        .await
    }

    /// Project summaries with per-category rollups for the admin listing.
    ///
    /// All filters are optional and ANDed; the search term matches name,
    /// description, category, and SOR code case-insensitively. Date, budget,
    /// and progress ranges are inclusive.
    pub async fn admin_projects(
        pool: &PgPool,
        filters: &AdvancedProjectFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AdminProjectSummary>, sqlx::Error> {
        sqlx::query_as::<_, AdminProjectSummary>(
            "SELECT t.*,
                    t.total_materials + t.total_equipment + t.total_labor + t.total_external
                        AS grand_total
             FROM (
                SELECT p.id, p.name, p.status, p.priority, p.budget, p.actual_cost,
                       p.progress, p.start_date, p.end_date, p.created_at,
                       u.username AS manager_name,
                       COALESCE((SELECT SUM(total_price) FROM project_materials
                                 WHERE project_id = p.id), 0) AS total_materials,
                       COALESCE((SELECT SUM(total_price) FROM project_equipment
                                 WHERE project_id = p.id), 0) AS total_equipment,
                       COALESCE((SELECT SUM(total_cost) FROM project_labor
                                 WHERE project_id = p.id), 0) AS total_labor,
                       COALESCE((SELECT SUM(amount) FROM project_external_costs
                                 WHERE project_id = p.id AND is_enabled), 0) AS total_external
                FROM projects p
                JOIN users u ON u.id = p.manager_id
                WHERE ($1::text IS NULL
                       OR p.name ILIKE $1 OR p.description ILIKE $1
                       OR p.category ILIKE $1 OR p.sor_code ILIKE $1)
                  AND ($2::project_status IS NULL OR p.status = $2)
                  AND ($3::project_priority IS NULL OR p.priority = $3)
                  AND ($4::bigint IS NULL OR p.manager_id = $4)
                  AND ($5::text IS NULL OR p.category = $5)
                  AND ($6::text IS NULL OR p.region = $6)
                  AND ($7::text IS NULL OR p.sor_type = $7)
                  AND ($8::text IS NULL OR p.sor_code = $8)
                  AND ($9::timestamptz IS NULL OR p.start_date >= $9)
                  AND ($10::timestamptz IS NULL OR p.start_date <= $10)
                  AND ($11::float8 IS NULL OR p.budget >= $11)
                  AND ($12::float8 IS NULL OR p.budget <= $12)
                  AND ($13::int IS NULL OR p.progress >= $13)
                  AND ($14::int IS NULL OR p.progress <= $14)
             ) t
             ORDER BY t.created_at DESC, t.id DESC
             LIMIT $15 OFFSET $16",
        )
        .bind(filters.search.as_deref().map(ilike_pattern))
        .bind(filters.status)
        .bind(filters.priority)
        .bind(filters.manager_id)
        .bind(&filters.category)
        .bind(&filters.region)
        .bind(&filters.sor_type)
        .bind(&filters.sor_code)
        .bind(filters.start_date_from)
        .bind(filters.start_date_to)
        .bind(filters.budget_min)
        .bind(filters.budget_max)
        .bind(filters.progress_min)
        .bind(filters.progress_max)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}
