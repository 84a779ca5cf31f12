//! Handlers for `/admin`: extended statistics and advanced project search.
//!
//! All endpoints require the `admin` role via [`AdminUser`].

use axum::extract::{Query, State};
use axum::Json;
use sitequote_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use sitequote_db::models::dashboard::{
    AdminDashboardStats, AdminProjectSummary, AdvancedProjectFilters,
};
use sitequote_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::AdminUser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// GET /api/v1/admin/dashboard/stats
pub async fn stats(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<AdminDashboardStats>> {
    let stats = DashboardRepo::admin_stats(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /api/v1/admin/projects
///
/// Advanced filtered project summaries with per-category cost rollups.
pub async fn projects(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(filters): Query<AdvancedProjectFilters>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Vec<AdminProjectSummary>>> {
    let limit = clamp_limit(page.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(page.skip);
    let summaries = DashboardRepo::admin_projects(&state.pool, &filters, limit, offset).await?;
    Ok(Json(summaries))
}
