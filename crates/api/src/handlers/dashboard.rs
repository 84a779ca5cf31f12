//! Handlers for `/dashboard`.

use axum::extract::State;
use axum::Json;
use sitequote_db::models::dashboard::DashboardStats;
use sitequote_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/dashboard/stats
///
/// Headline counters, computed by a single aggregate query.
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let stats = DashboardRepo::stats(&state.pool).await?;
    Ok(Json(stats))
}
