//! Handlers for the `/audit-logs` and `/price-changes` read surfaces.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use sitequote_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use sitequote_core::types::DbId;
use sitequote_db::models::audit::{AuditLog, PriceChangeLog};
use sitequote_db::repositories::{AuditLogRepo, PriceChangeLogRepo};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::state::AppState;

/// Query parameters for `GET /audit-logs`.
#[derive(Debug, Deserialize)]
pub struct AuditLogQuery {
    pub user_id: Option<DbId>,
    pub entity_type: Option<String>,
}

/// Query parameters for `GET /price-changes`.
#[derive(Debug, Deserialize)]
pub struct PriceChangeQuery {
    pub entity_type: Option<String>,
}

/// GET /api/v1/audit-logs
pub async fn list_audit_logs(
    State(state): State<AppState>,
    Query(params): Query<AuditLogQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Vec<AuditLog>>> {
    let limit = clamp_limit(page.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(page.skip);
    let logs = AuditLogRepo::list(
        &state.pool,
        params.user_id,
        params.entity_type.as_deref(),
        limit,
        offset,
    )
    .await?;
    Ok(Json(logs))
}

/// GET /api/v1/price-changes
pub async fn list_price_changes(
    State(state): State<AppState>,
    Query(params): Query<PriceChangeQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Vec<PriceChangeLog>>> {
    let limit = clamp_limit(page.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(page.skip);
    let changes = PriceChangeLogRepo::list(
        &state.pool,
        params.entity_type.as_deref(),
        limit,
        offset,
    )
    .await?;
    Ok(Json(changes))
}
