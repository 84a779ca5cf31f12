//! Handlers for the `/search` surfaces.
//!
//! All search endpoints take GET query parameters; unset filters impose no
//! constraint, so a bare request is equivalent to a plain listing.

use axum::extract::{Query, State};
use axum::Json;
use sitequote_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use sitequote_db::models::dashboard::AdvancedProjectFilters;
use sitequote_db::models::equipment::{Equipment, EquipmentFilters};
use sitequote_db::models::material::{Material, MaterialFilters};
use sitequote_db::models::project::Project;
use sitequote_db::repositories::{EquipmentRepo, MaterialRepo, ProjectRepo};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::state::AppState;

/// GET /api/v1/search/projects
pub async fn projects(
    State(state): State<AppState>,
    Query(filters): Query<AdvancedProjectFilters>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Vec<Project>>> {
    let limit = clamp_limit(page.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(page.skip);
    let hits = ProjectRepo::search_advanced(&state.pool, &filters, limit, offset).await?;
    Ok(Json(hits))
}

/// GET /api/v1/search/materials
pub async fn materials(
    State(state): State<AppState>,
    Query(filters): Query<MaterialFilters>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Vec<Material>>> {
    let limit = clamp_limit(page.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(page.skip);
    let hits = MaterialRepo::search(&state.pool, &filters, limit, offset).await?;
    Ok(Json(hits))
}

/// GET /api/v1/search/equipment
pub async fn equipment(
    State(state): State<AppState>,
    Query(filters): Query<EquipmentFilters>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Vec<Equipment>>> {
    let limit = clamp_limit(page.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(page.skip);
    let hits = EquipmentRepo::search(&state.pool, &filters, limit, offset).await?;
    Ok(Json(hits))
}
