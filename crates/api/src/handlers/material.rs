//! Handlers for the `/materials` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sitequote_core::error::CoreError;
use sitequote_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use sitequote_core::types::DbId;
use sitequote_db::models::material::{CreateMaterial, Material, MaterialFilters, UpdateMaterial};
use sitequote_db::repositories::{MaterialRepo, PriceChangeLogRepo};

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::state::AppState;

/// GET /api/v1/materials
///
/// Search/list with optional filters; no filters means a plain listing.
pub async fn list(
    State(state): State<AppState>,
    Query(filters): Query<MaterialFilters>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Vec<Material>>> {
    let limit = clamp_limit(page.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(page.skip);
    let materials = MaterialRepo::search(&state.pool, &filters, limit, offset).await?;
    Ok(Json(materials))
}

/// GET /api/v1/materials/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Material>> {
    let material = MaterialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))?;
    Ok(Json(material))
}

/// POST /api/v1/materials
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMaterial>,
) -> AppResult<(StatusCode, Json<Material>)> {
    if input.unit_cost <= 0.0 {
        return Err(positive_price_error("unit_cost"));
    }
    if input.qty.is_some_and(|q| q <= 0) {
        return Err(AppError::Core(CoreError::Validation(
            "qty must be positive".into(),
        )));
    }
    let material = MaterialRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

/// PUT /api/v1/materials/{id}
///
/// A change to `unit_cost` is appended to the price change log.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMaterial>,
) -> AppResult<Json<Material>> {
    if input.unit_cost.is_some_and(|c| c <= 0.0) {
        return Err(positive_price_error("unit_cost"));
    }

    let before = MaterialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))?;

    let material = MaterialRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))?;

    if material.unit_cost != before.unit_cost {
        let name = material.name.as_deref().unwrap_or(&material.sales_part_no);
        if let Err(e) = PriceChangeLogRepo::record(
            &state.pool,
            "material",
            id,
            name,
            before.unit_cost,
            material.unit_cost,
            None,
            None,
        )
        .await
        {
            tracing::warn!(error = %e, material_id = id, "Failed to record price change");
        }
    }

    Ok(Json(material))
}

/// DELETE /api/v1/materials/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = MaterialRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id,
        }))
    }
}

fn positive_price_error(field: &str) -> AppError {
    AppError::Core(CoreError::Validation(format!("{field} must be positive")))
}
