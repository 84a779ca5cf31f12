//! Handlers for the `/equipment` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sitequote_core::error::CoreError;
use sitequote_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use sitequote_core::types::DbId;
use sitequote_db::models::equipment::{
    CreateEquipment, Equipment, EquipmentFilters, UpdateEquipment,
};
use sitequote_db::repositories::{EquipmentRepo, PriceChangeLogRepo};

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::state::AppState;

/// GET /api/v1/equipment
pub async fn list(
    State(state): State<AppState>,
    Query(filters): Query<EquipmentFilters>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Vec<Equipment>>> {
    let limit = clamp_limit(page.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(page.skip);
    let equipment = EquipmentRepo::search(&state.pool, &filters, limit, offset).await?;
    Ok(Json(equipment))
}

/// GET /api/v1/equipment/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Equipment>> {
    let equipment = EquipmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))?;
    Ok(Json(equipment))
}

/// POST /api/v1/equipment
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    if input.price <= 0.0 || input.price_incl_tax <= 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "price and price_incl_tax must be positive".into(),
        )));
    }
    let equipment = EquipmentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// PUT /api/v1/equipment/{id}
///
/// A change to `price` is appended to the price change log.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    if input.price.is_some_and(|p| p <= 0.0) || input.price_incl_tax.is_some_and(|p| p <= 0.0) {
        return Err(AppError::Core(CoreError::Validation(
            "price and price_incl_tax must be positive".into(),
        )));
    }

    let before = EquipmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))?;

    let equipment = EquipmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))?;

    if equipment.price != before.price {
        if let Err(e) = PriceChangeLogRepo::record(
            &state.pool,
            "equipment",
            id,
            &equipment.equipment_name,
            before.price,
            equipment.price,
            None,
            None,
        )
        .await
        {
            tracing::warn!(error = %e, equipment_id = id, "Failed to record price change");
        }
    }

    Ok(Json(equipment))
}

/// DELETE /api/v1/equipment/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = EquipmentRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))
    }
}
