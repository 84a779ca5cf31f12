//! Handlers for the `/labour-rates` resource, including rate resolution.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sitequote_core::error::CoreError;
use sitequote_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use sitequote_core::types::DbId;
use sitequote_db::models::enums::StateCode;
use sitequote_db::models::labour_rate::{CreateLabourRate, LabourRate, UpdateLabourRate};
use sitequote_db::repositories::{LabourRateRepo, PriceChangeLogRepo};

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::state::AppState;

/// Query parameters for `GET /labour-rates`.
#[derive(Debug, Deserialize)]
pub struct LabourRateQuery {
    pub state_code: Option<StateCode>,
}

/// GET /api/v1/labour-rates
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<LabourRateQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Vec<LabourRate>>> {
    let limit = clamp_limit(page.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(page.skip);
    let rates = LabourRateRepo::list(&state.pool, params.state_code, limit, offset).await?;
    Ok(Json(rates))
}

/// GET /api/v1/labour-rates/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<LabourRate>> {
    let rate = LabourRateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LabourRate",
            id,
        }))?;
    Ok(Json(rate))
}

/// GET /api/v1/labour-rates/rate/{labour_type}/{state_code}
///
/// Resolve the effective per-person rate for a (type, state) pair.
/// A missing pair is a 404, never a silent zero rate.
pub async fn effective_rate(
    State(state): State<AppState>,
    Path((labour_type, state_code)): Path<(String, StateCode)>,
) -> AppResult<Json<serde_json::Value>> {
    let Some(rate) = LabourRateRepo::effective_rate(&state.pool, &labour_type, state_code).await?
    else {
        return Err(AppError::NotFound(format!(
            "no labour rate for type '{labour_type}' in state {}",
            state_code.as_str()
        )));
    };

    Ok(Json(serde_json::json!({
        "labour_type": rate.labour_type,
        "state_code": rate.state_code,
        "effective_rate": rate.cost_per_person,
        "hours": rate.hours,
    })))
}

/// POST /api/v1/labour-rates
///
/// A duplicate (labour_type, state_code) pair maps to 409.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateLabourRate>,
) -> AppResult<(StatusCode, Json<LabourRate>)> {
    validate_rate(Some(input.cost_per_person), input.hours)?;
    let rate = LabourRateRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(rate)))
}

/// PUT /api/v1/labour-rates/{id}
///
/// A change to `cost_per_person` is appended to the price change log.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLabourRate>,
) -> AppResult<Json<LabourRate>> {
    validate_rate(input.cost_per_person, input.hours)?;

    let before = LabourRateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LabourRate",
            id,
        }))?;

    let rate = LabourRateRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LabourRate",
            id,
        }))?;

    if rate.cost_per_person != before.cost_per_person {
        if let Err(e) = PriceChangeLogRepo::record(
            &state.pool,
            "labor",
            id,
            &rate.labour_type,
            before.cost_per_person,
            rate.cost_per_person,
            None,
            None,
        )
        .await
        {
            tracing::warn!(error = %e, labour_rate_id = id, "Failed to record price change");
        }
    }

    Ok(Json(rate))
}

/// DELETE /api/v1/labour-rates/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = LabourRateRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "LabourRate",
            id,
        }))
    }
}

fn validate_rate(cost_per_person: Option<f64>, hours: Option<f64>) -> Result<(), AppError> {
    if cost_per_person.is_some_and(|c| c <= 0.0) {
        return Err(AppError::Core(CoreError::Validation(
            "cost_per_person must be positive".into(),
        )));
    }
    if hours.is_some_and(|h| h <= 0.0) {
        return Err(AppError::Core(CoreError::Validation(
            "hours must be positive".into(),
        )));
    }
    Ok(())
}
