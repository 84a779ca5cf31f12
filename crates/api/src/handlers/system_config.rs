//! Handlers for the `/config` key-value resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sitequote_core::error::CoreError;
use sitequote_db::models::system_config::{
    CreateSystemConfig, SystemConfig, UpdateSystemConfig,
};
use sitequote_db::repositories::SystemConfigRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/config
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<SystemConfig>>> {
    let configs = SystemConfigRepo::list(&state.pool).await?;
    Ok(Json(configs))
}

/// GET /api/v1/config/{key}
pub async fn get_by_key(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<SystemConfig>> {
    let config = SystemConfigRepo::find_by_key(&state.pool, &key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no configuration for key '{key}'")))?;
    Ok(Json(config))
}

/// POST /api/v1/config
///
/// A duplicate key maps to 409.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSystemConfig>,
) -> AppResult<(StatusCode, Json<SystemConfig>)> {
    if input.key.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "key must not be empty".into(),
        )));
    }
    let config = SystemConfigRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(config)))
}

/// PUT /api/v1/config/{key}
pub async fn update(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<UpdateSystemConfig>,
) -> AppResult<Json<SystemConfig>> {
    let config = SystemConfigRepo::update_by_key(&state.pool, &key, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no configuration for key '{key}'")))?;
    Ok(Json(config))
}
