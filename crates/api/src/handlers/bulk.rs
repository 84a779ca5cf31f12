//! Handlers for `/bulk`: admin-only import and export.
//!
//! Import is row-at-a-time: a bad row is reported and skipped, the rest of
//! the batch proceeds.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use sitequote_core::error::CoreError;
use sitequote_db::models::dashboard::AdvancedProjectFilters;
use sitequote_db::models::equipment::{CreateEquipment, EquipmentFilters};
use sitequote_db::models::labour_rate::CreateLabourRate;
use sitequote_db::models::material::{CreateMaterial, MaterialFilters};
use sitequote_db::models::quote::QuoteFilters;
use sitequote_db::repositories::{
    EquipmentRepo, LabourRateRepo, MaterialRepo, ProjectRepo, QuoteRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminUser;
use crate::state::AppState;

/// Upper bound on rows accepted in one import request.
const MAX_IMPORT_ROWS: usize = 1000;

/// Upper bound on rows returned by one export request.
const MAX_EXPORT_ROWS: i64 = 10_000;

/// Request body for `POST /bulk/import`.
#[derive(Debug, Deserialize)]
pub struct BulkImportRequest {
    /// One of `materials`, `equipment`, `labour_rates`.
    pub entity_type: String,
    pub records: Vec<serde_json::Value>,
}

/// Request body for `POST /bulk/export`.
#[derive(Debug, Deserialize)]
pub struct BulkExportRequest {
    /// One of `projects`, `materials`, `equipment`, `labour_rates`, `quotes`.
    pub entity_type: String,
}

/// POST /api/v1/bulk/import
pub async fn import(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<BulkImportRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if input.records.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "records must not be empty".into(),
        )));
    }
    if input.records.len() > MAX_IMPORT_ROWS {
        return Err(AppError::Core(CoreError::Validation(format!(
            "at most {MAX_IMPORT_ROWS} records per import"
        ))));
    }

    let mut imported = 0usize;
    let mut errors = Vec::new();

    for (index, record) in input.records.iter().enumerate() {
        let outcome = match input.entity_type.as_str() {
            "materials" => import_material(&state, record).await,
            "equipment" => import_equipment(&state, record).await,
            "labour_rates" => import_labour_rate(&state, record).await,
            other => {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "unknown entity_type '{other}'"
                ))))
            }
        };

        match outcome {
            Ok(()) => imported += 1,
            Err(message) => errors.push(format!("record {index}: {message}")),
        }
    }

    Ok(Json(serde_json::json!({
        "imported_count": imported,
        "failed_count": errors.len(),
        "errors": errors,
    })))
}

/// POST /api/v1/bulk/export
///
/// Returns the records inline as JSON along with a count.
pub async fn export(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<BulkExportRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let records = match input.entity_type.as_str() {
        "projects" => to_values(
            ProjectRepo::search_advanced(
                &state.pool,
                &AdvancedProjectFilters::default(),
                MAX_EXPORT_ROWS,
                0,
            )
            .await?,
        ),
        "materials" => to_values(
            MaterialRepo::search(&state.pool, &MaterialFilters::default(), MAX_EXPORT_ROWS, 0)
                .await?,
        ),
        "equipment" => to_values(
            EquipmentRepo::search(&state.pool, &EquipmentFilters::default(), MAX_EXPORT_ROWS, 0)
                .await?,
        ),
        "labour_rates" => {
            to_values(LabourRateRepo::list(&state.pool, None, MAX_EXPORT_ROWS, 0).await?)
        }
        "quotes" => to_values(
            QuoteRepo::list(&state.pool, &QuoteFilters::default(), MAX_EXPORT_ROWS, 0).await?,
        ),
        other => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "unknown entity_type '{other}'"
            ))))
        }
    };

    Ok(Json(serde_json::json!({
        "entity_type": input.entity_type,
        "count": records.len(),
        "records": records,
    })))
}

// ---------------------------------------------------------------------------
// Per-entity import rows
// ---------------------------------------------------------------------------

async fn import_material(state: &AppState, record: &serde_json::Value) -> Result<(), String> {
    let input: CreateMaterial =
        serde_json::from_value(record.clone()).map_err(|e| e.to_string())?;
    if input.unit_cost <= 0.0 {
        return Err("unit_cost must be positive".into());
    }
    MaterialRepo::create(&state.pool, &input)
        .await
        .map_err(|e| e.to_string())?;
    Ok(())
}

async fn import_equipment(state: &AppState, record: &serde_json::Value) -> Result<(), String> {
    let input: CreateEquipment =
        serde_json::from_value(record.clone()).map_err(|e| e.to_string())?;
    if input.price <= 0.0 || input.price_incl_tax <= 0.0 {
        return Err("price and price_incl_tax must be positive".into());
    }
    EquipmentRepo::create(&state.pool, &input)
        .await
        .map_err(|e| e.to_string())?;
    Ok(())
}

async fn import_labour_rate(state: &AppState, record: &serde_json::Value) -> Result<(), String> {
    let input: CreateLabourRate =
        serde_json::from_value(record.clone()).map_err(|e| e.to_string())?;
    if input.cost_per_person <= 0.0 {
        return Err("cost_per_person must be positive".into());
    }
    LabourRateRepo::create(&state.pool, &input)
        .await
        .map_err(|e| e.to_string())?;
    Ok(())
}

fn to_values<T: serde::Serialize>(rows: Vec<T>) -> Vec<serde_json::Value> {
    rows.iter()
        .filter_map(|r| serde_json::to_value(r).ok())
        .collect()
}
