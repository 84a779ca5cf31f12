//! Handlers for project component sub-resources:
//! `/projects/{id}/{materials|equipment|labor|tasks|external-costs}`.
//!
//! Attach operations snapshot the current catalog price and compute the line
//! total server-side; the snapshot never changes when the catalog does.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sitequote_core::error::CoreError;
use sitequote_core::pricing::{labour_total, line_total};
use sitequote_core::types::DbId;
use sitequote_db::models::project_component::{
    AttachEquipment, AttachLabor, AttachMaterial, CreateExternalCost, CreateProjectTask,
    ProjectEquipment, ProjectExternalCost, ProjectLabor, ProjectMaterial, ProjectTask,
    UpdateProjectTask,
};
use sitequote_db::repositories::{
    EquipmentRepo, LabourRateRepo, MaterialRepo, ProjectComponentRepo, ProjectRepo,
};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/materials
pub async fn list_materials(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectMaterial>>> {
    ensure_project(&state, project_id).await?;
    let rows = ProjectComponentRepo::list_materials(&state.pool, project_id).await?;
    Ok(Json(rows))
}

/// POST /api/v1/projects/{id}/materials
pub async fn add_material(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<AttachMaterial>,
) -> AppResult<(StatusCode, Json<ProjectMaterial>)> {
    ensure_project(&state, project_id).await?;
    let quantity = positive_quantity(input.quantity)?;

    let material = MaterialRepo::find_by_id(&state.pool, input.material_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Material",
            id: input.material_id,
        }))?;

    let unit_price = input.unit_price.unwrap_or(material.unit_cost);
    let total_price = line_total(quantity, unit_price);

    let row = ProjectComponentRepo::add_material(
        &state.pool,
        project_id,
        material.id,
        quantity,
        unit_price,
        total_price,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// DELETE /api/v1/projects/{id}/materials/{component_id}
pub async fn remove_material(
    State(state): State<AppState>,
    Path((project_id, component_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed =
        ProjectComponentRepo::remove_material(&state.pool, project_id, component_id).await?;
    not_found_unless(removed, "ProjectMaterial", component_id)
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/equipment
pub async fn list_equipment(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectEquipment>>> {
    ensure_project(&state, project_id).await?;
    let rows = ProjectComponentRepo::list_equipment(&state.pool, project_id).await?;
    Ok(Json(rows))
}

/// POST /api/v1/projects/{id}/equipment
pub async fn add_equipment(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<AttachEquipment>,
) -> AppResult<(StatusCode, Json<ProjectEquipment>)> {
    ensure_project(&state, project_id).await?;
    let quantity = positive_quantity(input.quantity)?;

    let equipment = EquipmentRepo::find_by_id(&state.pool, input.equipment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id: input.equipment_id,
        }))?;

    let unit_price = input.unit_price.unwrap_or(equipment.price);
    let total_price = line_total(quantity, unit_price);

    let row = ProjectComponentRepo::add_equipment(
        &state.pool,
        project_id,
        equipment.id,
        quantity,
        unit_price,
        total_price,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// DELETE /api/v1/projects/{id}/equipment/{component_id}
pub async fn remove_equipment(
    State(state): State<AppState>,
    Path((project_id, component_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed =
        ProjectComponentRepo::remove_equipment(&state.pool, project_id, component_id).await?;
    not_found_unless(removed, "ProjectEquipment", component_id)
}

// ---------------------------------------------------------------------------
// Labour
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/labor
pub async fn list_labor(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectLabor>>> {
    ensure_project(&state, project_id).await?;
    let rows = ProjectComponentRepo::list_labor(&state.pool, project_id).await?;
    Ok(Json(rows))
}

/// POST /api/v1/projects/{id}/labor
///
/// Resolves the per-person rate from the referenced labour rate and computes
/// `total_cost = persons x hours x unit_rate`.
pub async fn add_labor(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<AttachLabor>,
) -> AppResult<(StatusCode, Json<ProjectLabor>)> {
    ensure_project(&state, project_id).await?;

    let persons = input.persons.unwrap_or(1);
    let hours = input.hours.unwrap_or(8);
    if persons <= 0 || hours <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "persons and hours must be positive".into(),
        )));
    }

    let rate = LabourRateRepo::find_by_id(&state.pool, input.labour_rate_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LabourRate",
            id: input.labour_rate_id,
        }))?;

    let total_cost = labour_total(persons, hours, rate.cost_per_person);

    let row = ProjectComponentRepo::add_labor(
        &state.pool,
        project_id,
        rate.id,
        persons,
        hours,
        rate.state_code,
        rate.cost_per_person,
        total_cost,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// DELETE /api/v1/projects/{id}/labor/{component_id}
pub async fn remove_labor(
    State(state): State<AppState>,
    Path((project_id, component_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed = ProjectComponentRepo::remove_labor(&state.pool, project_id, component_id).await?;
    not_found_unless(removed, "ProjectLabor", component_id)
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectTask>>> {
    ensure_project(&state, project_id).await?;
    let rows = ProjectComponentRepo::list_tasks(&state.pool, project_id).await?;
    Ok(Json(rows))
}

/// POST /api/v1/projects/{id}/tasks
pub async fn add_task(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateProjectTask>,
) -> AppResult<(StatusCode, Json<ProjectTask>)> {
    ensure_project(&state, project_id).await?;
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "task name must not be empty".into(),
        )));
    }
    let row = ProjectComponentRepo::add_task(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/projects/{id}/tasks/{task_id}
pub async fn update_task(
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateProjectTask>,
) -> AppResult<Json<ProjectTask>> {
    let task = ProjectComponentRepo::update_task(&state.pool, project_id, task_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProjectTask",
            id: task_id,
        }))?;
    Ok(Json(task))
}

/// DELETE /api/v1/projects/{id}/tasks/{task_id}
pub async fn remove_task(
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed = ProjectComponentRepo::remove_task(&state.pool, project_id, task_id).await?;
    not_found_unless(removed, "ProjectTask", task_id)
}

// ---------------------------------------------------------------------------
// External costs
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/external-costs
pub async fn list_external_costs(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectExternalCost>>> {
    ensure_project(&state, project_id).await?;
    let rows = ProjectComponentRepo::list_external_costs(&state.pool, project_id).await?;
    Ok(Json(rows))
}

/// POST /api/v1/projects/{id}/external-costs
pub async fn add_external_cost(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateExternalCost>,
) -> AppResult<(StatusCode, Json<ProjectExternalCost>)> {
    ensure_project(&state, project_id).await?;
    if input.amount < 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "amount must not be negative".into(),
        )));
    }
    if let Some(p) = input.percentage {
        if !(0.0..=100.0).contains(&p) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "percentage must be between 0 and 100, got {p}"
            ))));
        }
    }
    let row = ProjectComponentRepo::add_external_cost(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// DELETE /api/v1/projects/{id}/external-costs/{cost_id}
pub async fn remove_external_cost(
    State(state): State<AppState>,
    Path((project_id, cost_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed =
        ProjectComponentRepo::remove_external_cost(&state.pool, project_id, cost_id).await?;
    not_found_unless(removed, "ProjectExternalCost", cost_id)
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn ensure_project(state: &AppState, project_id: DbId) -> Result<(), AppError> {
    if ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }
    Ok(())
}

fn positive_quantity(quantity: Option<i32>) -> Result<i32, AppError> {
    let quantity = quantity.unwrap_or(1);
    if quantity <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "quantity must be positive".into(),
        )));
    }
    Ok(quantity)
}

fn not_found_unless(found: bool, entity: &'static str, id: DbId) -> AppResult<StatusCode> {
    if found {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity, id }))
    }
}
