//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sitequote_core::error::CoreError;
use sitequote_core::pricing::CostRollup;
use sitequote_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use sitequote_core::types::DbId;
use sitequote_db::models::project::{
    CreateProject, Project, ProjectDetail, ProjectFilters, UpdateProject,
};
use sitequote_db::repositories::{AuditLogRepo, ProjectComponentRepo, ProjectRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::state::AppState;

/// Default number of projects returned by `GET /projects/recent`.
const DEFAULT_RECENT_LIMIT: i64 = 5;

/// Maximum number of projects returned by `GET /projects/recent`.
const MAX_RECENT_LIMIT: i64 = 20;

/// Query parameters for `GET /projects/recent`.
#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<i64>,
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_progress(input.progress)?;

    // Reject unknown managers up front rather than surfacing an FK error.
    if UserRepo::find_by_id(&state.pool, input.manager_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "manager_id {} references no user",
            input.manager_id
        ))));
    }

    let project = ProjectRepo::create(&state.pool, &input).await?;
    record_audit(&state, "project.created", project.id, None, Some(&project)).await;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(filters): Query<ProjectFilters>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Vec<Project>>> {
    let limit = clamp_limit(page.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(page.skip);
    let projects = ProjectRepo::list(&state.pool, &filters, limit, offset).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/recent
pub async fn recent(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> AppResult<Json<Vec<Project>>> {
    let limit = clamp_limit(params.limit, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT);
    let projects = ProjectRepo::recent(&state.pool, limit).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
///
/// Returns the project with all of its component rows.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let detail = ProjectRepo::detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(detail))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    validate_progress(input.progress)?;

    let before = ProjectRepo::find_by_id(&state.pool, id).await?;
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    record_audit(&state, "project.updated", id, before.as_ref(), Some(&project)).await;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Component rows cascade with the project.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let before = ProjectRepo::find_by_id(&state.pool, id).await?;
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    record_audit(&state, "project.deleted", id, before.as_ref(), None).await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/projects/{id}/totals
///
/// Category rollup plus grand total, computed on demand.
pub async fn totals(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CostRollup>> {
    if ProjectRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    let rollup = ProjectComponentRepo::cost_rollup(&state.pool, id).await?;
    Ok(Json(rollup))
}

fn validate_progress(progress: Option<i32>) -> Result<(), AppError> {
    if let Some(p) = progress {
        if !(0..=100).contains(&p) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "progress must be between 0 and 100, got {p}"
            ))));
        }
    }
    Ok(())
}

/// Append an audit entry; failures are logged, never surfaced to the caller.
async fn record_audit(
    state: &AppState,
    action: &str,
    project_id: DbId,
    old: Option<&Project>,
    new: Option<&Project>,
) {
    let old_values = old.and_then(|p| serde_json::to_value(p).ok());
    let new_values = new.and_then(|p| serde_json::to_value(p).ok());
    if let Err(e) = AuditLogRepo::record(
        &state.pool,
        None,
        action,
        "project",
        project_id,
        old_values.as_ref(),
        new_values.as_ref(),
    )
    .await
    {
        tracing::warn!(error = %e, action, project_id, "Failed to record audit entry");
    }
}
