//! Route definitions for the `/projects` resource, including the component
//! sub-resources nested under `/projects/{id}/...`.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{project, project_component};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                   -> list
/// POST   /                                   -> create
/// GET    /recent                             -> recent
/// GET    /{id}                               -> get_by_id (full detail)
/// PUT    /{id}                               -> update
/// DELETE /{id}                               -> delete (cascades components)
/// GET    /{id}/totals                        -> totals (category rollup)
///
/// GET    /{id}/materials                     -> list_materials
/// POST   /{id}/materials                     -> add_material
/// DELETE /{id}/materials/{component_id}      -> remove_material
///
/// GET    /{id}/equipment                     -> list_equipment
/// POST   /{id}/equipment                     -> add_equipment
/// DELETE /{id}/equipment/{component_id}      -> remove_equipment
///
/// GET    /{id}/labor                         -> list_labor
/// POST   /{id}/labor                         -> add_labor
/// DELETE /{id}/labor/{component_id}          -> remove_labor
///
/// GET    /{id}/tasks                         -> list_tasks
/// POST   /{id}/tasks                         -> add_task
/// PUT    /{id}/tasks/{task_id}               -> update_task
/// DELETE /{id}/tasks/{task_id}               -> remove_task
///
/// GET    /{id}/external-costs                -> list_external_costs
/// POST   /{id}/external-costs                -> add_external_cost
/// DELETE /{id}/external-costs/{cost_id}      -> remove_external_cost
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/recent", get(project::recent))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/totals", get(project::totals))
        .route(
            "/{id}/materials",
            get(project_component::list_materials).post(project_component::add_material),
        )
        .route(
            "/{id}/materials/{component_id}",
            delete(project_component::remove_material),
        )
        .route(
            "/{id}/equipment",
            get(project_component::list_equipment).post(project_component::add_equipment),
        )
        .route(
            "/{id}/equipment/{component_id}",
            delete(project_component::remove_equipment),
        )
        .route(
            "/{id}/labor",
            get(project_component::list_labor).post(project_component::add_labor),
        )
        .route(
            "/{id}/labor/{component_id}",
            delete(project_component::remove_labor),
        )
        .route(
            "/{id}/tasks",
            get(project_component::list_tasks).post(project_component::add_task),
        )
        .route(
            "/{id}/tasks/{task_id}",
            put(project_component::update_task).delete(project_component::remove_task),
        )
        .route(
            "/{id}/external-costs",
            get(project_component::list_external_costs)
                .post(project_component::add_external_cost),
        )
        .route(
            "/{id}/external-costs/{cost_id}",
            delete(project_component::remove_external_cost),
        )
}
