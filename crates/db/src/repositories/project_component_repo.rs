//! Repository for project component rows: materials, equipment, labour,
//! tasks, and external costs.
//!
//! Priced rows are inserted with totals already computed by the caller from
//! the catalog snapshot; this layer never re-derives them.

use sitequote_core::pricing::CostRollup;
use sitequote_core::types::DbId;
use sqlx::PgPool;

use crate::models::enums::StateCode;
use crate::models::project_component::{
    CreateExternalCost, CreateProjectTask, ProjectEquipment, ProjectExternalCost, ProjectLabor,
    ProjectMaterial, ProjectTask, UpdateProjectTask,
};

const MATERIAL_COLUMNS: &str =
    "id, project_id, material_id, quantity, unit_price, total_price, created_at";

const EQUIPMENT_COLUMNS: &str =
    "id, project_id, equipment_id, quantity, unit_price, total_price, created_at";

const LABOR_COLUMNS: &str = "id, project_id, labour_rate_id, persons, hours, state_code, \
     unit_rate, total_cost, created_at";

const TASK_COLUMNS: &str =
    "id, project_id, name, description, status, due_date, created_at, updated_at";

const EXTERNAL_COLUMNS: &str =
    "id, project_id, cost_type, description, amount, percentage, is_enabled, created_at";

/// Provides operations on the rows a project owns.
pub struct ProjectComponentRepo;

impl ProjectComponentRepo {
    // -- Materials -----------------------------------------------------------

    /// List material rows attached to a project.
    pub async fn list_materials(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectMaterial>, sqlx::Error> {
        let query = format!(
            "SELECT {MATERIAL_COLUMNS} FROM project_materials
             WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ProjectMaterial>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Attach a material with a price snapshot taken by the caller.
    pub async fn add_material(
        pool: &PgPool,
        project_id: DbId,
        material_id: DbId,
        quantity: i32,
        unit_price: f64,
        total_price: f64,
    ) -> Result<ProjectMaterial, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_materials
                (project_id, material_id, quantity, unit_price, total_price)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {MATERIAL_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMaterial>(&query)
            .bind(project_id)
            .bind(material_id)
            .bind(quantity)
            .bind(unit_price)
            .bind(total_price)
            .fetch_one(pool)
            .await
    }

    /// Remove a material row from a project. Returns `true` if a row was
    /// removed.
    pub async fn remove_material(
        pool: &PgPool,
        project_id: DbId,
        component_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_materials WHERE id = $1 AND project_id = $2")
                .bind(component_id)
                .bind(project_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Equipment -----------------------------------------------------------

    /// List equipment rows attached to a project.
    pub async fn list_equipment(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectEquipment>, sqlx::Error> {
        let query = format!(
            "SELECT {EQUIPMENT_COLUMNS} FROM project_equipment
             WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ProjectEquipment>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Attach equipment with a price snapshot taken by the caller.
    pub async fn add_equipment(
        pool: &PgPool,
        project_id: DbId,
        equipment_id: DbId,
        quantity: i32,
        unit_price: f64,
        total_price: f64,
    ) -> Result<ProjectEquipment, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_equipment
                (project_id, equipment_id, quantity, unit_price, total_price)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {EQUIPMENT_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectEquipment>(&query)
            .bind(project_id)
            .bind(equipment_id)
            .bind(quantity)
            .bind(unit_price)
            .bind(total_price)
            .fetch_one(pool)
            .await
    }

    /// Remove an equipment row from a project. Returns `true` if a row was
    /// removed.
    pub async fn remove_equipment(
        pool: &PgPool,
        project_id: DbId,
        component_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_equipment WHERE id = $1 AND project_id = $2")
                .bind(component_id)
                .bind(project_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Labour --------------------------------------------------------------

    /// List labour rows attached to a project.
    pub async fn list_labor(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectLabor>, sqlx::Error> {
        let query = format!(
            "SELECT {LABOR_COLUMNS} FROM project_labor
             WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ProjectLabor>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Attach labour with the rate snapshot resolved by the caller.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_labor(
        pool: &PgPool,
        project_id: DbId,
        labour_rate_id: DbId,
        persons: i32,
        hours: i32,
        state_code: StateCode,
        unit_rate: f64,
        total_cost: f64,
    ) -> Result<ProjectLabor, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_labor
                (project_id, labour_rate_id, persons, hours, state_code, unit_rate, total_cost)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {LABOR_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectLabor>(&query)
            .bind(project_id)
            .bind(labour_rate_id)
            .bind(persons)
            .bind(hours)
            .bind(state_code)
            .bind(unit_rate)
            .bind(total_cost)
            .fetch_one(pool)
            .await
    }

    /// Remove a labour row from a project. Returns `true` if a row was
    /// removed.
    pub async fn remove_labor(
        pool: &PgPool,
        project_id: DbId,
        component_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_labor WHERE id = $1 AND project_id = $2")
            .bind(component_id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Tasks ---------------------------------------------------------------

    /// List tasks attached to a project.
    pub async fn list_tasks(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectTask>, sqlx::Error> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM project_tasks
             WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ProjectTask>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Create a task on a project.
    pub async fn add_task(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateProjectTask,
    ) -> Result<ProjectTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_tasks (project_id, name, description, status, due_date)
             VALUES ($1, $2, $3, COALESCE($4, 'pending'), $5)
             RETURNING {TASK_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectTask>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    pub async fn update_task(
        pool: &PgPool,
        project_id: DbId,
        task_id: DbId,
        input: &UpdateProjectTask,
    ) -> Result<Option<ProjectTask>, sqlx::Error> {
        let query = format!(
            "UPDATE project_tasks SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                due_date = COALESCE($6, due_date),
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2
             RETURNING {TASK_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectTask>(&query)
            .bind(task_id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.due_date)
            .fetch_optional(pool)
            .await
    }

    /// Remove a task from a project. Returns `true` if a row was removed.
    pub async fn remove_task(
        pool: &PgPool,
        project_id: DbId,
        task_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_tasks WHERE id = $1 AND project_id = $2")
            .bind(task_id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- External costs ------------------------------------------------------

    /// List external cost rows attached to a project.
    pub async fn list_external_costs(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectExternalCost>, sqlx::Error> {
        let query = format!(
            "SELECT {EXTERNAL_COLUMNS} FROM project_external_costs
             WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ProjectExternalCost>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Attach an external cost to a project.
    pub async fn add_external_cost(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateExternalCost,
    ) -> Result<ProjectExternalCost, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_external_costs
                (project_id, cost_type, description, amount, percentage, is_enabled)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE))
             RETURNING {EXTERNAL_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectExternalCost>(&query)
            .bind(project_id)
            .bind(&input.cost_type)
            .bind(&input.description)
            .bind(input.amount)
            .bind(input.percentage)
            .bind(input.is_enabled)
            .fetch_one(pool)
            .await
    }

    /// Remove an external cost from a project. Returns `true` if a row was
    /// removed.
    pub async fn remove_external_cost(
        pool: &PgPool,
        project_id: DbId,
        cost_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_external_costs WHERE id = $1 AND project_id = $2")
                .bind(cost_id)
                .bind(project_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Rollup --------------------------------------------------------------

    /// Sum a project's component costs per category in a single query.
    ///
    /// Disabled external costs are excluded. A project with no components
    /// yields a zero rollup.
    pub async fn cost_rollup(pool: &PgPool, project_id: DbId) -> Result<CostRollup, sqlx::Error> {
        let (materials, equipment, labour, external) =
            sqlx::query_as::<_, (f64, f64, f64, f64)>(
                "SELECT
                    COALESCE((SELECT SUM(total_price) FROM project_materials
                              WHERE project_id = $1), 0),
                    COALESCE((SELECT SUM(total_price) FROM project_equipment
                              WHERE project_id = $1), 0),
                    COALESCE((SELECT SUM(total_cost) FROM project_labor
                              WHERE project_id = $1), 0),
                    COALESCE((SELECT SUM(amount) FROM project_external_costs
                              WHERE project_id = $1 AND is_enabled), 0)",
            )
            .bind(project_id)
            .fetch_one(pool)
            .await?;

        Ok(CostRollup::new(materials, equipment, labour, external))
    }
}
