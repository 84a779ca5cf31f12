//! Repository for the `projects` table.

use sitequote_core::search::ilike_pattern;
use sitequote_core::types::DbId;
use sqlx::PgPool;

use crate::models::dashboard::AdvancedProjectFilters;
use crate::models::project::{
    CreateProject, Project, ProjectDetail, ProjectFilters, UpdateProject,
};
use crate::repositories::project_component_repo::ProjectComponentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, sor_code, sor_description, sor_type, category, \
     region, manager_id, status, priority, budget, actual_cost, progress, \
     start_date, end_date, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (name, description, sor_code, sor_description, sor_type, category,
                 region, manager_id, status, priority, budget, actual_cost, progress,
                 start_date, end_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8,
                     COALESCE($9, 'planning'), COALESCE($10, 'medium'),
                     COALESCE($11, 0), COALESCE($12, 0), COALESCE($13, 0), $14, $15)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.sor_code)
            .bind(&input.sor_description)
            .bind(&input.sor_type)
            .bind(&input.category)
            .bind(&input.region)
            .bind(input.manager_id)
            .bind(input.status)
            .bind(input.priority)
            .bind(input.budget)
            .bind(input.actual_cost)
            .bind(input.progress)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project together with all of its component rows.
    pub async fn detail(pool: &PgPool, id: DbId) -> Result<Option<ProjectDetail>, sqlx::Error> {
        let Some(project) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        Ok(Some(ProjectDetail {
            materials: ProjectComponentRepo::list_materials(pool, id).await?,
            equipment: ProjectComponentRepo::list_equipment(pool, id).await?,
            labor: ProjectComponentRepo::list_labor(pool, id).await?,
            tasks: ProjectComponentRepo::list_tasks(pool, id).await?,
            external_costs: ProjectComponentRepo::list_external_costs(pool, id).await?,
            project,
        }))
    }

    /// List projects with optional filters, newest first.
    ///
    /// Unset filters impose no constraint; the search term matches name,
    /// description, and category case-insensitively.
    pub async fn list(
        pool: &PgPool,
        filters: &ProjectFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::text IS NULL
                    OR name ILIKE $1 OR description ILIKE $1 OR category ILIKE $1)
               AND ($2::project_status IS NULL OR status = $2)
               AND ($3::project_priority IS NULL OR priority = $3)
               AND ($4::bigint IS NULL OR manager_id = $4)
               AND ($5::text IS NULL OR category = $5)
             ORDER BY created_at DESC, id DESC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filters.search.as_deref().map(ilike_pattern))
            .bind(filters.status)
            .bind(filters.priority)
            .bind(filters.manager_id)
            .bind(&filters.category)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List the most recently created projects.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             ORDER BY created_at DESC, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                sor_code = COALESCE($4, sor_code),
                sor_description = COALESCE($5, sor_description),
                sor_type = COALESCE($6, sor_type),
                category = COALESCE($7, category),
                region = COALESCE($8, region),
                status = COALESCE($9, status),
                priority = COALESCE($10, priority),
                budget = COALESCE($11, budget),
                actual_cost = COALESCE($12, actual_cost),
                progress = COALESCE($13, progress),
                start_date = COALESCE($14, start_date),
                end_date = COALESCE($15, end_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.sor_code)
            .bind(&input.sor_description)
            .bind(&input.sor_type)
            .bind(&input.category)
            .bind(&input.region)
            .bind(input.status)
            .bind(input.priority)
            .bind(input.budget)
            .bind(input.actual_cost)
            .bind(input.progress)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Advanced project search over the full filter set, newest first.
    ///
    /// Unset filters impose no constraint; date, budget, and progress ranges
    /// are inclusive. The search term matches name, description, category,
    /// and SOR code case-insensitively.
    pub async fn search_advanced(
        pool: &PgPool,
        filters: &AdvancedProjectFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::text IS NULL
                    OR name ILIKE $1 OR description ILIKE $1
                    OR category ILIKE $1 OR sor_code ILIKE $1)
               AND ($2::project_status IS NULL OR status = $2)
               AND ($3::project_priority IS NULL OR priority = $3)
               AND ($4::bigint IS NULL OR manager_id = $4)
               AND ($5::text IS NULL OR category = $5)
               AND ($6::text IS NULL OR region = $6)
               AND ($7::text IS NULL OR sor_type = $7)
               AND ($8::text IS NULL OR sor_code = $8)
               AND ($9::timestamptz IS NULL OR start_date >= $9)
               AND ($10::timestamptz IS NULL OR start_date <= $10)
               AND ($11::float8 IS NULL OR budget >= $11)
               AND ($12::float8 IS NULL OR budget <= $12)
               AND ($13::int IS NULL OR progress >= $13)
               AND ($14::int IS NULL OR progress <= $14)
             ORDER BY created_at DESC, id DESC
             LIMIT $15 OFFSET $16"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filters.search.as_deref().map(ilike_pattern))
            .bind(filters.status)
            .bind(filters.priority)
            .bind(filters.manager_id)
            .bind(&filters.category)
            .bind(&filters.region)
            .bind(&filters.sor_type)
            .bind(&filters.sor_code)
            .bind(filters.start_date_from)
            .bind(filters.start_date_to)
            .bind(filters.budget_min)
            .bind(filters.budget_max)
            .bind(filters.progress_min)
            .bind(filters.progress_max)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Delete a project by ID. Component rows cascade at the database level.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
