//! Repository for the `materials` table.

use sitequote_core::search::ilike_pattern;
use sitequote_core::types::DbId;
use sqlx::PgPool;

use crate::models::material::{CreateMaterial, Material, MaterialFilters, UpdateMaterial};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sales_part_no, description, name, state_code, qty, unit_cost, \
     image_url, sor_code, created_at, updated_at";

/// Provides CRUD operations for the material catalog.
pub struct MaterialRepo;

impl MaterialRepo {
    /// Insert a new material, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMaterial) -> Result<Material, sqlx::Error> {
        let query = format!(
            "INSERT INTO materials
                (sales_part_no, description, name, state_code, qty, unit_cost,
                 image_url, sor_code)
             VALUES ($1, $2, $3, $4, COALESCE($5, 1), $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(&input.sales_part_no)
            .bind(&input.description)
            .bind(&input.name)
            .bind(input.state_code)
            .bind(input.qty)
            .bind(input.unit_cost)
            .bind(&input.image_url)
            .bind(&input.sor_code)
            .fetch_one(pool)
            .await
    }

    /// Find a material by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Material>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM materials WHERE id = $1");
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Search materials with optional filters, newest first.
    ///
    /// The search term matches part number, description, and name
    /// case-insensitively; price bounds are inclusive. With no filters set
    /// this is a plain paginated listing.
    pub async fn search(
        pool: &PgPool,
        filters: &MaterialFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Material>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM materials
             WHERE ($1::text IS NULL
                    OR sales_part_no ILIKE $1 OR description ILIKE $1 OR name ILIKE $1)
               AND ($2::state_code IS NULL OR state_code = $2)
               AND ($3::float8 IS NULL OR unit_cost >= $3)
               AND ($4::float8 IS NULL OR unit_cost <= $4)
             ORDER BY created_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(filters.search.as_deref().map(ilike_pattern))
            .bind(filters.state_code)
            .bind(filters.min_price)
            .bind(filters.max_price)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a material. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMaterial,
    ) -> Result<Option<Material>, sqlx::Error> {
        let query = format!(
            "UPDATE materials SET
                sales_part_no = COALESCE($2, sales_part_no),
                description = COALESCE($3, description),
                name = COALESCE($4, name),
                state_code = COALESCE($5, state_code),
                qty = COALESCE($6, qty),
                unit_cost = COALESCE($7, unit_cost),
                image_url = COALESCE($8, image_url),
                sor_code = COALESCE($9, sor_code),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .bind(&input.sales_part_no)
            .bind(&input.description)
            .bind(&input.name)
            .bind(input.state_code)
            .bind(input.qty)
            .bind(input.unit_cost)
            .bind(&input.image_url)
            .bind(&input.sor_code)
            .fetch_optional(pool)
            .await
    }

    /// Delete a material by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
