//! Repository for the `equipment` table.

use sitequote_core::search::ilike_pattern;
use sitequote_core::types::DbId;
use sqlx::PgPool;

use crate::models::equipment::{CreateEquipment, Equipment, EquipmentFilters, UpdateEquipment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sales_part_no, equipment_name, category, state_code, price, \
     price_incl_tax, sor_code, created_at, updated_at";

/// Provides CRUD operations for the equipment catalog.
pub struct EquipmentRepo;

impl EquipmentRepo {
    /// Insert new equipment, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEquipment) -> Result<Equipment, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment
                (sales_part_no, equipment_name, category, state_code, price,
                 price_incl_tax, sor_code)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(&input.sales_part_no)
            .bind(&input.equipment_name)
            .bind(&input.category)
            .bind(input.state_code)
            .bind(input.price)
            .bind(input.price_incl_tax)
            .bind(&input.sor_code)
            .fetch_one(pool)
            .await
    }

    /// Find equipment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment WHERE id = $1");
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Search equipment with optional filters, newest first.
    ///
    /// The search term matches part number, equipment name, and category
    /// case-insensitively; price bounds are inclusive.
    pub async fn search(
        pool: &PgPool,
        filters: &EquipmentFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM equipment
             WHERE ($1::text IS NULL
                    OR sales_part_no ILIKE $1 OR equipment_name ILIKE $1 OR category ILIKE $1)
               AND ($2::text IS NULL OR category = $2)
               AND ($3::state_code IS NULL OR state_code = $3)
               AND ($4::float8 IS NULL OR price >= $4)
               AND ($5::float8 IS NULL OR price <= $5)
             ORDER BY created_at DESC, id DESC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(filters.search.as_deref().map(ilike_pattern))
            .bind(&filters.category)
            .bind(filters.state_code)
            .bind(filters.min_price)
            .bind(filters.max_price)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update equipment. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEquipment,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!(
            "UPDATE equipment SET
                sales_part_no = COALESCE($2, sales_part_no),
                equipment_name = COALESCE($3, equipment_name),
                category = COALESCE($4, category),
                state_code = COALESCE($5, state_code),
                price = COALESCE($6, price),
                price_incl_tax = COALESCE($7, price_incl_tax),
                sor_code = COALESCE($8, sor_code),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .bind(&input.sales_part_no)
            .bind(&input.equipment_name)
            .bind(&input.category)
            .bind(input.state_code)
            .bind(input.price)
            .bind(input.price_incl_tax)
            .bind(&input.sor_code)
            .fetch_optional(pool)
            .await
    }

    /// Delete equipment by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
