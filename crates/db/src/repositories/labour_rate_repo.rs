//! Repository for the `labour_rates` table.
//!
//! Rate resolution is an exact (labour_type, state_code) lookup; the pair is
//! unique, so a miss means no rate exists and callers surface it as not
//! found rather than defaulting to zero.

use sitequote_core::types::DbId;
use sqlx::PgPool;

use crate::models::enums::StateCode;
use crate::models::labour_rate::{CreateLabourRate, LabourRate, UpdateLabourRate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, labour_type, cost_per_person, hours, state_code, created_at, updated_at";

/// Provides CRUD operations and rate resolution for labour rates.
pub struct LabourRateRepo;

impl LabourRateRepo {
    /// Insert a new labour rate, returning the created row.
    ///
    /// A duplicate (labour_type, state_code) pair violates
    /// `uq_labour_rates_type_state`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateLabourRate,
    ) -> Result<LabourRate, sqlx::Error> {
        let query = format!(
            "INSERT INTO labour_rates (labour_type, cost_per_person, hours, state_code)
             VALUES ($1, $2, COALESCE($3, 1), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LabourRate>(&query)
            .bind(&input.labour_type)
            .bind(input.cost_per_person)
            .bind(input.hours)
            .bind(input.state_code)
            .fetch_one(pool)
            .await
    }

    /// Find a labour rate by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LabourRate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM labour_rates WHERE id = $1");
        sqlx::query_as::<_, LabourRate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List labour rates, optionally restricted to one state.
    pub async fn list(
        pool: &PgPool,
        state_code: Option<StateCode>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LabourRate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM labour_rates
             WHERE ($1::state_code IS NULL OR state_code = $1)
             ORDER BY labour_type, state_code
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, LabourRate>(&query)
            .bind(state_code)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Resolve the effective labour rate for a (labour_type, state) pair.
    ///
    /// Exact match on both fields; `None` when no such rate exists.
    pub async fn effective_rate(
        pool: &PgPool,
        labour_type: &str,
        state_code: StateCode,
    ) -> Result<Option<LabourRate>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM labour_rates WHERE labour_type = $1 AND state_code = $2");
        sqlx::query_as::<_, LabourRate>(&query)
            .bind(labour_type)
            .bind(state_code)
            .fetch_optional(pool)
            .await
    }

    /// Update a labour rate. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLabourRate,
    ) -> Result<Option<LabourRate>, sqlx::Error> {
        let query = format!(
            "UPDATE labour_rates SET
                labour_type = COALESCE($2, labour_type),
                cost_per_person = COALESCE($3, cost_per_person),
                hours = COALESCE($4, hours),
                state_code = COALESCE($5, state_code),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LabourRate>(&query)
            .bind(id)
            .bind(&input.labour_type)
            .bind(input.cost_per_person)
            .bind(input.hours)
            .bind(input.state_code)
            .fetch_optional(pool)
            .await
    }

    /// Delete a labour rate by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM labour_rates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
