//! Repositories for the append-only `audit_logs` and `price_change_logs`
//! tables.

use sitequote_core::types::DbId;
use sqlx::PgPool;

use crate::models::audit::{AuditLog, PriceChangeLog};

/// Column list for `audit_logs` queries.
const AUDIT_COLUMNS: &str = "id, user_id, action, entity_type, entity_id, old_values, \
     new_values, ip_address, user_agent, created_at";

/// Column list for `price_change_logs` queries.
const PRICE_COLUMNS: &str = "id, entity_type, entity_id, entity_name, old_price, new_price, \
     changed_by, change_reason, created_at";

/// Append and read audit log entries.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append an audit entry. Entries are never updated or deleted.
    pub async fn record(
        pool: &PgPool,
        user_id: Option<DbId>,
        action: &str,
        entity_type: &str,
        entity_id: DbId,
        old_values: Option<&serde_json::Value>,
        new_values: Option<&serde_json::Value>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO audit_logs
                (user_id, action, entity_type, entity_id, old_values, new_values)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user_id)
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(old_values)
        .bind(new_values)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List audit entries, newest first, with optional filters.
    pub async fn list(
        pool: &PgPool,
        user_id: Option<DbId>,
        entity_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {AUDIT_COLUMNS} FROM audit_logs
             WHERE ($1::bigint IS NULL OR user_id = $1)
               AND ($2::text IS NULL OR entity_type = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(user_id)
            .bind(entity_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}

/// Append and read price change log entries.
pub struct PriceChangeLogRepo;

impl PriceChangeLogRepo {
    /// Append a price change entry for a catalog price that actually moved.
    #[allow(clippy::too_many_arguments)]
    pub async fn record(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
        entity_name: &str,
        old_price: f64,
        new_price: f64,
        changed_by: Option<DbId>,
        change_reason: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO price_change_logs
                (entity_type, entity_id, entity_name, old_price, new_price,
                 changed_by, change_reason)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(entity_type)
        .bind(entity_id)
        .bind(entity_name)
        .bind(old_price)
        .bind(new_price)
        .bind(changed_by)
        .bind(change_reason)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List price changes, newest first, optionally for one entity type.
    pub async fn list(
        pool: &PgPool,
        entity_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PriceChangeLog>, sqlx::Error> {
        let query = format!(
            "SELECT {PRICE_COLUMNS} FROM price_change_logs
             WHERE ($1::text IS NULL OR entity_type = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PriceChangeLog>(&query)
            .bind(entity_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
