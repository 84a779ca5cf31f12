//! Repository for the `system_config` key-value table.

use sqlx::PgPool;

use crate::models::system_config::{CreateSystemConfig, SystemConfig, UpdateSystemConfig};

/// Column list for `system_config` queries.
const COLUMNS: &str = "id, key, value, description, is_active, created_at, updated_at";

/// Provides CRUD operations for system configuration entries.
pub struct SystemConfigRepo;

impl SystemConfigRepo {
    /// Insert a new config entry. A duplicate key violates
    /// `uq_system_config_key`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSystemConfig,
    ) -> Result<SystemConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO system_config (key, value, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SystemConfig>(&query)
            .bind(&input.key)
            .bind(&input.value)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a config entry by key.
    pub async fn find_by_key(
        pool: &PgPool,
        key: &str,
    ) -> Result<Option<SystemConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM system_config WHERE key = $1");
        sqlx::query_as::<_, SystemConfig>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// List all config entries ordered by key.
    pub async fn list(pool: &PgPool) -> Result<Vec<SystemConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM system_config ORDER BY key");
        sqlx::query_as::<_, SystemConfig>(&query).fetch_all(pool).await
    }

    /// Update a config entry by key. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the key does not exist.
    pub async fn update_by_key(
        pool: &PgPool,
        key: &str,
        input: &UpdateSystemConfig,
    ) -> Result<Option<SystemConfig>, sqlx::Error> {
        let query = format!(
            "UPDATE system_config SET
                value = COALESCE($2, value),
                description = COALESCE($3, description),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
             WHERE key = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SystemConfig>(&query)
            .bind(key)
            .bind(&input.value)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
