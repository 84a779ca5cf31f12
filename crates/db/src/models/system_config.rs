//! System configuration key-value entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitequote_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `system_config` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SystemConfig {
    pub id: DbId,
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a config entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSystemConfig {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}

/// DTO for updating a config entry by key. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSystemConfig {
    pub value: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
