//! Audit log and price-change log models (append-only side records).

use serde::Serialize;
use sitequote_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `audit_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: DbId,
    pub old_values: Option<serde_json::Value>,
    pub new_values: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// A row from the `price_change_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PriceChangeLog {
    pub id: DbId,
    pub entity_type: String,
    pub entity_id: DbId,
    pub entity_name: String,
    pub old_price: f64,
    pub new_price: f64,
    pub changed_by: Option<DbId>,
    pub change_reason: Option<String>,
    pub created_at: Timestamp,
}
