//! Notification entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitequote_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::enums::{NotificationSeverity, NotificationType};

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub severity: NotificationSeverity,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub related_project_id: Option<DbId>,
    pub related_entity_id: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotification {
    pub user_id: DbId,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Defaults to `medium` if omitted.
    pub severity: Option<NotificationSeverity>,
    pub title: String,
    pub message: String,
    pub related_project_id: Option<DbId>,
    pub related_entity_id: Option<String>,
}
