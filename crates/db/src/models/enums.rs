//! Closed enum types shared by models, matching the PostgreSQL enum types
//! created in the initial migration. Wire form is snake_case (states are
//! uppercase postal codes).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
    OnHold,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "quote_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "quote_item_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QuoteItemType {
    Material,
    Equipment,
    Labor,
    Task,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Task,
    Project,
    System,
    Budget,
    Deadline,
    PriceChange,
    LaborOverrun,
    BudgetOverrun,
    Overdue,
    MaterialShortage,
    EquipmentMaintenance,
    QualityIssue,
    SafetyAlert,
    WeatherAlert,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_severity", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Australian state and territory codes used for labour and catalog pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "state_code", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum StateCode {
    Nsw,
    Vic,
    Qld,
    Nt,
    Sa,
    Wa,
    Tas,
    Act,
}

impl StateCode {
    /// The postal code as it appears on the wire and in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nsw => "NSW",
            Self::Vic => "VIC",
            Self::Qld => "QLD",
            Self::Nt => "NT",
            Self::Sa => "SA",
            Self::Wa => "WA",
            Self::Tas => "TAS",
            Self::Act => "ACT",
        }
    }
}
