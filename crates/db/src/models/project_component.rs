//! Project component rows: materials, equipment, labour, tasks, and external
//! costs attached to a project.
//!
//! Priced rows carry a unit-price snapshot taken when the component was
//! attached; later catalog price changes never touch them.

use serde::{Deserialize, Serialize};
use sitequote_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::enums::{StateCode, TaskStatus};

/// A row from the `project_materials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMaterial {
    pub id: DbId,
    pub project_id: DbId,
    pub material_id: DbId,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
    pub created_at: Timestamp,
}

/// A row from the `project_equipment` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectEquipment {
    pub id: DbId,
    pub project_id: DbId,
    pub equipment_id: DbId,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
    pub created_at: Timestamp,
}

/// A row from the `project_labor` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectLabor {
    pub id: DbId,
    pub project_id: DbId,
    pub labour_rate_id: DbId,
    pub persons: i32,
    pub hours: i32,
    pub state_code: StateCode,
    pub unit_rate: f64,
    pub total_cost: f64,
    pub created_at: Timestamp,
}

/// A row from the `project_tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectTask {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `project_external_costs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectExternalCost {
    pub id: DbId,
    pub project_id: DbId,
    pub cost_type: String,
    pub description: Option<String>,
    pub amount: f64,
    pub percentage: Option<f64>,
    pub is_enabled: bool,
    pub created_at: Timestamp,
}

/// DTO for attaching a material to a project.
///
/// The server snapshots the catalog unit cost (unless `unit_price` overrides
/// it) and computes `total_price = quantity x unit_price`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachMaterial {
    pub material_id: DbId,
    /// Defaults to 1 if omitted.
    pub quantity: Option<i32>,
    /// Overrides the current catalog unit cost when set.
    pub unit_price: Option<f64>,
}

/// DTO for attaching equipment to a project; same snapshot rules as
/// [`AttachMaterial`].
#[derive(Debug, Clone, Deserialize)]
pub struct AttachEquipment {
    pub equipment_id: DbId,
    /// Defaults to 1 if omitted.
    pub quantity: Option<i32>,
    /// Overrides the current catalog price when set.
    pub unit_price: Option<f64>,
}

/// DTO for attaching labour to a project.
///
/// The per-person rate is resolved from the referenced labour rate at attach
/// time; `total_cost = persons x hours x unit_rate`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachLabor {
    pub labour_rate_id: DbId,
    /// Defaults to 1 if omitted.
    pub persons: Option<i32>,
    /// Defaults to 8 if omitted.
    pub hours: Option<i32>,
}

/// DTO for creating a project task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectTask {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `pending` if omitted.
    pub status: Option<TaskStatus>,
    pub due_date: Option<Timestamp>,
}

/// DTO for updating a project task. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectTask {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<Timestamp>,
}

/// DTO for attaching an external cost to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExternalCost {
    pub cost_type: String,
    pub description: Option<String>,
    pub amount: f64,
    pub percentage: Option<f64>,
    /// Defaults to enabled if omitted.
    pub is_enabled: Option<bool>,
}
