//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitequote_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::enums::{ProjectPriority, ProjectStatus};
use crate::models::project_component::{
    ProjectEquipment, ProjectExternalCost, ProjectLabor, ProjectMaterial, ProjectTask,
};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub sor_code: Option<String>,
    pub sor_description: Option<String>,
    pub sor_type: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub manager_id: DbId,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub budget: f64,
    pub actual_cost: f64,
    pub progress: i32,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project together with all of its component rows, as returned by
/// `GET /projects/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub materials: Vec<ProjectMaterial>,
    pub equipment: Vec<ProjectEquipment>,
    pub labor: Vec<ProjectLabor>,
    pub tasks: Vec<ProjectTask>,
    pub external_costs: Vec<ProjectExternalCost>,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub sor_code: Option<String>,
    pub sor_description: Option<String>,
    pub sor_type: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub manager_id: DbId,
    /// Defaults to `planning` if omitted.
    pub status: Option<ProjectStatus>,
    /// Defaults to `medium` if omitted.
    pub priority: Option<ProjectPriority>,
    pub budget: Option<f64>,
    pub actual_cost: Option<f64>,
    pub progress: Option<i32>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

/// DTO for updating an existing project. All fields are optional; absent
/// fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sor_code: Option<String>,
    pub sor_description: Option<String>,
    pub sor_type: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<ProjectPriority>,
    pub budget: Option<f64>,
    pub actual_cost: Option<f64>,
    pub progress: Option<i32>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

/// Basic list filters for `GET /projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilters {
    pub search: Option<String>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<ProjectPriority>,
    pub manager_id: Option<DbId>,
    pub category: Option<String>,
}
