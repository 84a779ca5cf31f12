//! Material catalog entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitequote_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::enums::StateCode;

/// A row from the `materials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Material {
    pub id: DbId,
    pub sales_part_no: String,
    pub description: String,
    pub name: Option<String>,
    pub state_code: StateCode,
    pub qty: i32,
    pub unit_cost: f64,
    pub image_url: Option<String>,
    pub sor_code: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new material.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaterial {
    pub sales_part_no: String,
    pub description: String,
    pub name: Option<String>,
    pub state_code: StateCode,
    /// Defaults to 1 if omitted.
    pub qty: Option<i32>,
    pub unit_cost: f64,
    pub image_url: Option<String>,
    pub sor_code: Option<String>,
}

/// DTO for updating an existing material. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMaterial {
    pub sales_part_no: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub state_code: Option<StateCode>,
    pub qty: Option<i32>,
    pub unit_cost: Option<f64>,
    pub image_url: Option<String>,
    pub sor_code: Option<String>,
}

/// Optional filters for material search. Unset filters impose no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialFilters {
    pub search: Option<String>,
    pub state_code: Option<StateCode>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}
