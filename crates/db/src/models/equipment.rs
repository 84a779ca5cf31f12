//! Equipment catalog entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitequote_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::enums::StateCode;

/// A row from the `equipment` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub sales_part_no: String,
    pub equipment_name: String,
    pub category: String,
    pub state_code: StateCode,
    pub price: f64,
    pub price_incl_tax: f64,
    pub sor_code: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating new equipment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEquipment {
    pub sales_part_no: String,
    pub equipment_name: String,
    pub category: String,
    pub state_code: StateCode,
    pub price: f64,
    pub price_incl_tax: f64,
    pub sor_code: Option<String>,
}

/// DTO for updating existing equipment. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEquipment {
    pub sales_part_no: Option<String>,
    pub equipment_name: Option<String>,
    pub category: Option<String>,
    pub state_code: Option<StateCode>,
    pub price: Option<f64>,
    pub price_incl_tax: Option<f64>,
    pub sor_code: Option<String>,
}

/// Optional filters for equipment search. Unset filters impose no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EquipmentFilters {
    pub search: Option<String>,
    pub category: Option<String>,
    pub state_code: Option<StateCode>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}
