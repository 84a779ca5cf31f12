//! Labour rate entity model and DTOs.
//!
//! A labour rate is keyed by (labour_type, state_code); the pair is unique
//! so rate resolution is an exact two-column lookup.

use serde::{Deserialize, Serialize};
use sitequote_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::enums::StateCode;

/// A row from the `labour_rates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LabourRate {
    pub id: DbId,
    pub labour_type: String,
    pub cost_per_person: f64,
    pub hours: f64,
    pub state_code: StateCode,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new labour rate.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLabourRate {
    pub labour_type: String,
    pub cost_per_person: f64,
    /// Defaults to 1 if omitted.
    pub hours: Option<f64>,
    pub state_code: StateCode,
}

/// DTO for updating an existing labour rate. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLabourRate {
    pub labour_type: Option<String>,
    pub cost_per_person: Option<f64>,
    pub hours: Option<f64>,
    pub state_code: Option<StateCode>,
}
