//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?skip=&limit=`).
///
/// Used by every paginated listing. Values are clamped via
/// `sitequote_core::search::{clamp_limit, clamp_offset}`.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}
