use crate::types::DbId;

/// Domain error taxonomy shared across crates.
///
/// The API layer maps these onto HTTP status codes: `NotFound` -> 404,
/// `Validation` -> 422, `Conflict` -> 409, `Unauthorized` -> 401,
/// `Forbidden` -> 403, `Internal` -> 500.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
