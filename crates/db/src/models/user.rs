//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitequote_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::enums::UserRole;

/// A row from the `users` table.
///
/// The password hash never leaves the server; it is skipped on serialization.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. The plaintext password is hashed by the
/// API layer before it reaches the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Defaults to `user` if omitted.
    pub role: Option<UserRole>,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}
