//! Handlers for `/auth`.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use sitequote_core::error::CoreError;
use sitequote_db::models::user::User;
use sitequote_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/v1/auth/login
///
/// Verify credentials and issue an access token. The error message is the
/// same for unknown users and wrong passwords.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let verified = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(invalid_credentials());
    }

    let token = token_for(&user, &state)?;

    Ok(Json(serde_json::json!({
        "access_token": token,
        "token_type": "Bearer",
        "user": user,
    })))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

fn token_for(user: &User, state: &AppState) -> Result<String, AppError> {
    let role = match user.role {
        sitequote_db::models::enums::UserRole::Admin => "admin",
        sitequote_db::models::enums::UserRole::User => "user",
    };
    generate_access_token(user.id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))
}
