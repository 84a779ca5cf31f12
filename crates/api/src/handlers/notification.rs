//! Handlers for the `/notifications` resource.
//!
//! All endpoints operate on the authenticated user via [`AuthUser`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sitequote_core::error::CoreError;
use sitequote_core::search::{clamp_limit, clamp_offset, DEFAULT_NOTIFICATION_LIMIT, MAX_LIST_LIMIT};
use sitequote_core::types::DbId;
use sitequote_db::models::notification::{CreateNotification, Notification};
use sitequote_db::repositories::{NotificationRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/v1/notifications
///
/// List the authenticated user's notifications, newest first.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<Vec<Notification>>> {
    let limit = clamp_limit(params.limit, DEFAULT_NOTIFICATION_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.skip);
    let unread_only = params.unread_only.unwrap_or(false);

    let notifications =
        NotificationRepo::list_for_user(&state.pool, auth.user_id, unread_only, limit, offset)
            .await?;
    Ok(Json(notifications))
}

/// GET /api/v1/notifications/unread
pub async fn list_unread(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<Vec<Notification>>> {
    let limit = clamp_limit(params.limit, DEFAULT_NOTIFICATION_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.skip);

    let notifications =
        NotificationRepo::list_for_user(&state.pool, auth.user_id, true, limit, offset).await?;
    Ok(Json(notifications))
}

/// POST /api/v1/notifications
///
/// Create a notification for any user (system alerts target other users).
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<Notification>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    if UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "user_id {} references no user",
            input.user_id
        ))));
    }

    let notification = NotificationRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// PUT /api/v1/notifications/{id}/read
///
/// Mark a single notification as read. 404 if it does not exist for the
/// authenticated user.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let found = NotificationRepo::mark_read(&state.pool, id, auth.user_id).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/notifications/read-all
///
/// Mark all of the authenticated user's notifications as read and report how
/// many were affected. Idempotent: a second call reports 0.
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "marked_read": count })))
}
