//! Route definitions for the `/notifications` resource.
//!
//! Every endpoint requires authentication; the subject is always the
//! authenticated user.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET  /              -> list (?unread_only, skip, limit)
/// POST /              -> create
/// GET  /unread        -> list_unread
/// PUT  /read-all      -> mark_all_read (returns marked_read count)
/// PUT  /{id}/read     -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list).post(notification::create))
        .route("/unread", get(notification::list_unread))
        .route("/read-all", put(notification::mark_all_read))
        .route("/{id}/read", put(notification::mark_read))
}
