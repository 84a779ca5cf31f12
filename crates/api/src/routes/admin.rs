//! Route definitions for `/admin` (admin role required by the handlers).

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET /dashboard/stats    -> stats (extended counters)
/// GET /projects           -> projects (advanced filters + rollups)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(admin::stats))
        .route("/projects", get(admin::projects))
}
