//! Route definitions for the `/config` key-value resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::system_config;
use crate::state::AppState;

/// Routes mounted at `/config`.
///
/// ```text
/// GET  /         -> list
/// POST /         -> create
/// GET  /{key}    -> get_by_key
/// PUT  /{key}    -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(system_config::list).post(system_config::create))
        .route(
            "/{key}",
            get(system_config::get_by_key).put(system_config::update),
        )
}
