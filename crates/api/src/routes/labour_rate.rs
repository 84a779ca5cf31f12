//! Route definitions for the `/labour-rates` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::labour_rate;
use crate::state::AppState;

/// Routes mounted at `/labour-rates`.
///
/// ```text
/// GET    /                                  -> list (?state_code)
/// POST   /                                  -> create
/// GET    /rate/{labour_type}/{state_code}   -> effective_rate
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update (rate changes are logged)
/// DELETE /{id}                              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(labour_rate::list).post(labour_rate::create))
        .route(
            "/rate/{labour_type}/{state_code}",
            get(labour_rate::effective_rate),
        )
        .route(
            "/{id}",
            get(labour_rate::get_by_id)
                .put(labour_rate::update)
                .delete(labour_rate::delete),
        )
}
