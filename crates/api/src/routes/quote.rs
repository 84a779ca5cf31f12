//! Route definitions for the `/quotes` resource and its items.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::quote;
use crate::state::AppState;

/// Routes mounted at `/quotes`.
///
/// ```text
/// GET    /                        -> list (search, status)
/// POST   /                        -> create (auth; items allowed inline)
/// GET    /{id}                    -> get_by_id (with items)
/// PUT    /{id}                    -> update (auth)
/// DELETE /{id}                    -> delete (auth; items cascade)
///
/// GET    /{id}/items              -> list_items
/// POST   /{id}/items              -> add_item (auth)
/// PUT    /{id}/items/{item_id}    -> update_item (auth)
/// DELETE /{id}/items/{item_id}    -> delete_item (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quote::list).post(quote::create))
        .route(
            "/{id}",
            get(quote::get_by_id)
                .put(quote::update)
                .delete(quote::delete),
        )
        .route("/{id}/items", get(quote::list_items).post(quote::add_item))
        .route(
            "/{id}/items/{item_id}",
            put(quote::update_item).delete(quote::delete_item),
        )
}
