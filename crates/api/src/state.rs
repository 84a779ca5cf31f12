use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable: the pool is internally reference-counted and
/// the config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sitequote_db::DbPool,
    /// Server configuration (JWT, CORS, rate-card parameters).
    pub config: Arc<ServerConfig>,
}
