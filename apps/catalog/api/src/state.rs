//! Application state management.
//!
//! One instance per process, cloned into the pieces that need it. Cloning
//! is cheap: the connection is a pool handle and the logger shares its sink.

use database::postgres::DatabaseConnection;
use observability::Logger;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: DatabaseConnection,
    /// Process-wide structured logger, injected into every consumer
    pub logger: Logger,
}
