//! # Axum Helpers
//!
//! Shared glue for the HTTP surface:
//!
//! - **[`errors`]**: the stable error envelope and the application error
//!   type that renders it
//! - **[`extractors`]**: custom extractors (UUID path, validated JSON)
//! - **[`server`]**: router assembly, serving, graceful shutdown
//! - **[`health`]**: liveness endpoint

pub mod errors;
pub mod extractors;
pub mod health;
pub mod server;

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};

// Re-export server helpers
pub use server::{create_app, create_router, shutdown_signal};

// Re-export health types
pub use health::{health_router, HealthResponse};
