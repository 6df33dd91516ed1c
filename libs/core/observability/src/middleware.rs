//! Axum middleware for request-lifecycle logging.

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use serde_json::json;
use std::time::Instant;

use crate::{LogLevel, Logger};

/// Middleware wrapping every request with entry/exit markers.
///
/// Emits one fixed-format entry before the handler runs and one after it
/// returns, both through the injected [`Logger`]. Handlers may add their own
/// per-branch markers (e.g. not-found outcomes) through the same logger.
/// No retry or suppression: a sink that cannot write is a configuration
/// bug, not a runtime condition to recover from.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{middleware, Router};
/// use observability::request_logging;
///
/// let app = Router::new()
///     .route("/", get(handler))
///     .layer(middleware::from_fn_with_state(logger.clone(), request_logging));
/// ```
pub async fn request_logging(
    State(logger): State<Logger>,
    matched_path: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = matched_path
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    logger.log_with(
        LogLevel::Information,
        format!("--> {} {}", method, path),
        Some(json!({"method": method.clone(), "path": path.clone()})),
    );

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    logger.log_with(
        LogLevel::Information,
        format!("<-- {} {} {}", method, path, status),
        Some(json!({
            "method": method,
            "path": path,
            "status": status,
            "elapsed_ms": elapsed_ms,
        })),
    );

    response
}
