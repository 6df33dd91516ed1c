//! Last-resort translation of unhandled failures into the stable envelope.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_helpers::errors::{messages, ErrorResponse};
use futures::FutureExt;

use crate::{LogLevel, Logger};

/// Outermost middleware: catches anything that unwinds out of the pipeline.
///
/// Anticipated conditions (not-found, validation, conflicts) are translated
/// by the handlers and never get here. Whatever does arrive is logged once
/// at Critical with its payload text and answered with the fixed
/// internal-error envelope; internal detail never reaches the response.
pub async fn translate_panics(
    State(logger): State<Logger>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            logger.log(
                LogLevel::Critical,
                format!(
                    "Unhandled failure in request pipeline: {}",
                    panic_message(&panic)
                ),
            );

            let body = Json(ErrorResponse {
                error: "InternalServerError".to_string(),
                message: messages::INTERNAL_ERROR.to_string(),
                details: None,
            });

            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
