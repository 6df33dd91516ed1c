use axum::{routing::get, Json, Router};
use core_config::AppInfo;
use serde::Serialize;
use utoipa::ToSchema;

/// Liveness response: the process is up and can answer
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: String,
    pub version: String,
}

/// Router exposing `/health` for liveness checks.
///
/// Readiness (with real dependency checks) is the app's job; this endpoint
/// only says the process is serving.
pub fn health_router(info: AppInfo) -> Router {
    Router::new().route(
        "/health",
        get(move || {
            let info = info.clone();
            async move {
                Json(HealthResponse {
                    status: "ok",
                    name: info.name,
                    version: info.version,
                })
            }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_endpoint_reports_app_info() {
        let app = health_router(AppInfo {
            name: "catalog-api".to_string(),
            version: "0.1.0".to_string(),
        });

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["name"], "catalog-api");
    }
}
