use axum::Router;

pub mod health;

use domain_catalog::handlers::{category_router, product_router, CatalogState};
use domain_catalog::CatalogService;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Takes a reference to AppState and initializes the domain services.
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &crate::state::AppState) -> Router {
    let catalog_state = CatalogState::new(
        CatalogService::new(state.db.clone()),
        state.logger.clone(),
    );

    Router::new()
        .nest("/categories", category_router(catalog_state.clone()))
        .nest("/products", product_router(catalog_state))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app
/// router from `create_router`. The /ready endpoint pings the database.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
