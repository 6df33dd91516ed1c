//! HTTP surface for the catalog domain.

pub mod categories;
pub mod products;

pub use categories::{category_router, CategoriesApiDoc};
pub use products::{product_router, ProductsApiDoc};

use observability::Logger;

use crate::service::CatalogService;

/// State shared by the catalog routers: the service plus the injected
/// process-wide logger (handlers use it for per-branch markers).
#[derive(Clone)]
pub struct CatalogState {
    pub service: CatalogService,
    pub logger: Logger,
}

impl CatalogState {
    pub fn new(service: CatalogService, logger: Logger) -> Self {
        Self { service, logger }
    }
}
