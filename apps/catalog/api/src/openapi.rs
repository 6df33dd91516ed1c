use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "REST API exposing the product catalog: categories and products over one relational store"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/categories", api = domain_catalog::handlers::CategoriesApiDoc),
        (path = "/products", api = domain_catalog::handlers::ProductsApiDoc)
    )
)]
pub struct ApiDoc;
