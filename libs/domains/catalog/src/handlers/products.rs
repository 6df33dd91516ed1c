use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnprocessableEntityResponse,
    },
    UuidPath, ValidatedJson,
};
use utoipa::OpenApi;

use super::CatalogState;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateProduct, Product, ProductFilter, ProductWithCategory, UpdateProduct};

/// OpenAPI documentation for the products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, ProductWithCategory, CreateProduct, UpdateProduct, ProductFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "products", description = "Product management endpoints")
    )
)]
pub struct ProductsApiDoc;

/// Create the product router with all HTTP endpoints
pub fn product_router(state: CatalogState) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}

/// List products joined to their owning category
#[utoipa::path(
    get,
    path = "",
    tag = "products",
    params(ProductFilter),
    responses(
        (status = 200, description = "List of products with their categories", body = Vec<ProductWithCategory>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products(
    State(state): State<CatalogState>,
    Query(filter): Query<ProductFilter>,
) -> CatalogResult<Json<Vec<ProductWithCategory>>> {
    let products = state.service.list_products(filter).await?;
    Ok(Json(products))
}

/// Create a new product under an existing category
#[utoipa::path(
    post,
    path = "",
    tag = "products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product(
    State(state): State<CatalogState>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CatalogResult<impl IntoResponse> {
    let product = state.service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product(
    State(state): State<CatalogState>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Product>> {
    match state.service.get_product(id).await {
        Ok(product) => Ok(Json(product)),
        Err(err @ CatalogError::ProductNotFound(_)) => {
            state.logger.warning(format!("GET product: {}", err));
            Err(err)
        }
        Err(err) => Err(err),
    }
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product(
    State(state): State<CatalogState>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> CatalogResult<Json<Product>> {
    let product = state.service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product(
    State(state): State<CatalogState>,
    UuidPath(id): UuidPath,
) -> CatalogResult<impl IntoResponse> {
    state.service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
