use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    UuidPath, ValidatedJson,
};
use utoipa::OpenApi;

use super::CatalogState;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CategoryFilter, CategoryWithProducts, CreateCategory, UpdateCategory,
};

/// OpenAPI documentation for the categories API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        get_category,
        update_category,
        delete_category,
        category_products,
    ),
    components(
        schemas(Category, CategoryWithProducts, CreateCategory, UpdateCategory, CategoryFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "categories", description = "Category management endpoints")
    )
)]
pub struct CategoriesApiDoc;

/// Create the category router with all HTTP endpoints
pub fn category_router(state: CatalogState) -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route("/{id}/products", get(category_products))
        .with_state(state)
}

/// List categories, optionally restricted to those having products
#[utoipa::path(
    get,
    path = "",
    tag = "categories",
    params(CategoryFilter),
    responses(
        (status = 200, description = "List of categories", body = Vec<Category>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories(
    State(state): State<CatalogState>,
    Query(filter): Query<CategoryFilter>,
) -> CatalogResult<Json<Vec<Category>>> {
    let categories = state.service.list_categories(filter).await?;
    Ok(Json(categories))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "",
    tag = "categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created successfully", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category(
    State(state): State<CatalogState>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CatalogResult<impl IntoResponse> {
    let category = state.service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category(
    State(state): State<CatalogState>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Category>> {
    match state.service.get_category(id).await {
        Ok(category) => Ok(Json(category)),
        Err(err @ CatalogError::CategoryNotFound(_)) => {
            state.logger.warning(format!("GET category: {}", err));
            Err(err)
        }
        Err(err) => Err(err),
    }
}

/// Replace a category
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated successfully", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category(
    State(state): State<CatalogState>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CatalogResult<Json<Category>> {
    let category = state.service.update_category(id, input).await?;
    Ok(Json(category))
}

/// Delete a category together with its products
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category(
    State(state): State<CatalogState>,
    UuidPath(id): UuidPath,
) -> CatalogResult<impl IntoResponse> {
    state.service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// A category's products
#[utoipa::path(
    get,
    path = "/{id}/products",
    tag = "categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category with its products", body = CategoryWithProducts),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn category_products(
    State(state): State<CatalogState>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<CategoryWithProducts>> {
    let result = state.service.category_with_products(id).await?;
    Ok(Json(result))
}
