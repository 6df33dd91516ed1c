use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::StoreError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Category with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Referenced category {0} does not exist")]
    UnknownCategory(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Body id {body} does not match path id {path}")]
    IdMismatch { path: Uuid, body: Uuid },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses.
///
/// Everything here is an anticipated condition resolved into a specific
/// status; only `Persistence`/`InvalidState` fall through to the masked
/// internal-error rendering.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CategoryNotFound(id) => {
                AppError::NotFound(format!("Category {} not found", id))
            }
            CatalogError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            CatalogError::DuplicateName(name) => {
                AppError::Conflict(format!("Category with name '{}' already exists", name))
            }
            CatalogError::UnknownCategory(id) => {
                AppError::UnprocessableEntity(format!("Referenced category {} does not exist", id))
            }
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::IdMismatch { path, body } => AppError::BadRequest(format!(
                "Body id {} does not match path id {}",
                body, path
            )),
            CatalogError::Store(StoreError::NotFound) => {
                AppError::NotFound("Record not found".to_string())
            }
            CatalogError::Store(StoreError::Conflict) => {
                AppError::Conflict("Lookup matched more than one record".to_string())
            }
            CatalogError::Store(StoreError::Persistence(msg)) => {
                AppError::InternalServerError(msg)
            }
            CatalogError::Store(StoreError::InvalidState) => {
                // Programmer error: a unit of work was used after dispose
                debug_assert!(false, "unit of work used after dispose");
                AppError::InternalServerError("unit of work used after dispose".to_string())
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
