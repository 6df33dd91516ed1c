use sea_orm::DbErr;

/// Error type for session and repository operations.
///
/// Cloneable so the session can retain the first write failure and replay it
/// from `commit()` when the caller ignored the original result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A lookup or update addressed a record that does not exist
    #[error("record not found")]
    NotFound,

    /// A unique lookup matched more than one record
    #[error("lookup matched more than one record")]
    Conflict,

    /// The store rejected an operation or the commit
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// Operation on a disposed unit of work
    #[error("unit of work has been disposed")]
    InvalidState,
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotUpdated => StoreError::NotFound,
            DbErr::RecordNotFound(_) => StoreError::NotFound,
            other => StoreError::Persistence(other.to_string()),
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
