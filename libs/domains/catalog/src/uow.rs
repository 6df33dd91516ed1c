//! Unit of work over the catalog repositories.

use std::sync::Arc;

use database::{Session, StoreResult};
use once_cell::sync::OnceCell;
use sea_orm::DatabaseConnection;

use crate::repository::{CategoryRepository, ProductRepository};

/// One unit of work per request: one session, one memoized repository per
/// entity type, one atomic commit.
///
/// Repositories obtained from the same unit share the session's
/// transaction, so they observe each other's uncommitted writes; two units
/// never share staged state. After a successful `commit` the unit stays
/// usable and further work lands in a fresh transaction. Dropping the unit
/// releases the session whether or not `commit` was called.
pub struct CatalogUnitOfWork {
    session: Arc<Session>,
    categories: OnceCell<CategoryRepository>,
    products: OnceCell<ProductRepository>,
}

impl CatalogUnitOfWork {
    /// Bind to a connection handle. No I/O happens until a repository is
    /// first used.
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            session: Arc::new(Session::new(conn)),
            categories: OnceCell::new(),
            products: OnceCell::new(),
        }
    }

    /// Category repository, constructed on first access and reused for the
    /// life of this unit.
    pub fn categories(&self) -> &CategoryRepository {
        self.categories
            .get_or_init(|| CategoryRepository::new(self.session.clone()))
    }

    /// Product repository, constructed on first access and reused for the
    /// life of this unit.
    pub fn products(&self) -> &ProductRepository {
        self.products
            .get_or_init(|| ProductRepository::new(self.session.clone()))
    }

    /// Flush everything staged on this unit as one atomic operation.
    ///
    /// Fails with the first staged error if any repository operation
    /// failed, or with a persistence error if the store rejects the write;
    /// either way nothing staged lands.
    pub async fn commit(&self) -> StoreResult<()> {
        self.session.commit().await
    }

    /// Roll back anything open and reject all further use of this unit.
    pub async fn dispose(&self) {
        self.session.dispose().await
    }

    pub async fn is_disposed(&self) -> bool {
        self.session.is_disposed().await
    }
}
