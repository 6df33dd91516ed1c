//! Catalog domain: categories and products over one relational store.
//!
//! Writes go through a per-request [`uow::CatalogUnitOfWork`]: repositories
//! obtained from one unit share one session, see each other's uncommitted
//! writes, and land together (or not at all) on `commit`.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod uow;

pub use error::{CatalogError, CatalogResult};
pub use models::{
    Category, CategoryFilter, CategoryWithProducts, CreateCategory, CreateProduct, Product,
    ProductFilter, ProductWithCategory, UpdateCategory, UpdateProduct,
};
pub use repository::{CategoryRepository, ProductRepository};
pub use service::CatalogService;
pub use uow::CatalogUnitOfWork;
