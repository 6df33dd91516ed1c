use sea_orm::ActiveValue::Set;
use sea_orm::{DatabaseConnection, IntoActiveModel};
use uuid::Uuid;
use validator::Validate;

use crate::entity::{category, product};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CategoryFilter, CategoryWithProducts, CreateCategory, CreateProduct, Product,
    ProductFilter, ProductWithCategory, UpdateCategory, UpdateProduct, MAX_PAGE_SIZE,
};
use crate::uow::CatalogUnitOfWork;

/// Service layer for catalog business logic.
///
/// Each call runs in its own [`CatalogUnitOfWork`]: reads simply drop the
/// unit (releasing the session), writes commit it. Nothing is shared
/// between requests except the connection pool handle.
#[derive(Clone)]
pub struct CatalogService {
    db: DatabaseConnection,
}

impl CatalogService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// A fresh unit of work over this service's store
    pub fn begin(&self) -> CatalogUnitOfWork {
        CatalogUnitOfWork::new(self.db.clone())
    }

    // ============ Categories ============

    pub async fn list_categories(&self, filter: CategoryFilter) -> CatalogResult<Vec<Category>> {
        let uow = self.begin();
        let rows = if filter.has_products {
            uow.categories()
                .having_products(filter.limit, filter.offset)
                .await?
        } else {
            uow.categories().all(filter.limit, filter.offset).await?
        };
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_category(&self, id: Uuid) -> CatalogResult<Category> {
        let uow = self.begin();
        let row = uow
            .categories()
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;
        Ok(row.into())
    }

    /// One category with its products, both flat and bounded
    pub async fn category_with_products(&self, id: Uuid) -> CatalogResult<CategoryWithProducts> {
        let uow = self.begin();
        let row = uow
            .categories()
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;
        let products = uow.products().by_category(id, MAX_PAGE_SIZE, 0).await?;

        Ok(CategoryWithProducts {
            category: row.into(),
            products: products.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let uow = self.begin();
        if uow.categories().find_by_name(&input.name).await?.is_some() {
            return Err(CatalogError::DuplicateName(input.name));
        }

        let created = uow.categories().insert(input.into()).await?;
        uow.commit().await?;

        tracing::info!(category_id = %created.id, "Created category");
        Ok(created.into())
    }

    /// Full-record overwrite of one category
    pub async fn update_category(&self, id: Uuid, input: UpdateCategory) -> CatalogResult<Category> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        if let Some(body_id) = input.id {
            if body_id != id {
                return Err(CatalogError::IdMismatch { path: id, body: body_id });
            }
        }

        let uow = self.begin();
        let existing = uow
            .categories()
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        if input.name != existing.name {
            if let Some(other) = uow.categories().find_by_name(&input.name).await? {
                if other.id != id {
                    return Err(CatalogError::DuplicateName(input.name));
                }
            }
        }

        let model = category::ActiveModel {
            id: Set(id),
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(existing.created_at),
            updated_at: Set(chrono::Utc::now().into()),
        };

        let updated = uow.categories().update(model).await?;
        uow.commit().await?;

        tracing::info!(category_id = %id, "Updated category");
        Ok(updated.into())
    }

    /// Delete a category and every product it owns, atomically.
    ///
    /// Both repositories stage into the same unit of work; either the
    /// category and all its products disappear together, or none do.
    pub async fn delete_category(&self, id: Uuid) -> CatalogResult<()> {
        let uow = self.begin();
        let existing = uow
            .categories()
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        // Earlier in-unit deletes are visible to this read, so the loop
        // drains the category page by page and terminates.
        loop {
            let batch = uow.products().by_category(id, MAX_PAGE_SIZE, 0).await?;
            if batch.is_empty() {
                break;
            }
            for row in batch {
                uow.products().delete(row.into_active_model()).await?;
            }
        }

        uow.categories().delete(existing.into_active_model()).await?;
        uow.commit().await?;

        tracing::info!(category_id = %id, "Deleted category with its products");
        Ok(())
    }

    // ============ Products ============

    pub async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> CatalogResult<Vec<ProductWithCategory>> {
        let uow = self.begin();
        let rows = uow
            .products()
            .with_category(filter.category_id, filter.limit, filter.offset)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(product, category)| ProductWithCategory {
                product: product.into(),
                category: category.map(Into::into),
            })
            .collect())
    }

    pub async fn get_product(&self, id: Uuid) -> CatalogResult<Product> {
        let uow = self.begin();
        let row = uow
            .products()
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;
        Ok(row.into())
    }

    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let uow = self.begin();
        if uow
            .categories()
            .find_by_id(input.category_id)
            .await?
            .is_none()
        {
            return Err(CatalogError::UnknownCategory(input.category_id));
        }

        let created = uow.products().insert(input.into()).await?;
        uow.commit().await?;

        tracing::info!(product_id = %created.id, "Created product");
        Ok(created.into())
    }

    /// Full-record overwrite of one product
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        if let Some(body_id) = input.id {
            if body_id != id {
                return Err(CatalogError::IdMismatch { path: id, body: body_id });
            }
        }

        let uow = self.begin();
        let existing = uow
            .products()
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        if input.category_id != existing.category_id
            && uow
                .categories()
                .find_by_id(input.category_id)
                .await?
                .is_none()
        {
            return Err(CatalogError::UnknownCategory(input.category_id));
        }

        let model = product::ActiveModel {
            id: Set(id),
            name: Set(input.name),
            description: Set(input.description),
            price_cents: Set(input.price_cents),
            category_id: Set(input.category_id),
            created_at: Set(existing.created_at),
            updated_at: Set(chrono::Utc::now().into()),
        };

        let updated = uow.products().update(model).await?;
        uow.commit().await?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated.into())
    }

    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        let uow = self.begin();
        let existing = uow
            .products()
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        uow.products().delete(existing.into_active_model()).await?;
        uow.commit().await?;

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }
}
