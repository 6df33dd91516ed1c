//! Catalog repositories: thin specializations of the generic repository.
//!
//! Each adds the entity's own read queries and nothing else; all writes go
//! through the shared staging discipline of [`database::Repository`], so
//! atomicity stays with the owning unit of work.

use std::sync::Arc;

use database::{Repository, Session, StoreResult};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::entity::{category, product};
use crate::models::page_limit;

/// Category reads plus generic CRUD
pub struct CategoryRepository {
    base: Repository<category::Entity>,
}

impl CategoryRepository {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Self {
            base: Repository::new(session),
        }
    }

    pub async fn all(&self, limit: u64, offset: u64) -> StoreResult<Vec<category::Model>> {
        self.base
            .fetch(
                category::Entity::find()
                    .order_by_asc(category::Column::CreatedAt)
                    .limit(page_limit(limit))
                    .offset(offset),
            )
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<category::Model>> {
        self.base.find_one(category::Column::Id.eq(id)).await
    }

    pub async fn find_by_name(&self, name: &str) -> StoreResult<Option<category::Model>> {
        self.base.find_one(category::Column::Name.eq(name)).await
    }

    /// Categories having at least one product
    pub async fn having_products(
        &self,
        limit: u64,
        offset: u64,
    ) -> StoreResult<Vec<category::Model>> {
        self.base
            .fetch(
                category::Entity::find()
                    .inner_join(product::Entity)
                    .distinct()
                    .order_by_asc(category::Column::CreatedAt)
                    .limit(page_limit(limit))
                    .offset(offset),
            )
            .await
    }

    pub async fn insert(&self, model: category::ActiveModel) -> StoreResult<category::Model> {
        self.base.insert(model).await
    }

    pub async fn update(&self, model: category::ActiveModel) -> StoreResult<category::Model> {
        self.base.update(model).await
    }

    pub async fn delete(&self, model: category::ActiveModel) -> StoreResult<u64> {
        self.base.delete(model).await
    }
}

/// Product reads plus generic CRUD
pub struct ProductRepository {
    base: Repository<product::Entity>,
}

impl ProductRepository {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Self {
            base: Repository::new(session),
        }
    }

    pub async fn all(&self, limit: u64, offset: u64) -> StoreResult<Vec<product::Model>> {
        self.base
            .fetch(
                product::Entity::find()
                    .order_by_asc(product::Column::CreatedAt)
                    .limit(page_limit(limit))
                    .offset(offset),
            )
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<product::Model>> {
        self.base.find_one(product::Column::Id.eq(id)).await
    }

    /// Products restricted to one category
    pub async fn by_category(
        &self,
        category_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> StoreResult<Vec<product::Model>> {
        self.base
            .fetch(
                product::Entity::find()
                    .filter(product::Column::CategoryId.eq(category_id))
                    .order_by_asc(product::Column::CreatedAt)
                    .limit(page_limit(limit))
                    .offset(offset),
            )
            .await
    }

    /// Products joined to their owning category
    pub async fn with_category(
        &self,
        category_id: Option<Uuid>,
        limit: u64,
        offset: u64,
    ) -> StoreResult<Vec<(product::Model, Option<category::Model>)>> {
        let mut select = product::Entity::find().find_also_related(category::Entity);

        if let Some(category_id) = category_id {
            select = select.filter(product::Column::CategoryId.eq(category_id));
        }

        self.base
            .fetch_with(
                select
                    .order_by_asc(product::Column::CreatedAt)
                    .limit(page_limit(limit))
                    .offset(offset),
            )
            .await
    }

    pub async fn insert(&self, model: product::ActiveModel) -> StoreResult<product::Model> {
        self.base.insert(model).await
    }

    pub async fn update(&self, model: product::ActiveModel) -> StoreResult<product::Model> {
        self.base.update(model).await
    }

    pub async fn delete(&self, model: product::ActiveModel) -> StoreResult<u64> {
        self.base.delete(model).await
    }
}
