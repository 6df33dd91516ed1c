//! Unit-of-work tests for the catalog domain
//!
//! These run against a real PostgreSQL container and verify the data-layer
//! contracts: commit atomicity across repositories, read-your-writes inside
//! one unit, isolation between units, and disposal semantics.

use domain_catalog::entity::{category, product};
use domain_catalog::{CatalogUnitOfWork, CategoryRepository};
use database::StoreError;
use sea_orm::ActiveValue::Set;
use test_utils::{TestDataBuilder, TestDatabase};
use uuid::Uuid;

fn category_model(name: &str) -> category::ActiveModel {
    let now = chrono::Utc::now();
    category::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(name.to_string()),
        description: Set(String::new()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
}

fn product_model(name: &str, category_id: Uuid) -> product::ActiveModel {
    let now = chrono::Utc::now();
    product::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(name.to_string()),
        description: Set(String::new()),
        price_cents: Set(1999),
        category_id: Set(category_id),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
}

#[tokio::test]
async fn test_commit_lands_writes_from_both_repositories_together() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("uow_commit_both");

    let uow = CatalogUnitOfWork::new(db.connection());
    let cat = uow
        .categories()
        .insert(category_model(&builder.name("category", "main")))
        .await
        .unwrap();
    uow.products()
        .insert(product_model(&builder.name("product", "a"), cat.id))
        .await
        .unwrap();
    uow.products()
        .insert(product_model(&builder.name("product", "b"), cat.id))
        .await
        .unwrap();

    // Nothing visible outside the unit before commit
    let other = CatalogUnitOfWork::new(db.connection());
    assert!(other
        .categories()
        .find_by_id(cat.id)
        .await
        .unwrap()
        .is_none());

    uow.commit().await.unwrap();

    // Everything visible after commit
    let fresh = CatalogUnitOfWork::new(db.connection());
    assert!(fresh
        .categories()
        .find_by_id(cat.id)
        .await
        .unwrap()
        .is_some());
    let products = fresh.products().by_category(cat.id, 50, 0).await.unwrap();
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn test_reads_inside_unit_see_uncommitted_writes() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("uow_read_own_writes");

    let uow = CatalogUnitOfWork::new(db.connection());
    let cat = uow
        .categories()
        .insert(category_model(&builder.name("category", "pending")))
        .await
        .unwrap();

    // Same unit sees the staged row
    let seen = uow.categories().find_by_id(cat.id).await.unwrap();
    assert_eq!(seen.map(|c| c.id), Some(cat.id));

    // Dropped without commit: the row never existed for anyone else
    drop(uow);
    let fresh = CatalogUnitOfWork::new(db.connection());
    assert!(fresh
        .categories()
        .find_by_id(cat.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_failed_update_fails_commit_and_discards_valid_writes() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("uow_poisoned_commit");

    let uow = CatalogUnitOfWork::new(db.connection());

    // A perfectly valid staged insert...
    let cat = uow
        .categories()
        .insert(category_model(&builder.name("category", "valid")))
        .await
        .unwrap();

    // ...followed by an update addressing a record that does not exist
    let err = uow
        .categories()
        .update(category_model(&builder.name("category", "ghost")))
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound);

    // Commit reports the failure and applies nothing, the valid insert included
    assert_eq!(uow.commit().await, Err(StoreError::NotFound));

    let fresh = CatalogUnitOfWork::new(db.connection());
    assert!(fresh
        .categories()
        .find_by_id(cat.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_add_then_commit_assigns_durable_identifier() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("uow_books_scenario");
    let name = builder.name("category", "books");

    let uow = CatalogUnitOfWork::new(db.connection());
    let created = uow
        .categories()
        .insert(category_model(&name))
        .await
        .unwrap();
    uow.commit().await.unwrap();

    assert_ne!(created.id, Uuid::nil());

    let fresh = CatalogUnitOfWork::new(db.connection());
    let listed = fresh.categories().all(200, 0).await.unwrap();
    let matching: Vec<_> = listed.into_iter().filter(|c| c.name == name).collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].id, created.id);
}

#[tokio::test]
async fn test_delete_then_commit_makes_row_absent() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("uow_delete");

    let uow = CatalogUnitOfWork::new(db.connection());
    let cat = uow
        .categories()
        .insert(category_model(&builder.name("category", "doomed")))
        .await
        .unwrap();
    uow.commit().await.unwrap();

    let uow = CatalogUnitOfWork::new(db.connection());
    use sea_orm::IntoActiveModel;
    let existing = uow
        .categories()
        .find_by_id(cat.id)
        .await
        .unwrap()
        .unwrap();
    uow.categories()
        .delete(existing.into_active_model())
        .await
        .unwrap();
    uow.commit().await.unwrap();

    let fresh = CatalogUnitOfWork::new(db.connection());
    assert!(fresh
        .categories()
        .find_by_id(cat.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_commit_is_reenterable() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("uow_reenterable");

    let uow = CatalogUnitOfWork::new(db.connection());
    let first = uow
        .categories()
        .insert(category_model(&builder.name("category", "first")))
        .await
        .unwrap();
    uow.commit().await.unwrap();

    // The same unit keeps working after a successful commit
    let second = uow
        .categories()
        .insert(category_model(&builder.name("category", "second")))
        .await
        .unwrap();
    uow.commit().await.unwrap();

    let fresh = CatalogUnitOfWork::new(db.connection());
    assert!(fresh
        .categories()
        .find_by_id(first.id)
        .await
        .unwrap()
        .is_some());
    assert!(fresh
        .categories()
        .find_by_id(second.id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_units_never_share_repository_instances() {
    let db = TestDatabase::new().await;

    let uow1 = CatalogUnitOfWork::new(db.connection());
    let uow2 = CatalogUnitOfWork::new(db.connection());

    // Memoized inside one unit, distinct across units
    assert_eq!(
        uow1.categories() as *const CategoryRepository,
        uow1.categories() as *const CategoryRepository
    );
    assert_ne!(
        uow1.categories() as *const CategoryRepository,
        uow2.categories() as *const CategoryRepository
    );
}

#[tokio::test]
async fn test_disposed_unit_rejects_every_operation() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("uow_disposed");

    let uow = CatalogUnitOfWork::new(db.connection());
    uow.dispose().await;

    assert_eq!(
        uow.categories().all(10, 0).await.unwrap_err(),
        StoreError::InvalidState
    );
    assert_eq!(
        uow.categories()
            .insert(category_model(&builder.name("category", "late")))
            .await
            .unwrap_err(),
        StoreError::InvalidState
    );
    assert_eq!(uow.commit().await, Err(StoreError::InvalidState));
}

#[tokio::test]
async fn test_dispose_rolls_back_open_work() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("uow_dispose_rollback");

    let uow = CatalogUnitOfWork::new(db.connection());
    let cat = uow
        .categories()
        .insert(category_model(&builder.name("category", "undone")))
        .await
        .unwrap();
    uow.dispose().await;

    let fresh = CatalogUnitOfWork::new(db.connection());
    assert!(fresh
        .categories()
        .find_by_id(cat.id)
        .await
        .unwrap()
        .is_none());
}
