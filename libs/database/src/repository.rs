//! Entity-agnostic repository bound to one [`Session`].
//!
//! One generic implementation serves every entity type; per-entity
//! repositories only add their own read queries on top. All CRUD runs
//! through the owning session's transaction, so atomicity belongs to the
//! session's `commit`, not to the individual calls here.

use std::marker::PhantomData;
use std::sync::Arc;

use sea_orm::sea_query::IntoCondition;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, EntityTrait, IntoActiveModel, QueryFilter, QuerySelect,
    Select, SelectTwo,
};

use crate::error::{StoreError, StoreResult};
use crate::session::{self, Session};

/// Stateless façade over one entity type and one session.
///
/// Constructed per unit of work and living exactly as long as it. Holds no
/// data of its own; all state lives in the session.
pub struct Repository<E: EntityTrait> {
    session: Arc<Session>,
    entity: PhantomData<E>,
}

impl<E: EntityTrait> Repository<E> {
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            entity: PhantomData,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Page of rows in store order.
    pub async fn all(&self, limit: u64, offset: u64) -> StoreResult<Vec<E::Model>> {
        self.fetch(E::find().limit(limit).offset(offset)).await
    }

    /// Run a caller-composed query through the session.
    ///
    /// The select is built lazily by the caller (filters, joins, `limit`)
    /// and only materialized here, against the unit's transaction.
    pub async fn fetch(&self, select: Select<E>) -> StoreResult<Vec<E::Model>> {
        let mut guard = self.session.guard().await;
        let tx = session::transaction(self.session.connection(), &mut guard).await?;
        select.all(tx).await.map_err(Into::into)
    }

    /// Like [`Repository::fetch`] for a two-entity join.
    pub async fn fetch_with<R>(
        &self,
        select: SelectTwo<E, R>,
    ) -> StoreResult<Vec<(E::Model, Option<R::Model>)>>
    where
        R: EntityTrait,
    {
        let mut guard = self.session.guard().await;
        let tx = session::transaction(self.session.connection(), &mut guard).await?;
        select.all(tx).await.map_err(Into::into)
    }

    /// The single row matching `condition`, or `None`.
    ///
    /// Reads two rows to decide: more than one match is a
    /// [`StoreError::Conflict`], never a silently-picked arbitrary row.
    pub async fn find_one<F>(&self, condition: F) -> StoreResult<Option<E::Model>>
    where
        F: IntoCondition,
    {
        let mut rows = self.fetch(E::find().filter(condition).limit(2)).await?;
        if rows.len() > 1 {
            return Err(StoreError::Conflict);
        }
        Ok(rows.pop())
    }

    /// Insert a new row inside the unit's transaction and return it as
    /// stored. Invisible to other sessions until the session commits.
    pub async fn insert<A>(&self, model: A) -> StoreResult<E::Model>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        let mut guard = self.session.guard().await;
        let result = {
            let tx = session::transaction(self.session.connection(), &mut guard).await?;
            model.insert(tx).await
        };
        result.map_err(|err| session::poison(&mut guard, err))
    }

    /// Full-record overwrite addressed by primary key.
    ///
    /// A missing row is a [`StoreError::NotFound`] that also poisons the
    /// session: even if the caller drops the error, the unit's commit fails
    /// and none of its staged writes land.
    pub async fn update<A>(&self, model: A) -> StoreResult<E::Model>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        let mut guard = self.session.guard().await;
        let result = {
            let tx = session::transaction(self.session.connection(), &mut guard).await?;
            model.update(tx).await
        };
        result.map_err(|err| session::poison(&mut guard, err))
    }

    /// Remove the row addressed by the model's primary key. Deleting a row
    /// that is already gone is not an error; the row count says what
    /// happened.
    pub async fn delete<A>(&self, model: A) -> StoreResult<u64>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        let mut guard = self.session.guard().await;
        let result = {
            let tx = session::transaction(self.session.connection(), &mut guard).await?;
            model.delete(tx).await
        };
        match result {
            Ok(res) => Ok(res.rows_affected),
            Err(err) => Err(session::poison(&mut guard, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue::Set;
    use sea_orm::{ColumnTrait, DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    mod widget {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
        #[sea_orm(table_name = "widgets")]
        pub struct Model {
            #[sea_orm(primary_key, auto_increment = false)]
            pub id: Uuid,
            pub name: String,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    fn widget_row(name: &str) -> widget::Model {
        widget::Model {
            id: Uuid::now_v7(),
            name: name.to_string(),
        }
    }

    fn repo_over(db: sea_orm::DatabaseConnection) -> (Arc<Session>, Repository<widget::Entity>) {
        let session = Arc::new(Session::new(db));
        let repo = Repository::new(session.clone());
        (session, repo)
    }

    #[tokio::test]
    async fn test_find_one_returns_single_match() {
        let row = widget_row("solo");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row.clone()]])
            .into_connection();
        let (_session, repo) = repo_over(db);

        let found = repo
            .find_one(widget::Column::Name.eq("solo"))
            .await
            .unwrap();
        assert_eq!(found, Some(row));
    }

    #[tokio::test]
    async fn test_find_one_returns_none_for_no_match() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<widget::Model>::new()])
            .into_connection();
        let (_session, repo) = repo_over(db);

        let found = repo
            .find_one(widget::Column::Name.eq("missing"))
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_find_one_rejects_ambiguous_match() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![widget_row("dup"), widget_row("dup")]])
            .into_connection();
        let (_session, repo) = repo_over(db);

        let err = repo
            .find_one(widget::Column::Name.eq("dup"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Conflict);
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let row = widget_row("fresh");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row.clone()]])
            .into_connection();
        let (session, repo) = repo_over(db);

        let stored = repo
            .insert(widget::ActiveModel {
                id: Set(row.id),
                name: Set(row.name.clone()),
            })
            .await
            .unwrap();
        assert_eq!(stored, row);
        assert!(session.commit().await.is_ok());
    }

    #[tokio::test]
    async fn test_update_of_missing_row_poisons_commit() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<widget::Model>::new()])
            .into_connection();
        let (session, repo) = repo_over(db);

        let err = repo
            .update(widget::ActiveModel {
                id: Set(Uuid::now_v7()),
                name: Set("ghost".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound);

        // The dropped error still fails the unit's commit
        assert_eq!(session.commit().await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_reports_row_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let (_session, repo) = repo_over(db);

        let rows = repo
            .delete(widget::ActiveModel {
                id: Set(Uuid::now_v7()),
                name: Set("gone".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_operations_on_disposed_session_fail() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let (session, repo) = repo_over(db);
        session.dispose().await;

        let err = repo.all(10, 0).await.unwrap_err();
        assert_eq!(err, StoreError::InvalidState);

        let err = repo
            .insert(widget::ActiveModel {
                id: Set(Uuid::now_v7()),
                name: Set("late".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::InvalidState);
    }
}
