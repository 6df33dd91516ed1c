//! One store session per unit of work.
//!
//! A [`Session`] wraps a cloned connection handle plus at most one open
//! transaction. The transaction is opened lazily by the first repository
//! operation; every repository bound to the session executes through it.
//! That gives a unit of work read-your-writes before commit, and keeps its
//! writes invisible to other sessions until [`Session::commit`].

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tokio::sync::{Mutex, MutexGuard};

use crate::error::{StoreError, StoreResult};

/// Lifecycle: `Open` (lazily transacting, commit re-enterable) → `Disposed`
/// (terminal, every operation fails with [`StoreError::InvalidState`]).
///
/// The first write failure poisons the session: the error is retained and
/// re-surfaced by `commit()`, which rolls the transaction back instead of
/// committing. Either every staged write lands or none does.
pub struct Session {
    conn: DatabaseConnection,
    state: Mutex<SessionState>,
}

#[derive(Default)]
pub(crate) struct SessionState {
    pub(crate) tx: Option<DatabaseTransaction>,
    pub(crate) poison: Option<StoreError>,
    pub(crate) disposed: bool,
}

impl Session {
    /// Bind to a connection handle. Performs no I/O; the transaction opens
    /// on the first operation.
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub(crate) async fn guard(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().await
    }

    pub(crate) fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Commit everything staged since the last commit.
    ///
    /// Surfaces a retained write failure (rolling the transaction back) or
    /// commits the open transaction. With nothing staged this is a no-op.
    /// The session stays usable afterwards; the next operation opens a
    /// fresh transaction.
    pub async fn commit(&self) -> StoreResult<()> {
        let mut state = self.state.lock().await;

        if state.disposed {
            return Err(StoreError::InvalidState);
        }

        if let Some(err) = state.poison.take() {
            if let Some(tx) = state.tx.take() {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback of failed unit of work also failed");
                }
            }
            return Err(err);
        }

        match state.tx.take() {
            Some(tx) => tx
                .commit()
                .await
                .map_err(|e| StoreError::Persistence(e.to_string())),
            None => Ok(()),
        }
    }

    /// Terminal: rolls back anything open and rejects all further use.
    ///
    /// Idempotent. Dropping an undisposed session is also safe; the
    /// transaction's native rollback-on-drop releases the connection.
    pub async fn dispose(&self) {
        let mut state = self.state.lock().await;
        if state.disposed {
            return;
        }
        state.disposed = true;
        state.poison = None;
        if let Some(tx) = state.tx.take() {
            if let Err(err) = tx.rollback().await {
                tracing::warn!(error = %err, "rollback on dispose failed");
            }
        }
    }

    /// Whether `dispose()` has been called
    pub async fn is_disposed(&self) -> bool {
        self.state.lock().await.disposed
    }
}

/// Hand out the session's transaction, opening it lazily.
pub(crate) async fn transaction<'a>(
    conn: &DatabaseConnection,
    state: &'a mut SessionState,
) -> StoreResult<&'a DatabaseTransaction> {
    if state.disposed {
        return Err(StoreError::InvalidState);
    }
    let tx = match state.tx.take() {
        Some(tx) => tx,
        None => conn.begin().await.map_err(StoreError::from)?,
    };
    Ok(state.tx.insert(tx))
}

/// Record the first write failure against the session and convert it.
///
/// Later failures are returned to the caller but do not displace the
/// retained one; `commit()` reports the first error encountered.
pub(crate) fn poison(state: &mut SessionState, err: sea_orm::DbErr) -> StoreError {
    let converted = StoreError::from(err);
    if state.poison.is_none() {
        state.poison = Some(converted.clone());
    }
    converted
}
