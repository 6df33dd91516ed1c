//! Data-access layer for the catalog service.
//!
//! This crate owns the pieces with real contracts:
//!
//! - [`Session`]: one logical store session per unit of work. A transaction
//!   is opened lazily on the first operation and every repository bound to
//!   the session runs through it, so writes are visible to reads inside the
//!   unit and invisible outside it until [`Session::commit`].
//! - [`Repository`]: entity-agnostic CRUD over a session. Write failures
//!   poison the session so an ignored error still fails the commit.
//! - [`postgres`]: connection setup with startup retry and migrations.
//!
//! # Example
//!
//! ```ignore
//! use database::{Repository, Session};
//!
//! let session = Arc::new(Session::new(db.clone()));
//! let repo: Repository<item::Entity> = Repository::new(session.clone());
//! repo.insert(item::ActiveModel { /* ... */ }).await?;
//! session.commit().await?;
//! ```

pub mod error;
pub mod postgres;
pub mod repository;
pub mod retry;
pub mod session;

pub use error::{StoreError, StoreResult};
pub use repository::Repository;
pub use session::Session;
