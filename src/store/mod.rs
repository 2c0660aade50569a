//! Entity store for books and users.
//!
//! Handlers never talk to a database directly; they receive an
//! `Arc<dyn BookStore>` or `Arc<dyn UserStore>` injected at startup.
//! `postgres` is the production backend and `memory` backs local runs
//! without `DATABASE_URL` as well as the test suite.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{Book, BookChanges, NewBook, NewUser, User};

pub mod memory;
pub mod postgres;

pub use memory::{MemoryBookStore, MemoryUserStore};
pub use postgres::{PgBookStore, PgUserStore};

/// Failures reported by a store backend.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    Conflict(String),
    /// Any other backend failure.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Conflict(msg) | StoreError::Backend(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait BookStore: Send + Sync {
    async fn insert(&self, book: NewBook) -> StoreResult<Book>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Book>>;

    /// Books whose title or author contains `needle`, ignoring case, in store order.
    async fn search(&self, needle: &str) -> StoreResult<Vec<Book>>;

    /// At most `limit` books in store order after skipping `skip`.
    async fn list(&self, skip: i64, limit: i64) -> StoreResult<Vec<Book>>;

    /// Returns the updated book, or `None` if `id` is unknown.
    async fn update(&self, id: Uuid, changes: BookChanges) -> StoreResult<Option<Book>>;

    /// Returns the removed book, or `None` if `id` is unknown.
    async fn delete(&self, id: Uuid) -> StoreResult<Option<Book>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `StoreError::Conflict` when the email is taken.
    async fn insert(&self, user: NewUser) -> StoreResult<User>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
}

/// The pair of store handles shared by every worker.
#[derive(Clone)]
pub struct Stores {
    pub books: Arc<dyn BookStore>,
    pub users: Arc<dyn UserStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            books: Arc::new(MemoryBookStore::new()),
            users: Arc::new(MemoryUserStore::new()),
        }
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            books: Arc::new(PgBookStore::new(pool.clone())),
            users: Arc::new(PgUserStore::new(pool)),
        }
    }
}
