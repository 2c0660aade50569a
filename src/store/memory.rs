use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BookStore, StoreError, StoreResult, UserStore};
use crate::models::{Book, BookChanges, NewBook, NewUser, User};

/// In-memory book store. Insertion order is the natural store order.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn insert(&self, book: NewBook) -> StoreResult<Book> {
        let mut books = self.books.write().await;
        if books.iter().any(|existing| existing.id == book.id) {
            return Err(StoreError::Conflict(format!("Duplicate book id {}", book.id)));
        }
        let book = book.into_book();
        books.push(book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Book>> {
        let books = self.books.read().await;
        Ok(books.iter().find(|book| book.id == id).cloned())
    }

    async fn search(&self, needle: &str) -> StoreResult<Vec<Book>> {
        let needle = needle.to_lowercase();
        let books = self.books.read().await;
        Ok(books
            .iter()
            .filter(|book| {
                book.title.to_lowercase().contains(&needle)
                    || book.author.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn list(&self, skip: i64, limit: i64) -> StoreResult<Vec<Book>> {
        let books = self.books.read().await;
        Ok(books
            .iter()
            .skip(usize::try_from(skip.max(0)).unwrap_or(usize::MAX))
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, changes: BookChanges) -> StoreResult<Option<Book>> {
        let mut books = self.books.write().await;
        Ok(books.iter_mut().find(|book| book.id == id).map(|book| {
            changes.apply_to(book);
            book.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<Book>> {
        let mut books = self.books.write().await;
        Ok(books
            .iter()
            .position(|book| book.id == id)
            .map(|index| books.remove(index)))
    }
}

/// In-memory user store keyed by normalized email.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(StoreError::Conflict("Email already registered".into()));
        }
        let user = user.into_user();
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }
}
