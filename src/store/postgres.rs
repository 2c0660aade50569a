use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{BookStore, StoreError, StoreResult, UserStore};
use crate::models::{Book, BookChanges, NewBook, NewUser, User};

const BOOK_COLUMNS: &str = "id, title, author, isbn, description, published_date";
const USER_COLUMNS: &str = "id, name, email, password_hash, created_at";

/// Unique violations become `Conflict`; everything else is reported verbatim.
impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(db.message().to_string())
            }
            _ => StoreError::Backend(error.to_string()),
        }
    }
}

/// Applies the embedded migrations under `migrations/`.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Books persisted in the `books` table. Store order is the `seq` column.
#[derive(Debug, Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn insert(&self, book: NewBook) -> StoreResult<Book> {
        let sql = format!(
            "INSERT INTO books (id, title, author, isbn, description, published_date) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            BOOK_COLUMNS
        );
        let created = sqlx::query_as::<_, Book>(&sql)
            .bind(book.id)
            .bind(book.title)
            .bind(book.author)
            .bind(book.isbn)
            .bind(book.description)
            .bind(book.published_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Book>> {
        let sql = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let book = sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn search(&self, needle: &str) -> StoreResult<Vec<Book>> {
        // strpos keeps the needle literal, so no LIKE escaping is needed.
        let sql = format!(
            "SELECT {} FROM books \
             WHERE strpos(lower(title), lower($1)) > 0 OR strpos(lower(author), lower($1)) > 0 \
             ORDER BY seq",
            BOOK_COLUMNS
        );
        let books = sqlx::query_as::<_, Book>(&sql)
            .bind(needle)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn list(&self, skip: i64, limit: i64) -> StoreResult<Vec<Book>> {
        let sql = format!(
            "SELECT {} FROM books ORDER BY seq LIMIT $1 OFFSET $2",
            BOOK_COLUMNS
        );
        let books = sqlx::query_as::<_, Book>(&sql)
            .bind(limit.max(0))
            .bind(skip.max(0))
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn update(&self, id: Uuid, changes: BookChanges) -> StoreResult<Option<Book>> {
        let sql = format!(
            "UPDATE books SET \
             title = COALESCE($2, title), \
             author = COALESCE($3, author), \
             isbn = COALESCE($4, isbn), \
             description = COALESCE($5, description), \
             published_date = COALESCE($6, published_date) \
             WHERE id = $1 RETURNING {}",
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.author)
            .bind(changes.isbn)
            .bind(changes.description)
            .bind(changes.published_date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<Book>> {
        let sql = format!("DELETE FROM books WHERE id = $1 RETURNING {}", BOOK_COLUMNS);
        let book = sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> StoreResult<User> {
        let user = user.into_user();
        let sql = format!(
            "INSERT INTO users (id, name, email, password_hash, created_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match StoreError::from(e) {
                StoreError::Conflict(_) => StoreError::Conflict("Email already registered".into()),
                other => other,
            })
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
