//! Book catalog operations.
//!
//! `BookService` sits between the route handlers and the `BookStore`. It owns
//! input validation, the id/search/page lookup modes, and the mapping of every
//! failure onto `BookError`. All `BookError`s are answered with HTTP 400.

use serde::Serialize;
use std::fmt;
use std::num::IntErrorKind;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::book::parse_published_date;
use crate::models::{Book, BookChanges, BookInput, BookPatch, BookQuery, NewBook};
use crate::store::{BookStore, StoreError};

/// Number of books returned per page.
pub const PAGE_SIZE: i64 = 4;

pub const MISSING_FIELDS: &str = "All fields are required";
pub const BOOK_NOT_FOUND: &str = "Book not found";

#[derive(Debug, Clone, PartialEq)]
pub enum BookError {
    /// A create payload was incomplete or a field could not be parsed.
    Validation(String),
    /// Only raised by id lookups.
    NotFound(String),
    /// The store failed, or an id could not be interpreted.
    Store(String),
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BookError::Validation(msg) | BookError::NotFound(msg) | BookError::Store(msg) => {
                f.write_str(msg)
            }
        }
    }
}

impl std::error::Error for BookError {}

impl From<StoreError> for BookError {
    fn from(error: StoreError) -> BookError {
        BookError::Store(error.to_string())
    }
}

/// Every book failure is a 400, including not-found and store errors.
impl From<BookError> for AppError {
    fn from(error: BookError) -> AppError {
        AppError::BadRequest(error.to_string())
    }
}

/// How `GET /api/books` resolves a request. Checked in the order id, query, page.
#[derive(Debug, Clone, PartialEq)]
pub enum BookLookup {
    ById(String),
    Search(String),
    Page(u64),
}

impl BookLookup {
    /// Empty parameters count as absent. A missing, non-numeric or zero
    /// page falls back to the first page. Pages too large for `u64` saturate.
    pub fn from_query(query: BookQuery) -> Self {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());

        if let Some(id) = present(query.id) {
            return BookLookup::ById(id);
        }
        if let Some(needle) = present(query.query) {
            return BookLookup::Search(needle);
        }
        let page = query
            .page
            .and_then(|raw| parse_page(raw.trim()))
            .filter(|page| *page >= 1)
            .unwrap_or(1);
        BookLookup::Page(page)
    }
}

fn parse_page(raw: &str) -> Option<u64> {
    match raw.parse::<u64>() {
        Ok(page) => Some(page),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u64::MAX),
        Err(_) => None,
    }
}

/// Rows skipped before `page`, clamped to what the store accepts.
fn page_offset(page: u64) -> i64 {
    let skip = page.saturating_sub(1).saturating_mul(PAGE_SIZE as u64);
    i64::try_from(skip).unwrap_or(i64::MAX)
}

/// Result of a lookup: one book in id mode, a list otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BookListing {
    One(Book),
    Many(Vec<Book>),
}

#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn BookStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: BookInput) -> Result<Book, BookError> {
        input
            .validate()
            .map_err(|_| BookError::Validation(MISSING_FIELDS.into()))?;

        let (Some(title), Some(author), Some(isbn), Some(description), Some(raw_date)) = (
            input.title,
            input.author,
            input.isbn,
            input.description,
            input.published_date,
        ) else {
            return Err(BookError::Validation(MISSING_FIELDS.into()));
        };

        let published_date = parse_date(&raw_date)?;
        let book = NewBook {
            id: Uuid::new_v4(),
            title,
            author,
            isbn,
            description,
            published_date,
        };

        Ok(self.store.insert(book).await?)
    }

    pub async fn lookup(&self, lookup: BookLookup) -> Result<BookListing, BookError> {
        match lookup {
            BookLookup::ById(raw_id) => {
                let not_found = || BookError::NotFound(BOOK_NOT_FOUND.into());
                let id = Uuid::parse_str(raw_id.trim()).map_err(|_| not_found())?;
                self.store
                    .find_by_id(id)
                    .await?
                    .map(BookListing::One)
                    .ok_or_else(not_found)
            }
            BookLookup::Search(needle) => Ok(BookListing::Many(self.store.search(&needle).await?)),
            BookLookup::Page(page) => {
                let skip = page_offset(page);
                Ok(BookListing::Many(self.store.list(skip, PAGE_SIZE).await?))
            }
        }
    }

    /// Overwrites the supplied fields. An unknown id yields `Ok(None)`.
    pub async fn update(&self, raw_id: &str, patch: BookPatch) -> Result<Option<Book>, BookError> {
        let id = parse_id(raw_id)?;
        let changes = BookChanges {
            title: patch.title,
            author: patch.author,
            isbn: patch.isbn,
            description: patch.description,
            published_date: patch.published_date.as_deref().map(parse_date).transpose()?,
        };
        Ok(self.store.update(id, changes).await?)
    }

    /// Removes the book. An unknown id yields `Ok(None)`.
    pub async fn delete(&self, raw_id: &str) -> Result<Option<Book>, BookError> {
        let id = parse_id(raw_id)?;
        Ok(self.store.delete(id).await?)
    }
}

fn parse_id(raw_id: &str) -> Result<Uuid, BookError> {
    Uuid::parse_str(raw_id.trim())
        .map_err(|_| BookError::Store(format!("Invalid book id \"{}\"", raw_id)))
}

fn parse_date(raw: &str) -> Result<chrono::DateTime<chrono::Utc>, BookError> {
    parse_published_date(raw)
        .ok_or_else(|| BookError::Validation(format!("Invalid publishedDate: {}", raw)))
}
