use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{BookInput, BookPatch, BookQuery},
    services::{BookError, BookLookup, BookService},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

fn log_failure(operation: &str, caller: &AuthenticatedUser, error: &BookError) {
    match error {
        BookError::Store(msg) => log::error!("{} failed for user {}: {}", operation, caller.user_id, msg),
        other => log::debug!("{} rejected for user {}: {}", operation, caller.user_id, other),
    }
}

/// Lists, searches or fetches books.
///
/// ## Query Parameters (checked in this order):
/// - `id`: return exactly this book.
/// - `query`: every book whose title or author contains the text, ignoring case.
/// - `page`: 1-indexed page of four books in insertion order (default 1).
///
/// ## Responses:
/// - `200 OK`: A single `Book` in id mode, otherwise a JSON array.
/// - `400 Bad Request`: Unknown id or store failure.
/// - `401 Unauthorized`: Missing or invalid token.
#[get("")]
pub async fn get_books(
    service: web::Data<BookService>,
    caller: AuthenticatedUser,
    query_params: web::Query<BookQuery>,
) -> Result<impl Responder, AppError> {
    let lookup = BookLookup::from_query(query_params.into_inner());
    let listing = service.lookup(lookup).await.map_err(|e| {
        log_failure("Book lookup", &caller, &e);
        e
    })?;

    Ok(HttpResponse::Ok().json(listing))
}

/// Fetches one book by its id. Same contract as `GET /api/books?id=`.
#[get("/{id}")]
pub async fn get_book(
    service: web::Data<BookService>,
    caller: AuthenticatedUser,
    book_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let listing = service
        .lookup(BookLookup::ById(book_id.into_inner()))
        .await
        .map_err(|e| {
            log_failure("Book fetch", &caller, &e);
            e
        })?;

    Ok(HttpResponse::Ok().json(listing))
}

/// Creates a book.
///
/// ## Request Body:
/// `title`, `author`, `isbn`, `description` and `publishedDate`, all required.
///
/// ## Responses:
/// - `201 Created`: `{ "message": "Book created", "book": Book }`.
/// - `400 Bad Request`: `All fields are required`, an unparseable date, or a store failure.
/// - `401 Unauthorized`: Missing or invalid token.
#[post("")]
pub async fn create_book(
    service: web::Data<BookService>,
    caller: AuthenticatedUser,
    book_data: web::Json<BookInput>,
) -> Result<impl Responder, AppError> {
    let book = service.create(book_data.into_inner()).await.map_err(|e| {
        log_failure("Book create", &caller, &e);
        e
    })?;
    log::info!("User {} created book {}", caller.user_id, book.id);

    Ok(HttpResponse::Created().json(json!({
        "message": "Book created",
        "book": book
    })))
}

/// Updates the given fields of a book.
///
/// ## Responses:
/// - `200 OK`: `{ "message": "Book updated", "book": Book | null }`; `null` when the id is unknown.
/// - `400 Bad Request`: Malformed id, unparseable date, or store failure.
/// - `401 Unauthorized`: Missing or invalid token.
#[put("/{id}")]
pub async fn update_book(
    service: web::Data<BookService>,
    caller: AuthenticatedUser,
    book_id: web::Path<String>,
    book_data: web::Json<BookPatch>,
) -> Result<impl Responder, AppError> {
    let book = service
        .update(&book_id, book_data.into_inner())
        .await
        .map_err(|e| {
            log_failure("Book update", &caller, &e);
            e
        })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Book updated",
        "book": book
    })))
}

/// Deletes a book.
///
/// ## Responses:
/// - `200 OK`: `{ "message": "Book deleted", "book": Book | null }`; `null` when the id is unknown.
/// - `400 Bad Request`: Malformed id or store failure.
/// - `401 Unauthorized`: Missing or invalid token.
#[delete("/{id}")]
pub async fn delete_book(
    service: web::Data<BookService>,
    caller: AuthenticatedUser,
    book_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let book = service.delete(&book_id).await.map_err(|e| {
        log_failure("Book delete", &caller, &e);
        e
    })?;
    if let Some(book) = &book {
        log::info!("User {} deleted book {}", caller.user_id, book.id);
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Book deleted",
        "book": book
    })))
}
