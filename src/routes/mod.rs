pub mod auth;
pub mod books;
pub mod health;

use actix_web::web;

use crate::error::AppError;

/// Routes mounted under `/api`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register),
    )
    .service(
        web::scope("/books")
            .service(books::get_books)
            .service(books::create_book)
            .service(books::get_book)
            .service(books::update_book)
            .service(books::delete_book),
    );
}

/// Answers malformed JSON bodies with a 400 `{message}` instead of actix's plain text.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
