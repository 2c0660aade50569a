#![doc = "The `bookshelf` library crate."]
#![doc = ""]
#![doc = "A book catalog REST service: JWT authentication, a book service with"]
#![doc = "id/search/page lookups, and PostgreSQL or in-memory entity stores."]
#![doc = "The binary (`main.rs`) wires configuration, logging and the HTTP server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use error::AppError;
pub use state::{configure_app, AppState};
