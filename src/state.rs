//! Shared application state and the app factory used by `main` and the tests.

use actix_web::web;

use crate::auth::{AuthMiddleware, JwtKeys};
use crate::routes;
use crate::services::BookService;
use crate::store::Stores;

/// Everything a worker needs, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub keys: JwtKeys,
}

impl AppState {
    pub fn new(stores: Stores, keys: JwtKeys) -> Self {
        Self { stores, keys }
    }
}

/// Registers app data, the public health route, and the token-gated `/api` scope.
///
/// Use as `App::new().configure(configure_app(state.clone()))`. Outer
/// middleware such as CORS and request logging is left to the caller.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state.keys))
            .app_data(web::Data::from(state.stores.users))
            .app_data(web::Data::new(BookService::new(state.stores.books)))
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            );
    }
}
