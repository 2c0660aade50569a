#![allow(dead_code)]

use actix_web::{body::MessageBody, dev::ServiceResponse, http::header, test};
use bookshelf::auth::JwtKeys;
use bookshelf::store::Stores;
use bookshelf::AppState;
use serde_json::{json, Value};
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Fresh in-memory state; every test gets its own catalog.
pub fn test_state() -> AppState {
    AppState::new(Stores::in_memory(), JwtKeys::new(TEST_SECRET, 1))
}

/// A valid token for an arbitrary caller, without going through registration.
pub fn token_for(state: &AppState) -> String {
    state
        .keys
        .generate_token(Uuid::new_v4())
        .expect("Failed to generate test token")
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub fn book_payload(title: &str, author: &str) -> Value {
    json!({
        "title": title,
        "author": author,
        "isbn": "978-0-00-000000-0",
        "description": format!("{} by {}", title, author),
        "publishedDate": "1965-08-01"
    })
}

/// Creates a book through the API and returns the `book` object from the response.
pub async fn create_book(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    token: &str,
    payload: &Value,
) -> Value {
    let req = test::TestRequest::post()
        .uri("/api/books")
        .append_header(bearer(token))
        .set_json(payload)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status, actix_web::http::StatusCode::CREATED, "Create failed: {}", body);
    body["book"].clone()
}
