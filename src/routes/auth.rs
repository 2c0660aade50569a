use crate::{
    auth::{hash_password, verify_password, AuthResponse, JwtKeys, LoginRequest, RegisterRequest},
    error::AppError,
    models::{user::normalize_email, NewUser},
    store::UserStore,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns an authentication token.
///
/// ## Responses:
/// - `201 Created`: `AuthResponse` with the token and the new user.
/// - `400 Bad Request`: The email is already registered.
/// - `422 Unprocessable Entity`: Name, email or password failed validation.
#[post("/register")]
pub async fn register(
    users: web::Data<dyn UserStore>,
    keys: web::Data<JwtKeys>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;
    let register_data = register_data.into_inner();
    let email = normalize_email(&register_data.email);

    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let password_hash = hash_password(&register_data.password)?;
    let user = users
        .insert(NewUser {
            name: register_data.name.trim().to_string(),
            email,
            password_hash,
        })
        .await?;

    let token = keys.generate_token(user.id)?;
    log::info!("Registered user {}", user.id);

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User registered".into(),
        token,
        user,
    }))
}

/// Login user
///
/// Authenticates a user and returns an authentication token.
///
/// ## Responses:
/// - `200 OK`: `AuthResponse` with a fresh token.
/// - `401 Unauthorized`: Unknown email or wrong password.
/// - `422 Unprocessable Entity`: Email or password failed validation.
#[post("/login")]
pub async fn login(
    users: web::Data<dyn UserStore>,
    keys: web::Data<JwtKeys>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = users
        .find_by_email(&normalize_email(&login_data.email))
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;

    if !verify_password(&login_data.password, &user.password_hash) {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = keys.generate_token(user.id)?;
    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".into(),
        token,
        user,
    }))
}
