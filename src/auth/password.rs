use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::AppError;

/// Hashes a plaintext password for storage in `users.password_hash`.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(|e| {
        log::error!("bcrypt hash failed: {}", e);
        AppError::InternalServerError("Failed to hash password".into())
    })
}

/// A stored hash bcrypt cannot parse counts as a mismatch, so a corrupt row
/// answers login with 401 rather than 500.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    verify(password, stored_hash).unwrap_or_else(|e| {
        log::warn!("Stored password hash rejected by bcrypt: {}", e);
        false
    })
}
