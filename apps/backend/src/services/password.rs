//! Password hashing, one library call each way.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::AppError;

/// Hash a password with Argon2id; the salt is generated here and travels
/// inside the PHC-format hash string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::internal("Failed to hash password"))?;

    Ok(hash.to_string())
}

/// Check a password against a stored PHC-format hash.
///
/// A structurally invalid stored hash is an error; a mismatch is `Ok(false)`.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::internal("Stored password hash is invalid"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
