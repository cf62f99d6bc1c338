//! Password storage: Argon2id with a random salt, encoded as a PHC string
//! (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`) in the `users.password` column.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::errors::{AppError, AppResult};

const PHC_PREFIX: &str = "$argon2";

/// Hash a clear-text password. Returns a PHC-format string.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

/// Check a clear-text password against a stored PHC string.
///
/// The digest comparison inside `argon2` is constant-time.
pub fn verify_password(password: &str, stored: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| AppError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Whether a stored value already is a hash (rows written before hashing
/// was introduced hold clear text).
pub fn is_hashed(stored: &str) -> bool {
    stored.starts_with(PHC_PREFIX)
}
