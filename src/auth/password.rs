//! Credential hashing: Argon2id with a random salt per hash.

use crate::error::{AppError, AppResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::warn;

/// One-way password hashing and verification.
pub struct CredentialHasher;

impl CredentialHasher {
    /// Hash a plaintext password into a PHC string.
    pub fn hash(plaintext: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AppError::HashingFailure(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// Check a candidate against a stored hash. Fails closed: an unparseable
    /// hash is treated as a mismatch.
    pub fn verify(hash: &str, candidate: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "stored password hash is malformed");
                return false;
            }
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}
