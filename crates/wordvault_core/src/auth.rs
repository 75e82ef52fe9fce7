//! Password hashing for account credentials.
//!
//! # Responsibility
//! - Hash registration passwords with Argon2id into PHC strings.
//! - Verify login passwords against stored PHC strings.
//!
//! # Invariants
//! - Plaintext passwords never leave this module or get persisted.
//! - Each hash carries its own random salt.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure while producing or checking a password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// Hashing the plaintext failed.
    Hash { detail: String },
    /// The stored hash is not a well-formed PHC string.
    MalformedStoredHash { detail: String },
}

impl Display for PasswordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash { detail } => write!(f, "password hashing failed: {detail}"),
            Self::MalformedStoredHash { detail } => {
                write!(f, "stored password hash is malformed: {detail}")
            }
        }
    }
}

impl Error for PasswordError {}

/// Hashes a plaintext password into a PHC-format Argon2id string.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordError::Hash {
            detail: err.to_string(),
        })?;
    Ok(hash.to_string())
}

/// Checks a plaintext password against a stored PHC-format hash.
///
/// Returns `Ok(false)` on a mismatch; errors only when the stored hash
/// itself cannot be parsed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|err| {
        PasswordError::MalformedStoredHash {
            detail: err.to_string(),
        }
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password, PasswordError};

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse battery", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        let first = hash_password("hunter22222").unwrap();
        let second = hash_password("hunter22222").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(PasswordError::MalformedStoredHash { .. })
        ));
    }
}
