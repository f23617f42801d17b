//! # Password Hashing
//!
//! Password hashing and verification using Argon2id with the crate's default
//! (fixed) cost parameters and a fresh random salt per hash.

use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Stand-in digest for logins whose email matched no account.
static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Hash a password, returning a PHC string that embeds algorithm, params and salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Hashing(e.to_string()))
}

/// Verify a plaintext password against a stored hash.
///
/// Returns `Ok(false)` on mismatch and `Err(Error::InvalidHashFormat)` when the
/// stored value is not a usable hash. The digest comparison is constant time.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| Error::InvalidHashFormat)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(_) => Err(Error::InvalidHashFormat),
    }
}

/// Spend the same Argon2 work as [`verify_password`] for a login whose email
/// matched no account, so unknown emails and wrong passwords take equally long.
///
/// Always returns `false`.
pub fn verify_dummy_password(password: &str) -> bool {
    let dummy = DUMMY_HASH.get_or_init(|| hash_password("no-account-matches-this").ok());

    if let Some(hash) = dummy {
        let _ = verify_password(password, hash);
    }
    false
}
