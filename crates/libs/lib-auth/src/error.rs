//! # Authentication Errors
//!
//! Every failure the auth core can report. Token failures are deliberately
//! coarse (`TokenExpired` / `TokenInvalid`); decoding detail is logged, not returned.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Stored digest is not a parseable PHC string.
    #[error("Password hash has an invalid format")]
    InvalidHashFormat,

    #[error("Failed to hash password: {0}")]
    Hashing(String),

    #[error("Failed to sign token: {0}")]
    TokenEncoding(String),

    #[error("Signing secret must be at least {min} bytes long")]
    WeakSecret { min: usize },

    #[error("Token has expired")]
    TokenExpired,

    /// Bad signature, disallowed algorithm, malformed framing or claims.
    #[error("Token is invalid")]
    TokenInvalid,

    /// More than one role flag set on a single principal.
    #[error("Conflicting role flags")]
    ConflictingRoles,

    /// No usable bearer token on the request.
    #[error("Authentication required")]
    AuthenticationMissing,

    /// Valid token, insufficient role.
    #[error("Forbidden: {0}")]
    Forbidden(&'static str),
}
