//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used
//! across handlers and repositories. It follows the `thiserror` pattern.
//!
//! ## Error Categories
//!
//! 1. **Authentication** (401)
//!    - [`InvalidCredentials`](AppError::InvalidCredentials)
//!    - [`AuthenticationMissing`](AppError::AuthenticationMissing)
//!    - [`TokenExpired`](AppError::TokenExpired) / [`TokenInvalid`](AppError::TokenInvalid)
//!
//! 2. **Authorization** (403)
//!    - [`Forbidden`](AppError::Forbidden)
//!
//! 3. **Client Errors**
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!    - [`DuplicateEmail`](AppError::DuplicateEmail) → 409 Conflict
//!
//! 4. **Server Errors** (500)
//!    - [`Config`](AppError::Config), [`Internal`](AppError::Internal)
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_slots(slots: i64) -> Result<i64> {
//!     if slots < 1 {
//!         return Err(AppError::InvalidInput("Slots must be at least 1".to_string()));
//!     }
//!     Ok(slots)
//! }
//! ```
//!
//! ## Error Conversion
//!
//! - `From<lib_auth::Error>` - auth core failures keep their kind
//! - `From<sqlx::Error>` - database errors
//! - `From<anyhow::Error>` / `From<serde_json::Error>`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown email or wrong password. Deliberately does not say which.
    ///
    /// **HTTP Status**: 401 Unauthorized
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration email already in use.
    ///
    /// **HTTP Status**: 409 Conflict
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// **HTTP Status**: 401 Unauthorized
    #[error("Token has expired")]
    TokenExpired,

    /// Bad signature, algorithm, framing or claims.
    ///
    /// **HTTP Status**: 401 Unauthorized
    #[error("Invalid token")]
    TokenInvalid,

    /// No usable bearer token on a protected request.
    ///
    /// **HTTP Status**: 401 Unauthorized
    #[error("Authentication required")]
    AuthenticationMissing,

    /// Valid token, insufficient role.
    ///
    /// **HTTP Status**: 403 Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid user input validation error.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested resource not found.
    ///
    /// **HTTP Status**: 404 Not Found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error during startup.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (unexpected failures).
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials
            | AppError::TokenExpired
            | AppError::TokenInvalid
            | AppError::AuthenticationMissing => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail(_) => StatusCode::CONFLICT,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For internal errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::DuplicateEmail(_) => "Email already registered".to_string(),
            AppError::TokenExpired => "Token has expired".to_string(),
            AppError::TokenInvalid => "Invalid authentication token".to_string(),
            AppError::AuthenticationMissing => "Authentication required".to_string(),
            AppError::Forbidden(msg) => msg.clone(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Config(_) | AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::DuplicateEmail(_) => "DuplicateEmail",
            AppError::TokenExpired => "TokenExpired",
            AppError::TokenInvalid => "TokenInvalid",
            AppError::AuthenticationMissing => "AuthenticationMissing",
            AppError::Forbidden(_) => "Forbidden",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::Config(_) => "Config",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(json!({
            "error": self.user_message(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

impl From<lib_auth::Error> for AppError {
    fn from(err: lib_auth::Error) -> Self {
        use lib_auth::Error as AuthError;

        match err {
            AuthError::AuthenticationMissing => AppError::AuthenticationMissing,
            AuthError::TokenExpired => AppError::TokenExpired,
            AuthError::TokenInvalid | AuthError::ConflictingRoles => AppError::TokenInvalid,
            AuthError::Forbidden(reason) => AppError::Forbidden(reason.to_string()),
            AuthError::WeakSecret { .. } => AppError::Config(err.to_string()),
            AuthError::InvalidHashFormat | AuthError::Hashing(_) | AuthError::TokenEncoding(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) => {
                AppError::Internal(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON error: {}", err))
    }
}
