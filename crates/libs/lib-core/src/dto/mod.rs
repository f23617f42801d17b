//! # Data Transfer Objects (DTOs)
//!
//! Request and response bodies of the REST API. Request types carry a
//! `validate()` that rejects malformed input with [`AppError::InvalidInput`].
//!
//! [`AppError::InvalidInput`]: crate::AppError::InvalidInput

pub mod auth;
pub mod catalog;
pub mod contact;
pub mod order;

pub use auth::*;
pub use catalog::*;
pub use contact::*;
pub use order::*;

/// Shared response for mutations that return no entity.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Trim optional free text, mapping blank values to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
