//! # Utilities Library
//!
//! Shared helpers for base64url, environment variables, dates, and input validation.

pub mod b64;
pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use b64::{b64u_decode, b64u_decode_to_string, b64u_encode};
pub use envs::{get_env, get_env_or, get_env_parse_or};
pub use time::{now_utc, parse_date};
pub use validation::{validate_email, validate_min_length, validate_not_empty, validate_positive};
