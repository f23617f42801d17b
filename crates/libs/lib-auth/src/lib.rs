//! # Authentication Library
//!
//! Password hashing, principal roles, JWT issuance/verification, and the
//! access guard that gates protected requests.
//!
//! Per request the flow is:
//!
//! ```text
//! Authorization header --extract_bearer--> token --TokenVerifier--> Claims --authorize(Policy)--> Ok(())
//! ```

pub mod error;
pub mod guard;
pub mod pwd;
pub mod role;
pub mod token;

// Re-export commonly used types
pub use error::{Error, Result};
pub use guard::{authenticate, authorize, extract_bearer, Policy};
pub use pwd::{hash_password, verify_dummy_password, verify_password};
pub use role::{Grants, Role};
pub use token::{Claims, SigningContext, TokenIssuer, TokenVerifier, DEFAULT_TOKEN_TTL_HOURS};
