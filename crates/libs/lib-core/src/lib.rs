//! # Core Library
//!
//! Configuration, the application error type, request/response DTOs, and the
//! SQLite store (models and repositories).

pub mod config;
pub mod dto;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::{AdminSeed, Config, EmailUniqueness};
pub use error::{AppError, Result};
pub use model::store::{create_pool, run_migrations, DbPool};
