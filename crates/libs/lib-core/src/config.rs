//! # Application Configuration
//!
//! Configuration loaded from environment variables and validated on startup
//! to fail fast if misconfigured.
//!
//! The loaded [`Config`] is owned by the web layer's `AppState` and passed
//! explicitly to whatever needs it; there is no global instance.
//!
//! ```rust,no_run
//! use lib_core::Config;
//!
//! let config = Config::from_env()?;
//! config.validate()?;
//! # Ok::<(), String>(())
//! ```

use std::fmt;
use std::str::FromStr;

use lib_utils::{get_env, get_env_or, get_env_parse_or};

/// Scope in which a registration email must be unused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmailUniqueness {
    /// Unique across users, corporate users, artists and admins.
    #[default]
    Global,
    /// Unique only within the principal kind being registered.
    PerKind,
}

impl FromStr for EmailUniqueness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" | "strict" => Ok(EmailUniqueness::Global),
            "per_kind" | "per-kind" => Ok(EmailUniqueness::PerKind),
            _ => Err(format!("Invalid email uniqueness mode: {}", s)),
        }
    }
}

/// Default admin created at startup when the admins table is empty.
#[derive(Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeed")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for JWT signing and verification
    ///
    /// **Must be at least 32 characters long.**
    pub jwt_secret: String,

    /// JWT validity period in hours (1-720). Defaults to 24.
    pub jwt_expiration_hours: i64,

    /// Registration email uniqueness scope.
    pub email_uniqueness: EmailUniqueness,

    /// Optional default admin.
    pub admin_seed: Option<AdminSeed>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("email_uniqueness", &self.email_uniqueness)
            .field("admin_seed", &self.admin_seed)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = get_env_or("DATABASE_URL", "sqlite:data/gallery.db");

        let jwt_secret = get_env("JWT_SECRET").map_err(|e| e.to_string())?;

        let jwt_expiration_hours = get_env_parse_or("JWT_EXPIRATION_HOURS", 24_i64)
            .map_err(|_| "JWT_EXPIRATION_HOURS must be a valid number".to_string())?;

        let email_uniqueness = get_env_or("EMAIL_UNIQUENESS", "global").parse()?;

        let admin_seed = match (get_env("ADMIN_EMAIL"), get_env("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminSeed {
                name: get_env_or("ADMIN_NAME", "Admin"),
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            email_uniqueness,
            admin_seed,
        })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 characters long".to_string());
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err("JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string());
        }

        if let Some(seed) = &self.admin_seed {
            if seed.password.chars().count() < 8 {
                return Err("ADMIN_PASSWORD must be at least 8 characters long".to_string());
            }
        }

        Ok(())
    }
}
