//! # Authentication Data Transfer Objects
//!
//! Request and response structures for the authentication endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/auth/register` - [`RegisterRequest`] -> [`AuthResponse`]
//! - `POST /api/auth/register-corporate` - [`RegisterCorporateRequest`] -> [`AuthResponse`]
//! - `POST /api/auth/register-artist` - [`RegisterArtistRequest`] -> [`AuthResponse`]
//! - `POST /api/auth/login`, `/api/auth/artist/login`, `/api/auth/admin/login` - [`LoginRequest`] -> [`AuthResponse`]
//! - `GET /api/auth/me` -> [`MeResponse`]
//!
//! ## Wire Format
//!
//! ```text
//! POST /api/auth/login
//! { "email": "wanjiku@example.com", "password": "MyPassword123!" }
//! ```
//!
//! Response:
//! ```text
//! {
//!   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "principal": { "id": 1, "name": "Wanjiku", "email": "wanjiku@example.com", "role": "individual_user" },
//!   "message": "Login successful"
//! }
//! ```

use lib_auth::{Claims, Role};
use lib_utils::{validate_email, validate_min_length, validate_not_empty};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Canonical form of an email used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_credentials(name: &str, email: &str, password: &str) -> Result<()> {
    validate_not_empty(name, "Name").map_err(AppError::InvalidInput)?;
    validate_email(email).map_err(AppError::InvalidInput)?;
    validate_min_length(password, MIN_PASSWORD_LEN, "Password").map_err(AppError::InvalidInput)?;
    Ok(())
}

/// Individual user registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        validate_credentials(&self.name, &self.email, &self.password)
    }
}

/// Corporate account registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCorporateRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub company_name: String,
    pub business_type: String,
    #[serde(default)]
    pub tax_id: Option<String>,
}

impl RegisterCorporateRequest {
    pub fn validate(&self) -> Result<()> {
        validate_credentials(&self.name, &self.email, &self.password)?;
        validate_not_empty(&self.company_name, "Company name").map_err(AppError::InvalidInput)?;
        validate_not_empty(&self.business_type, "Business type").map_err(AppError::InvalidInput)?;
        Ok(())
    }
}

/// Artist account registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterArtistRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl RegisterArtistRequest {
    pub fn validate(&self) -> Result<()> {
        validate_credentials(&self.name, &self.email, &self.password)
    }
}

/// Login with email and password. The endpoint decides which principal kinds are searched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<()> {
        validate_not_empty(&self.email, "Email").map_err(AppError::InvalidInput)?;
        validate_not_empty(&self.password, "Password").map_err(AppError::InvalidInput)?;
        Ok(())
    }
}

/// Public identity of an authenticated principal.
///
/// Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrincipalInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Successful registration or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// HS256 bearer token
    pub token: String,
    pub principal: PrincipalInfo,
    pub message: String,
}

/// Verified claims of the current request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeResponse {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub is_admin: bool,
    pub is_artist: bool,
    pub is_corporate: bool,
    /// Expiry, seconds since the Unix epoch
    pub expires_at: i64,
}

impl From<&Claims> for MeResponse {
    fn from(claims: &Claims) -> Self {
        let grants = claims.grants();
        Self {
            id: claims.sub.clone(),
            name: claims.name.clone(),
            role: claims.role,
            is_admin: grants.admin,
            is_artist: grants.artist,
            is_corporate: grants.corporate,
            expires_at: claims.exp,
        }
    }
}
