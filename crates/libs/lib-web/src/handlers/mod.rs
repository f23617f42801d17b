//! # HTTP Request Handlers
//!
//! Axum request handlers organized by feature domain.
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: registration, login and `me` for every principal kind
//! - **[`artworks`]**: public catalog, artist/admin management
//! - **[`exhibitions`]**: public listing, admin management
//! - **[`orders`]**: artwork orders, exhibition bookings, payment status
//! - **[`contact`]**: contact form and admin inbox
//! - **[`artists`]**: admin artist directory
//!
//! ## Authentication
//!
//! Protected endpoints sit behind the `require_auth` middleware, which puts
//! verified claims in the request extensions. Handlers take
//! `Extension<Claims>` and call [`lib_auth::authorize`] with their policy
//! before touching the database.
//!
//! ## Error Handling
//!
//! Handlers return [`lib_core::Result`]; [`lib_core::AppError`] renders as
//! `{"error": ..., "code": ...}` with the matching status code.

pub mod artists;
pub mod artworks;
pub mod auth;
pub mod contact;
pub mod exhibitions;
pub mod orders;

#[cfg(test)]
pub(crate) mod test_utils;

use lib_auth::{Claims, Role};
use lib_core::{AppError, Result};
use serde::Deserialize;

/// Optional `?artist_id=` on artist-scoped listings.
///
/// Artists always see their own data; admins must name the artist.
#[derive(Debug, Default, Deserialize)]
pub struct ArtistScope {
    pub artist_id: Option<i64>,
}

impl ArtistScope {
    /// Resolve the artist whose data the caller may read.
    pub fn resolve(&self, claims: &Claims) -> Result<i64> {
        match claims.role {
            Role::Artist => Ok(claims.principal_id()?),
            _ => self
                .artist_id
                .ok_or_else(|| AppError::InvalidInput("artist_id is required".to_string())),
        }
    }
}
