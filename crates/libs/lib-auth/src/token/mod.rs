//! # JWT Token Management
//!
//! Issues and verifies compact HS256 JWTs.
//!
//! The signing secret is wrapped once in a [`SigningContext`] at startup and
//! handed to [`TokenIssuer`] and [`TokenVerifier`]; nothing here reads global state.
//!
//! Wire payload:
//!
//! ```text
//! { "sub": "42", "name": "Wanjiru", "is_admin": false, "is_artist": true,
//!   "is_corporate": false, "iat": 1735689600, "exp": 1735776000 }
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use lib_utils::now_utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::role::{Grants, Role};

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Minimum accepted secret length in bytes.
pub const MIN_SECRET_LEN: usize = 32;

// region:    --- Claims

/// Verified identity asserted by a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireClaims", into = "WireClaims")]
pub struct Claims {
    /// Principal id, always a string on the wire.
    pub sub: String,
    /// Display name.
    pub name: String,
    pub role: Role,
    /// Issued at (Unix timestamp, seconds).
    pub iat: i64,
    /// Expiration (Unix timestamp, seconds). Invalid at any instant >= `exp`.
    pub exp: i64,
}

impl Claims {
    pub fn grants(&self) -> Grants {
        self.role.grants()
    }

    /// Numeric principal id parsed back from `sub`.
    pub fn principal_id(&self) -> Result<i64> {
        self.sub.parse().map_err(|_| Error::TokenInvalid)
    }
}

#[derive(Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    name: String,
    #[serde(default)]
    is_admin: bool,
    #[serde(default)]
    is_artist: bool,
    #[serde(default)]
    is_corporate: bool,
    #[serde(default)]
    iat: i64,
    exp: i64,
}

impl TryFrom<WireClaims> for Claims {
    type Error = Error;

    fn try_from(wire: WireClaims) -> Result<Self> {
        let role = Role::from_flags(wire.is_admin, wire.is_artist, wire.is_corporate)?;
        Ok(Claims {
            sub: wire.sub,
            name: wire.name,
            role,
            iat: wire.iat,
            exp: wire.exp,
        })
    }
}

impl From<Claims> for WireClaims {
    fn from(claims: Claims) -> Self {
        let grants = claims.role.grants();
        WireClaims {
            sub: claims.sub,
            name: claims.name,
            is_admin: grants.admin,
            is_artist: grants.artist,
            is_corporate: grants.corporate,
            iat: claims.iat,
            exp: claims.exp,
        }
    }
}

// endregion: --- Claims

// region:    --- SigningContext

/// HMAC keys derived from the process signing secret.
#[derive(Clone)]
pub struct SigningContext {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
}

impl SigningContext {
    pub fn new(secret: &str) -> Result<Self> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(Error::WeakSecret { min: MIN_SECRET_LEN });
        }

        Ok(Self {
            encoding_key: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding_key: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        })
    }
}

impl fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningContext { .. }")
    }
}

// endregion: --- SigningContext

// region:    --- TokenIssuer

#[derive(Debug, Clone)]
pub struct TokenIssuer {
    ctx: SigningContext,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(ctx: SigningContext, ttl: Duration) -> Self {
        Self { ctx, ttl }
    }

    /// Issue a token for a principal, valid for the configured TTL from now.
    pub fn issue(&self, principal_id: i64, name: &str, role: Role) -> Result<String> {
        self.issue_at(principal_id, name, role, now_utc())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        principal_id: i64,
        name: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let claims = Claims {
            sub: principal_id.to_string(),
            name: name.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.ctx.encoding_key)
            .map_err(|e| Error::TokenEncoding(e.to_string()))
    }
}

// endregion: --- TokenIssuer

// region:    --- TokenVerifier

#[derive(Debug, Clone)]
pub struct TokenVerifier {
    ctx: SigningContext,
    validation: Arc<Validation>,
}

impl TokenVerifier {
    pub fn new(ctx: SigningContext) -> Self {
        // HS256 only. Expiry is checked here against an explicit instant so
        // the boundary is exact (no leeway).
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            ctx,
            validation: Arc::new(validation),
        }
    }

    /// Verify signature, algorithm and expiry against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.verify_at(token, now_utc())
    }

    /// Verify as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        let claims = decode::<Claims>(token, &self.ctx.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("[TOKEN] Rejected token: {:?}", e.kind());
                Error::TokenInvalid
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            debug!("[TOKEN] Token for sub {} expired at {}", claims.sub, claims.exp);
            return Err(Error::TokenExpired);
        }

        Ok(claims)
    }
}

// endregion: --- TokenVerifier
