//! # Authentication Middleware
//!
//! Extracts the bearer token from the `Authorization` header, verifies it and
//! injects the verified [`Claims`] into the request extensions.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/api/auth/me", get(me))
//!     .route_layer(from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! Handlers then extract claims with `Extension<Claims>` and apply their
//! role policy with [`lib_auth::authorize`]:
//!
//! ```rust,ignore
//! async fn handler(Extension(claims): Extension<Claims>) -> Result<Json<Data>> {
//!     authorize(&claims, &Policy::AdminOnly)?;
//!     // ...
//! }
//! ```

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use lib_auth::{authenticate, Claims, TokenVerifier};
use lib_core::AppError;
use tracing::{debug, warn};

/// Reject requests without a valid bearer token.
///
/// - **Valid token**: continues with `Claims` in extensions
/// - **No token**: `401` with code `AuthenticationMissing`
/// - **Expired / invalid token**: `401` with code `TokenExpired` / `TokenInvalid`
pub async fn require_auth(
    State(verifier): State<TokenVerifier>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let claims: Claims = authenticate(header, &verifier).map_err(|e| {
        warn!("[AUTH] Rejected {} {}: {}", req.method(), req.uri().path(), e);
        AppError::from(e)
    })?;

    debug!("[AUTH] Authenticated {} (id: {}, role: {})", claims.name, claims.sub, claims.role);

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
