//! # Access Guard
//!
//! Bearer-token extraction and role-gated authorization.
//!
//! Per request:
//!
//! ```text
//! NoToken --extract--> TokenPresent --verify--> Valid | Expired | Invalid --authorize--> Allow | Deny
//! ```
//!
//! A request with no usable token fails with [`Error::AuthenticationMissing`],
//! which the web layer keeps distinct from an invalid or expired token.

use crate::error::{Error, Result};
use crate::role::Grants;
use crate::token::{Claims, TokenVerifier};

/// Access requirement of a protected operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    AdminOnly,
    ArtistOrAdmin,
    /// Admin, or the artist whose id matches the resource owner.
    OwnerOrAdmin(String),
    AnyAuthenticated,
}

impl Policy {
    /// Owner policy for a resource that may have no owner (e.g. admin-created artwork).
    /// An unowned resource is admin-only.
    pub fn owned_by(owner_id: Option<i64>) -> Self {
        Policy::OwnerOrAdmin(owner_id.map(|id| id.to_string()).unwrap_or_default())
    }

    /// Evaluate the policy against a grant set and the caller's subject id.
    pub fn permits(&self, grants: Grants, subject: &str) -> bool {
        match self {
            Policy::AdminOnly => grants.admin,
            Policy::ArtistOrAdmin => grants.admin || grants.artist,
            Policy::OwnerOrAdmin(owner) => {
                grants.admin || (grants.artist && !owner.is_empty() && subject == owner)
            }
            Policy::AnyAuthenticated => true,
        }
    }

    fn denial_reason(&self) -> &'static str {
        match self {
            Policy::AdminOnly => "Admin privileges required",
            Policy::ArtistOrAdmin => "Admin or artist privileges required",
            Policy::OwnerOrAdmin(_) => "You can only modify your own artworks",
            Policy::AnyAuthenticated => "Authentication required",
        }
    }
}

/// Allow or deny verified claims under `policy`.
pub fn authorize(claims: &Claims, policy: &Policy) -> Result<()> {
    if policy.permits(claims.grants(), &claims.sub) {
        Ok(())
    } else {
        Err(Error::Forbidden(policy.denial_reason()))
    }
}

/// Pull the token out of an `Authorization` header value.
///
/// `Bearer <token>` yields `<token>`; any other value yields its second
/// whitespace-separated word. Returns `None` when nothing usable is present.
pub fn extract_bearer(header: Option<&str>) -> Option<&str> {
    let header = header?.trim();

    let token = match header.strip_prefix("Bearer ") {
        Some(rest) => rest.trim(),
        None => header.split_whitespace().nth(1)?,
    };

    (!token.is_empty()).then_some(token)
}

/// Extract and verify the bearer token of a request.
pub fn authenticate(header: Option<&str>, verifier: &TokenVerifier) -> Result<Claims> {
    let token = extract_bearer(header).ok_or(Error::AuthenticationMissing)?;
    verifier.verify(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;
    use crate::token::{SigningContext, TokenIssuer};
    use chrono::{Duration, Utc};

    const SECRET: &str = "guard-test-secret-that-is-32-chars-min";

    fn claims(sub: &str, role: Role) -> Claims {
        Claims {
            sub: sub.to_string(),
            name: "Test".to_string(),
            role,
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[test]
    fn test_flag_truth_table() {
        // (is_admin, is_artist, policy, expected)
        let cases = [
            (false, false, Policy::AdminOnly, false),
            (false, true, Policy::AdminOnly, false),
            (true, false, Policy::AdminOnly, true),
            (true, true, Policy::AdminOnly, true),
            (false, false, Policy::ArtistOrAdmin, false),
            (false, true, Policy::ArtistOrAdmin, true),
            (true, false, Policy::ArtistOrAdmin, true),
            (true, true, Policy::ArtistOrAdmin, true),
        ];

        for (admin, artist, policy, expected) in cases {
            let grants = Grants {
                admin,
                artist,
                corporate: false,
            };
            assert_eq!(
                policy.permits(grants, "1"),
                expected,
                "is_admin={admin} is_artist={artist} policy={policy:?}"
            );
        }
    }

    #[test]
    fn test_role_policies() {
        assert!(authorize(&claims("1", Role::Admin), &Policy::AdminOnly).is_ok());
        assert_eq!(
            authorize(&claims("2", Role::Artist), &Policy::AdminOnly),
            Err(Error::Forbidden("Admin privileges required"))
        );
        assert!(authorize(&claims("2", Role::Artist), &Policy::ArtistOrAdmin).is_ok());
        assert!(authorize(&claims("3", Role::Corporate), &Policy::ArtistOrAdmin).is_err());
        assert!(authorize(&claims("4", Role::IndividualUser), &Policy::AnyAuthenticated).is_ok());
    }

    #[test]
    fn test_owner_or_admin() {
        let artist_a = claims("10", Role::Artist);
        let artist_b = claims("11", Role::Artist);
        let admin = claims("10", Role::Admin);
        let user = claims("10", Role::IndividualUser);
        let owned_by_a = Policy::owned_by(Some(10));

        assert!(authorize(&artist_a, &owned_by_a).is_ok());
        assert_eq!(
            authorize(&artist_b, &owned_by_a),
            Err(Error::Forbidden("You can only modify your own artworks"))
        );
        assert!(authorize(&admin, &owned_by_a).is_ok());
        // Matching sub without the artist grant is not ownership
        assert!(authorize(&user, &owned_by_a).is_err());

        let unowned = Policy::owned_by(None);
        assert!(authorize(&artist_a, &unowned).is_err());
        assert!(authorize(&admin, &unowned).is_ok());
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(extract_bearer(Some("Token abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(extract_bearer(Some("bearer abc")), Some("abc"));
        assert_eq!(extract_bearer(Some("abc.def.ghi")), None);
        assert_eq!(extract_bearer(Some("Bearer ")), None);
        assert_eq!(extract_bearer(Some("   ")), None);
        assert_eq!(extract_bearer(None), None);
    }

    #[test]
    fn test_authenticate_outcomes() {
        let ctx = SigningContext::new(SECRET).unwrap();
        let issuer = TokenIssuer::new(ctx.clone(), Duration::hours(24));
        let verifier = TokenVerifier::new(ctx);

        let token = issuer.issue(8, "Imani", Role::Artist).unwrap();
        let header = format!("Bearer {token}");
        let claims = authenticate(Some(&header), &verifier).expect("valid token");
        assert_eq!(claims.role, Role::Artist);

        assert_eq!(authenticate(None, &verifier), Err(Error::AuthenticationMissing));
        assert_eq!(
            authenticate(Some("Bearer not-a-token"), &verifier),
            Err(Error::TokenInvalid)
        );

        let stale = issuer
            .issue_at(8, "Imani", Role::Artist, Utc::now() - Duration::hours(25))
            .unwrap();
        assert_eq!(
            authenticate(Some(&format!("Bearer {stale}")), &verifier),
            Err(Error::TokenExpired)
        );
    }
}
