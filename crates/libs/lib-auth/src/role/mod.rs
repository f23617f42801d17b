//! # Principal Roles
//!
//! The closed set of principal kinds and the capability grants each carries.
//!
//! Tokens still carry the legacy boolean flags on the wire (`is_admin`,
//! `is_artist`, `is_corporate`). [`Role::from_flags`] is the only way back
//! from flags to a role, and it rejects any combination with more than one
//! flag set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Kind of authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    IndividualUser,
    Corporate,
    Artist,
    Admin,
}

/// Capability set derived from a [`Role`].
///
/// Guard policies are expressed over grants rather than roles so the rules
/// read the same as the flag checks they replace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grants {
    pub admin: bool,
    pub artist: bool,
    pub corporate: bool,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::IndividualUser, Role::Corporate, Role::Artist, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::IndividualUser => "individual_user",
            Role::Corporate => "corporate",
            Role::Artist => "artist",
            Role::Admin => "admin",
        }
    }

    /// Rebuild a role from wire flags. No flags means an individual user.
    pub fn from_flags(is_admin: bool, is_artist: bool, is_corporate: bool) -> Result<Self> {
        match (is_admin, is_artist, is_corporate) {
            (false, false, false) => Ok(Role::IndividualUser),
            (true, false, false) => Ok(Role::Admin),
            (false, true, false) => Ok(Role::Artist),
            (false, false, true) => Ok(Role::Corporate),
            _ => Err(Error::ConflictingRoles),
        }
    }

    pub fn grants(&self) -> Grants {
        match self {
            Role::IndividualUser => Grants::default(),
            Role::Corporate => Grants {
                corporate: true,
                ..Grants::default()
            },
            Role::Artist => Grants {
                artist: true,
                ..Grants::default()
            },
            Role::Admin => Grants {
                admin: true,
                ..Grants::default()
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
