//! Caller identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// The identity a transaction is signed by (a chain principal such as
/// `ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM`).
///
/// The engine treats principals as opaque: equality is all that matters for
/// admin checks and stake keys.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Principal(String);

impl Principal {
    /// Maximum accepted length, enough for a contract principal.
    pub const MAX_LEN: usize = 128;

    /// Create a principal from a raw string.
    ///
    /// # Panics
    /// Panics if the string is not a well-formed principal. Use
    /// [`Principal::parse`] for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(Self::is_well_formed(&s), "malformed principal: {s:?}");
        Self(s)
    }

    /// Parse a principal from untrusted input.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let trimmed = raw.trim();
        if Self::is_well_formed(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(TypesError::InvalidPrincipal(raw.to_string()))
        }
    }

    /// Return the raw principal string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_well_formed(s: &str) -> bool {
        !s.is_empty()
            && s.len() <= Self::MAX_LEN
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Principal {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
