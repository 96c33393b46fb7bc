//! Principal identifiers: `<organization>|<gateway>|user:<user id>`.
//!
//! The registry keys role grants on this string. Construction never fails;
//! parsing expects exactly three `|`-separated segments, so a user id that
//! itself contains `|` builds an id that does not parse back.

use coc_types::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Segment separator.
pub const SEPARATOR: char = '|';
/// Prefix of the third segment.
pub const USER_PREFIX: &str = "user:";

/// Registry key for one delegated end user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

/// The three components of a [`PrincipalId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalParts {
    pub organization_id: String,
    pub gateway_name: String,
    pub user_id: String,
}

impl PrincipalId {
    /// Build the id for `user_id` relayed by `gateway_name` of `organization_id`.
    pub fn build(organization_id: &str, gateway_name: &str, user_id: &str) -> Self {
        Self(format!(
            "{organization_id}{SEPARATOR}{gateway_name}{SEPARATOR}{USER_PREFIX}{user_id}"
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into components.
    pub fn parts(&self) -> Result<PrincipalParts, ValidationError> {
        let malformed = |reason: &str| ValidationError::MalformedPrincipalId {
            value: self.0.clone(),
            reason: reason.to_string(),
        };

        let segments: Vec<&str> = self.0.split(SEPARATOR).collect();
        let [organization_id, gateway_name, user] = segments.as_slice() else {
            return Err(malformed("expected exactly three '|'-separated segments"));
        };
        let user_id = user
            .strip_prefix(USER_PREFIX)
            .ok_or_else(|| malformed("third segment must start with 'user:'"))?;

        Ok(PrincipalParts {
            organization_id: organization_id.to_string(),
            gateway_name: gateway_name.to_string(),
            user_id: user_id.to_string(),
        })
    }
}

impl FromStr for PrincipalId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Self(s.to_string());
        id.parts()?;
        Ok(id)
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PrincipalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
