//! Submitter identity as derived from the transaction certificate.

use std::fmt;

/// Attributes the access layer reads from the submitter certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityInfo {
    /// Issuing organization id from the identity envelope.
    pub organization_id: String,
    /// Certificate subject common name.
    pub common_name: String,
    /// Certificate carries the administrator organizational unit.
    pub is_admin: bool,
}

impl IdentityInfo {
    pub fn new(organization_id: impl Into<String>, common_name: impl Into<String>, is_admin: bool) -> Self {
        Self {
            organization_id: organization_id.into(),
            common_name: common_name.into(),
            is_admin,
        }
    }
}

impl fmt::Display for IdentityInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization_id, self.common_name)?;
        if self.is_admin {
            f.write_str(" (admin)")?;
        }
        Ok(())
    }
}
