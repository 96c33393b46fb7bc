//! Submitter trust checks.
//!
//! User-facing operations must be submitted by the one trusted relay.
//! Registry mutations must be submitted directly by an administrator, and
//! produce a [`VerifiedAdmin`] that the registry requires as proof.

use crate::config::{AdminConfig, TrustedGatewayConfig};
use crate::domain::identity::IdentityInfo;
use coc_types::{IdentityError, IdentityField};

/// Succeeds only for the trusted relay's (organization, common name) pair.
/// An empty organization or common name never matches.
pub fn validate_gateway(
    identity: &IdentityInfo,
    trusted: &TrustedGatewayConfig,
) -> Result<(), IdentityError> {
    if identity.organization_id.is_empty()
        || identity.organization_id != trusted.organization_id
    {
        return Err(IdentityError::UntrustedSubmitter {
            field: IdentityField::OrganizationId,
            expected: trusted.organization_id.clone(),
            actual: identity.organization_id.clone(),
        });
    }
    if identity.common_name.is_empty() || identity.common_name != trusted.common_name {
        return Err(IdentityError::UntrustedSubmitter {
            field: IdentityField::CommonName,
            expected: trusted.common_name.clone(),
            actual: identity.common_name.clone(),
        });
    }
    Ok(())
}

/// Proof that the submitter passed administrator verification.
///
/// Only [`validate_admin`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAdmin {
    identity: IdentityInfo,
}

impl VerifiedAdmin {
    pub fn identity(&self) -> &IdentityInfo {
        &self.identity
    }

    /// Name recorded as `updatedBy` on registry writes.
    pub fn common_name(&self) -> &str {
        &self.identity.common_name
    }

    #[cfg(test)]
    pub(crate) fn for_tests(common_name: &str) -> Self {
        Self {
            identity: IdentityInfo::new("LabOrgMSP", common_name, true),
        }
    }
}

/// Require the admin marker and an admin-capable organization.
pub fn validate_admin(
    identity: IdentityInfo,
    admin: &AdminConfig,
) -> Result<VerifiedAdmin, IdentityError> {
    if !identity.is_admin {
        return Err(IdentityError::MissingAdminMarker {
            marker: admin.marker.clone(),
        });
    }
    if !admin
        .organizations
        .iter()
        .any(|org| *org == identity.organization_id)
    {
        return Err(IdentityError::AdminOrganizationNotAllowed {
            organization: identity.organization_id,
            allowed: admin.organizations.clone(),
        });
    }
    Ok(VerifiedAdmin { identity })
}
