//! # Principal Registry
//!
//! On-chain role grants under `USERROLE:<principal id>`. The only source
//! of truth for which roles a delegated user may claim.
//!
//! Mutations and listing take a [`VerifiedAdmin`], so they cannot be
//! reached without passing administrator verification first.

use crate::domain::{validate_role_claim, PrincipalId, VerifiedAdmin};
use chrono::{DateTime, Utc};
use coc_ledger::{delete_record, read_record, scan_records, write_record, KeyPrefix, LedgerState};
use coc_types::{ChaincodeResult, NotFoundError, Role, UserRoleRecord, ValidationError};
use std::collections::BTreeSet;
use tracing::info;

/// Parse a comma-separated role list. Whitespace around names is ignored,
/// as are empty entries; duplicates collapse.
pub fn parse_role_list(roles_csv: &str) -> Result<BTreeSet<Role>, ValidationError> {
    let roles = roles_csv
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse::<Role>)
        .collect::<Result<BTreeSet<_>, _>>()?;

    if roles.is_empty() {
        return Err(ValidationError::EmptyRoleList);
    }
    Ok(roles)
}

/// Registry view over one transaction's ledger state.
pub struct PrincipalRegistry<'a, S: LedgerState + ?Sized> {
    state: &'a S,
}

impl<'a, S: LedgerState + ?Sized> PrincipalRegistry<'a, S> {
    pub fn new(state: &'a S) -> Self {
        Self { state }
    }

    /// Replace the full role set of `principal_id`.
    pub fn set_roles(
        &self,
        admin: &VerifiedAdmin,
        principal_id: &str,
        roles_csv: &str,
        now: DateTime<Utc>,
    ) -> ChaincodeResult<UserRoleRecord> {
        if principal_id.is_empty() {
            return Err(ValidationError::MalformedPrincipalId {
                value: String::new(),
                reason: "principal ID cannot be empty".into(),
            }
            .into());
        }
        let roles = parse_role_list(roles_csv)?;

        let record = UserRoleRecord {
            principal_id: principal_id.to_string(),
            roles,
            updated_by: admin.common_name().to_string(),
            updated_at: now,
        };
        write_record(self.state, &KeyPrefix::UserRole.key(principal_id), &record)?;

        info!(
            principal_id,
            roles = ?record.role_names(),
            admin = admin.common_name(),
            "User roles set"
        );
        Ok(record)
    }

    /// Registry record for `principal_id`.
    pub fn get_roles(&self, principal_id: &str) -> ChaincodeResult<UserRoleRecord> {
        self.find(principal_id)?
            .ok_or_else(|| NotFoundError::Principal(principal_id.to_string()).into())
    }

    /// Every record, in key order.
    pub fn list(&self, _admin: &VerifiedAdmin) -> ChaincodeResult<Vec<UserRoleRecord>> {
        scan_records(self.state, KeyPrefix::UserRole)
    }

    /// Remove the record for `principal_id`.
    pub fn delete(&self, admin: &VerifiedAdmin, principal_id: &str) -> ChaincodeResult<()> {
        let key = KeyPrefix::UserRole.key(principal_id);
        if self.find(principal_id)?.is_none() {
            return Err(NotFoundError::Principal(principal_id.to_string()).into());
        }
        delete_record(self.state, &key)?;

        info!(principal_id, admin = admin.common_name(), "User role deleted");
        Ok(())
    }

    /// Check a claimed role for `principal`.
    pub fn validate_claim(
        &self,
        principal: &PrincipalId,
        claimed: &str,
    ) -> ChaincodeResult<UserRoleRecord> {
        let record = self.find(principal.as_str())?;
        validate_role_claim(principal, record, claimed)
    }

    fn find(&self, principal_id: &str) -> ChaincodeResult<Option<UserRoleRecord>> {
        read_record(self.state, &KeyPrefix::UserRole.key(principal_id))
    }
}
