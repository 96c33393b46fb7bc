//! # Domain Entities
//!
//! Records stored under the `USERROLE:`, `GUIDMAP:`, `INVESTIGATION:` and
//! `EVIDENCE:` key prefixes, plus the small value types they reference.

use crate::errors::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// ROLES
// =============================================================================

/// Authorization role held by a principal.
///
/// The vocabulary is closed. Extending it is a product decision, not a
/// configuration knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Field investigator working active cases.
    BlockchainInvestigator,
    /// Read-mostly oversight role.
    BlockchainAuditor,
    /// Court user consuming disclosed evidence.
    BlockchainCourt,
    /// Operator of the custody platform.
    SystemAdmin,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 4] = [
        Role::BlockchainInvestigator,
        Role::BlockchainAuditor,
        Role::BlockchainCourt,
        Role::SystemAdmin,
    ];

    /// Canonical name as stored on the ledger and used in policy rules.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::BlockchainInvestigator => "BlockchainInvestigator",
            Role::BlockchainAuditor => "BlockchainAuditor",
            Role::BlockchainCourt => "BlockchainCourt",
            Role::SystemAdmin => "SystemAdmin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownRole(s.to_string()))
    }
}

// =============================================================================
// POLICY DOMAIN
// =============================================================================

/// Logical authorization domain a ledger partition maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyDomain {
    /// Operational partition for active investigations.
    Hot,
    /// Archival partition used for court disclosure.
    Cold,
    /// Anything unrecognised. Policy never allows this domain.
    Unknown,
}

impl PolicyDomain {
    /// Name passed to the policy engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyDomain::Hot => "hot",
            PolicyDomain::Cold => "cold",
            PolicyDomain::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PolicyDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyDomain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hot" => Ok(PolicyDomain::Hot),
            "cold" => Ok(PolicyDomain::Cold),
            "unknown" => Ok(PolicyDomain::Unknown),
            other => Err(ValidationError::UnknownDomain(other.to_string())),
        }
    }
}

// =============================================================================
// PRINCIPAL REGISTRY RECORD
// =============================================================================

/// On-chain role grant for one principal.
///
/// ## Invariants
///
/// - `roles` is never empty while the record exists.
/// - Only a verified administrator writes this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleRecord {
    pub principal_id: String,
    #[serde(deserialize_with = "non_empty_roles")]
    pub roles: BTreeSet<Role>,
    /// Common name of the administrator that last wrote the record.
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

/// Stored records with an empty role set fail to decode.
fn non_empty_roles<'de, D>(deserializer: D) -> Result<BTreeSet<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let roles = BTreeSet::<Role>::deserialize(deserializer)?;
    if roles.is_empty() {
        return Err(serde::de::Error::custom("roles cannot be empty"));
    }
    Ok(roles)
}

impl UserRoleRecord {
    /// Returns true if the claimed role name is one of the granted roles.
    ///
    /// Claims outside the closed vocabulary are simply not held.
    pub fn holds(&self, claimed: &str) -> bool {
        claimed
            .parse::<Role>()
            .map(|role| self.roles.contains(&role))
            .unwrap_or(false)
    }

    /// Granted role names, for error reporting.
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.as_str().to_string()).collect()
    }
}

// =============================================================================
// GUID MAPPING RECORD (cold domain)
// =============================================================================

/// Opaque external handle standing in for an internal evidence id.
///
/// `internal_evidence_id` is fixed at creation; only `description` is ever
/// rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidMapping {
    pub guid: String,
    pub internal_evidence_id: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

// =============================================================================
// INVESTIGATION RECORD
// =============================================================================

/// Investigation lifecycle. Both states are non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestigationStatus {
    Open,
    Archived,
}

impl fmt::Display for InvestigationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvestigationStatus::Open => f.write_str("open"),
            InvestigationStatus::Archived => f.write_str("archived"),
        }
    }
}

/// A forensic investigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investigation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: InvestigationStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub channel: PolicyDomain,
}

// =============================================================================
// EVIDENCE RECORD
// =============================================================================

/// Descriptive metadata supplied when evidence is registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceMeta {
    /// "disk image", "memory dump", "document", ...
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub size_bytes: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file_name: String,
}

/// One hand-over in the custody trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyEvent {
    pub timestamp: DateTime<Utc>,
    /// "collected", "transferred", "analyzed", "stored", ...
    pub action: String,
    pub custodian: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A piece of digital evidence and its custody trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub id: String,
    pub investigation_id: String,
    /// SHA-256 of the evidence content, hex encoded.
    pub hash: String,
    /// Content identifier in off-chain storage.
    pub ipfs_cid: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub channel: PolicyDomain,
    pub meta: EvidenceMeta,
    pub chain_of_custody: Vec<CustodyEvent>,
}
