//! Policy request tuple: (role, domain, object, action).

use coc_types::PolicyDomain;
use std::fmt;

/// Object the operation touches, rendered as a policy object pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectRef {
    /// `investigation:*`
    Investigations,
    /// `investigation:<id>`
    Investigation(String),
    /// `evidence:*`
    EvidenceCollection,
    /// `evidence:<id>`
    Evidence(String),
    /// `guid_mapping`
    GuidMapping,
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectRef::Investigations => f.write_str("investigation:*"),
            ObjectRef::Investigation(id) => write!(f, "investigation:{id}"),
            ObjectRef::EvidenceCollection => f.write_str("evidence:*"),
            ObjectRef::Evidence(id) => write!(f, "evidence:{id}"),
            ObjectRef::GuidMapping => f.write_str("guid_mapping"),
        }
    }
}

/// Policy action verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    View,
    Update,
    Archive,
    Reopen,
    Append,
    ResolveGuid,
}

impl Action {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::View => "view",
            Action::Update => "update",
            Action::Archive => "archive",
            Action::Reopen => "reopen",
            Action::Append => "append",
            Action::ResolveGuid => "resolve_guid",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tuple handed to a [`crate::ports::PolicyEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolicyRequest {
    pub role: String,
    pub domain: String,
    pub object: String,
    pub action: String,
}

impl PolicyRequest {
    pub fn new(role: &str, domain: PolicyDomain, object: &ObjectRef, action: Action) -> Self {
        Self {
            role: role.to_string(),
            domain: domain.as_str().to_string(),
            object: object.to_string(),
            action: action.as_str().to_string(),
        }
    }
}

impl fmt::Display for PolicyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.role, self.domain, self.object, self.action
        )
    }
}
