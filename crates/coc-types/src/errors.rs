//! # Error Types
//!
//! The five failure kinds every chaincode operation reports through.
//!
//! | Kind | Raised by |
//! |------|-----------|
//! | `Identity` | certificate decoding, gateway/admin identity checks |
//! | `Authorization` | role claim mismatch, policy deny, unusable policy engine |
//! | `NotFound` | principal, GUID, investigation or evidence absent |
//! | `Validation` | malformed arguments, side-channel fields, role lists, duplicates |
//! | `Storage` | ledger read/write/codec failures |
//!
//! Any error aborts the whole operation. Nothing here is retried.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// ERROR KIND
// =============================================================================

/// Machine-inspectable error discriminant carried in host responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Identity,
    Authorization,
    NotFound,
    Validation,
    Storage,
}

/// Stable numeric codes for [`ErrorKind`].
pub mod codes {
    pub const VALIDATION: u16 = 400;
    pub const IDENTITY: u16 = 401;
    pub const AUTHORIZATION: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const STORAGE: u16 = 500;
}

impl ErrorKind {
    /// Numeric code for this kind.
    pub fn code(&self) -> u16 {
        match self {
            ErrorKind::Validation => codes::VALIDATION,
            ErrorKind::Identity => codes::IDENTITY,
            ErrorKind::Authorization => codes::AUTHORIZATION,
            ErrorKind::NotFound => codes::NOT_FOUND,
            ErrorKind::Storage => codes::STORAGE,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Identity => "identity",
            ErrorKind::Authorization => "authorization",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Validation => "validation",
            ErrorKind::Storage => "storage",
        };
        f.write_str(name)
    }
}

// =============================================================================
// IDENTITY ERRORS
// =============================================================================

/// Identity attribute that failed a trust check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    OrganizationId,
    CommonName,
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityField::OrganizationId => f.write_str("organization id"),
            IdentityField::CommonName => f.write_str("common name"),
        }
    }
}

/// Submitter identity could not be established or is not trusted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// Host did not supply a creator identity.
    #[error("transaction creator unavailable: {0}")]
    CreatorUnavailable(String),

    /// Issuer-organization envelope could not be decoded.
    #[error("failed to decode identity envelope: {0}")]
    Envelope(String),

    /// Certificate bytes are not PEM framed.
    #[error("failed to decode PEM certificate: {0}")]
    Pem(String),

    /// PEM payload is not a parseable X.509 certificate.
    #[error("failed to parse X.509 certificate: {0}")]
    Certificate(String),

    /// Submitter is not the trusted relay.
    #[error("untrusted submitter: {field} '{actual}' is not trusted gateway {field} '{expected}'")]
    UntrustedSubmitter {
        field: IdentityField,
        expected: String,
        actual: String,
    },

    /// Submitter certificate lacks the administrator marker.
    #[error("admin identity required: certificate has no '{marker}' organizational unit")]
    MissingAdminMarker { marker: String },

    /// Administrator belongs to an organization not allowed to administer.
    #[error("admin organization '{organization}' is not one of {allowed:?}")]
    AdminOrganizationNotAllowed {
        organization: String,
        allowed: Vec<String>,
    },
}

// =============================================================================
// AUTHORIZATION ERRORS
// =============================================================================

/// Authenticated caller is not permitted to perform the operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    /// Claimed role is not in the principal's registered role set.
    #[error("role '{claimed}' not allowed for principal '{principal_id}' (has roles: {held:?})")]
    RoleNotHeld {
        principal_id: String,
        claimed: String,
        held: Vec<String>,
    },

    /// Policy rule set denies the tuple.
    #[error("permission denied: role '{role}' cannot '{action}' on '{object}' in domain '{domain}'")]
    PolicyDenied {
        role: String,
        domain: String,
        object: String,
        action: String,
    },

    /// Policy engine failed to load or evaluate. Fails closed.
    #[error("policy engine unavailable: {0}")]
    EngineUnavailable(String),
}

// =============================================================================
// NOT FOUND ERRORS
// =============================================================================

/// Referenced record does not exist.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotFoundError {
    /// No registry record for the principal.
    #[error("user role not found for principal: {0}")]
    Principal(String),

    /// Role claim made for a principal with no registry record.
    #[error("user not registered in on-chain role registry: {0}")]
    UnregisteredUser(String),

    #[error("GUID mapping not found: {0}")]
    GuidMapping(String),

    #[error("investigation not found: {0}")]
    Investigation(String),

    #[error("evidence not found: {0}")]
    Evidence(String),
}

// =============================================================================
// VALIDATION ERRORS
// =============================================================================

/// Input is malformed or violates a record invariant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Side-channel field absent or empty.
    #[error("{0} not found in transient map")]
    MissingTransientField(String),

    /// Side-channel field is not UTF-8.
    #[error("transient field {0} is not valid UTF-8")]
    NonUtf8TransientField(String),

    #[error("at least one role must be specified")]
    EmptyRoleList,

    #[error("invalid role: {0}")]
    UnknownRole(String),

    #[error("invalid domain: {0}")]
    UnknownDomain(String),

    #[error("invalid principal ID '{value}': {reason}")]
    MalformedPrincipalId { value: String, reason: String },

    /// Record with this id already exists.
    #[error("{entity} with ID '{id}' already exists")]
    Duplicate { entity: &'static str, id: String },

    #[error("incorrect number of arguments for {function}: expecting {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// Status transition not allowed from the current state.
    #[error("investigation '{id}' cannot {action} from status {status}")]
    InvalidTransition {
        id: String,
        action: &'static str,
        status: String,
    },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Required argument is empty.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
}

// =============================================================================
// STORAGE ERRORS
// =============================================================================

/// Ledger access or record encoding failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("failed to read '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write '{key}': {reason}")]
    Write { key: String, reason: String },

    #[error("failed to delete '{key}': {reason}")]
    Delete { key: String, reason: String },

    #[error("failed to scan range '{start}'..'{end}': {reason}")]
    Scan {
        start: String,
        end: String,
        reason: String,
    },

    #[error("failed to encode or decode record '{key}': {reason}")]
    Codec { key: String, reason: String },

    /// Host call not tied to a single key failed.
    #[error("ledger host error: {0}")]
    Host(String),
}

// =============================================================================
// CHAINCODE ERROR
// =============================================================================

/// Any failure of a chaincode operation, tagged with its kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChaincodeError {
    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ChaincodeError {
    /// Kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChaincodeError::Identity(_) => ErrorKind::Identity,
            ChaincodeError::Authorization(_) => ErrorKind::Authorization,
            ChaincodeError::NotFound(_) => ErrorKind::NotFound,
            ChaincodeError::Validation(_) => ErrorKind::Validation,
            ChaincodeError::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Result alias used across the chaincode crates.
pub type ChaincodeResult<T> = Result<T, ChaincodeError>;
