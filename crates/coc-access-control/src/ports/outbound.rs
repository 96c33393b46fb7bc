//! Outbound ports.

use crate::domain::{IdentityInfo, PolicyRequest};
use coc_types::{AuthorizationError, ChaincodeError, IdentityError};
use thiserror::Error;

/// Decodes the raw transaction creator into an [`IdentityInfo`].
pub trait IdentityVerifier: Send + Sync {
    fn extract(&self, creator: &[u8]) -> Result<IdentityInfo, IdentityError>;
}

/// Mechanical failures of the policy engine. Never a decision.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("invalid policy model: {0}")]
    Model(String),

    /// Rule table could not be loaded into the enforcer.
    #[error("failed to load policy rules: {0}")]
    Load(String),

    #[error("invalid policy rule '{rule}': {reason}")]
    Rule { rule: String, reason: String },

    /// Enforcer raised an error while evaluating a request.
    #[error("policy evaluation failed: {0}")]
    Evaluation(String),

    #[error("policy engine not loaded: {0}")]
    Unavailable(String),
}

impl From<PolicyError> for ChaincodeError {
    fn from(err: PolicyError) -> Self {
        AuthorizationError::EngineUnavailable(err.to_string()).into()
    }
}

/// Evaluates a request tuple against an immutable rule set.
///
/// `Ok(false)` is a deny; `Err` means the engine could not decide.
pub trait PolicyEngine: Send + Sync {
    fn enforce(&self, request: &PolicyRequest) -> Result<bool, PolicyError>;
}
