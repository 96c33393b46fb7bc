//! # Chain-of-Custody Access Control
//!
//! Trust and authorization layer in front of every ledger operation.
//!
//! ## Pipeline
//!
//! 1. **Identity**: decode the submitter certificate ([`adapters::x509`])
//! 2. **Gateway trust**: only the configured relay may submit user operations
//! 3. **User context**: end user and claimed role from the side channel
//! 4. **Role claim**: the claim must be granted in the [`registry`]
//! 5. **Domain**: channel id routed to `hot`, `cold` or `unknown`
//! 6. **Policy**: (role, domain, object, action) against the rule set
//!
//! Registry administration skips steps 2-6 and instead requires an
//! administrator certificate from an admin-capable organization.
//!
//! ## Layout
//!
//! - `domain/`: pure checks and value types
//! - `ports/`: identity verifier and policy engine traits
//! - `adapters/`: X.509 extraction, casbin enforcer, test double
//! - [`registry`], [`gate`]: ledger-backed registry and the composed pipeline

pub mod adapters;
pub mod config;
pub mod domain;
pub mod gate;
pub mod ports;
pub mod registry;

pub use adapters::{
    embedded_enforcer, CasbinEnforcer, FixedIdentityVerifier, SerializedIdentity,
    UnavailableEngine, X509IdentityVerifier,
};
pub use config::{AccessControlConfig, ConfigError};
pub use domain::{
    Action, DomainRouter, IdentityInfo, ObjectRef, PolicyRequest, PrincipalId, UserContext,
    VerifiedAdmin,
};
pub use gate::{AccessGate, AuthenticatedUser};
pub use ports::{IdentityVerifier, PolicyEngine, PolicyError};
pub use registry::{parse_role_list, PrincipalRegistry};
