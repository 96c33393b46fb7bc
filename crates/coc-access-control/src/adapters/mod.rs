//! # Adapters Layer
//!
//! - [`x509`]: certificate-backed identity extraction
//! - [`fixed`]: preset identity for tests
//! - [`policy`]: casbin enforcer over the embedded model and rules

pub mod fixed;
pub mod policy;
pub mod x509;

pub use fixed::FixedIdentityVerifier;
pub use policy::{embedded_enforcer, CasbinEnforcer, UnavailableEngine};
pub use x509::{SerializedIdentity, X509IdentityVerifier};
