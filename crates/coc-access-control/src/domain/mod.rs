//! # Domain Layer
//!
//! Pure access-control rules. Nothing here touches the ledger or decodes
//! certificates.

pub mod gateway;
pub mod identity;
pub mod principal;
pub mod request;
pub mod role_claim;
pub mod router;
pub mod user_context;

pub use gateway::{validate_admin, validate_gateway, VerifiedAdmin};
pub use identity::IdentityInfo;
pub use principal::{PrincipalId, PrincipalParts};
pub use request::{Action, ObjectRef, PolicyRequest};
pub use role_claim::validate_role_claim;
pub use router::DomainRouter;
pub use user_context::UserContext;
