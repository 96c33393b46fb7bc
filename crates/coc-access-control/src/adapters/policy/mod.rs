//! Policy decision engine backed by casbin.
//!
//! The model definition fixes the request tuple, the matcher and the effect;
//! the rule table is plain casbin CSV. Both ship embedded in the crate.

pub mod embedded;
pub mod enforcer;

pub use embedded::{embedded_enforcer, POLICY_MODEL, POLICY_RULES};
pub use enforcer::{CasbinEnforcer, UnavailableEngine};
