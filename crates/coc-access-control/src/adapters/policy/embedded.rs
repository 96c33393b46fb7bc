//! Policy artifacts compiled into the chaincode, loaded once per process.

use super::enforcer::CasbinEnforcer;
use crate::ports::PolicyError;
use lazy_static::lazy_static;
use std::sync::Arc;

/// Shipped casbin model definition.
pub const POLICY_MODEL: &str = include_str!("../../../policy/model.conf");
/// Shipped casbin rule table.
pub const POLICY_RULES: &str = include_str!("../../../policy/rules.csv");

lazy_static! {
    static ref EMBEDDED: Result<Arc<CasbinEnforcer>, PolicyError> =
        CasbinEnforcer::from_sources(POLICY_MODEL, POLICY_RULES).map(Arc::new);
}

/// The process-wide enforcer, or the load error every caller will see.
pub fn embedded_enforcer() -> Result<Arc<CasbinEnforcer>, PolicyError> {
    EMBEDDED.clone()
}
