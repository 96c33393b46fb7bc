//! Casbin enforcer behind the [`PolicyEngine`] port.
//!
//! Casbin loads models and adapters asynchronously. Loading happens once,
//! driven to completion on a blocking executor, so evaluation never awaits.

use crate::domain::PolicyRequest;
use crate::ports::{PolicyEngine, PolicyError};
use casbin::{CoreApi, DefaultModel, Enforcer, MgmtApi, StringAdapter};
use coc_types::PolicyDomain;
use futures::executor::block_on;
use std::fmt;
use tracing::debug;

/// Columns of a rule row: role, domain, object, action, effect.
const RULE_FIELDS: usize = 5;

/// Immutable casbin enforcer. Evaluation takes `&self` only, so one
/// instance serves every transaction.
pub struct CasbinEnforcer {
    enforcer: Enforcer,
}

impl CasbinEnforcer {
    /// Build from a casbin model definition and a CSV rule table.
    pub fn from_sources(model: &str, rules: &str) -> Result<Self, PolicyError> {
        block_on(Self::load(model, rules))
    }

    async fn load(model: &str, rules: &str) -> Result<Self, PolicyError> {
        let model = DefaultModel::from_str(model)
            .await
            .map_err(|e| PolicyError::Model(e.to_string()))?;
        let adapter = StringAdapter::new(rules.to_string());
        let enforcer = Enforcer::new(model, adapter)
            .await
            .map_err(|e| PolicyError::Load(e.to_string()))?;

        let loaded = enforcer.get_policy();
        for rule in &loaded {
            check_rule(rule)?;
        }
        debug!(rules = loaded.len(), "Policy rule set loaded");
        Ok(Self { enforcer })
    }

    pub fn rule_count(&self) -> usize {
        self.enforcer.get_policy().len()
    }
}

/// Every row must be complete, name `hot` or `cold`, and carry an explicit
/// effect. `unknown` never appears in a rule, so it denies every tuple.
fn check_rule(rule: &[String]) -> Result<(), PolicyError> {
    let invalid = |reason: String| PolicyError::Rule {
        rule: rule.join(", "),
        reason,
    };

    if rule.len() != RULE_FIELDS {
        return Err(invalid(format!(
            "expected {RULE_FIELDS} fields, got {}",
            rule.len()
        )));
    }
    if !matches!(
        rule[1].parse::<PolicyDomain>(),
        Ok(PolicyDomain::Hot | PolicyDomain::Cold)
    ) {
        return Err(invalid(format!("domain '{}' is not hot or cold", rule[1])));
    }
    if !matches!(rule[4].as_str(), "allow" | "deny") {
        return Err(invalid(format!("effect '{}' is not allow or deny", rule[4])));
    }
    Ok(())
}

impl fmt::Debug for CasbinEnforcer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CasbinEnforcer")
            .field("rules", &self.rule_count())
            .finish()
    }
}

impl PolicyEngine for CasbinEnforcer {
    fn enforce(&self, request: &PolicyRequest) -> Result<bool, PolicyError> {
        let decision = self
            .enforcer
            .enforce((
                request.role.as_str(),
                request.domain.as_str(),
                request.object.as_str(),
                request.action.as_str(),
            ))
            .map_err(|e| PolicyError::Evaluation(e.to_string()))?;
        debug!(%request, decision, "Policy evaluated");
        Ok(decision)
    }
}

/// Engine standing in for a rule set that failed to load. Every request
/// fails, so callers deny.
#[derive(Debug, Clone)]
pub struct UnavailableEngine {
    reason: String,
}

impl UnavailableEngine {
    pub fn new(cause: &PolicyError) -> Self {
        Self {
            reason: cause.to_string(),
        }
    }
}

impl PolicyEngine for UnavailableEngine {
    fn enforce(&self, _request: &PolicyRequest) -> Result<bool, PolicyError> {
        Err(PolicyError::Unavailable(self.reason.clone()))
    }
}
