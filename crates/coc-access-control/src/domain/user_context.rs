//! Delegated end user read from the transaction side channel.
//!
//! Values here are unauthenticated until the role claim is checked against
//! the registry.

use crate::config::TransientFieldConfig;
use coc_ledger::TransientMap;
use coc_types::ValidationError;

/// End user and claimed role asserted by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
    pub claimed_role: String,
}

impl UserContext {
    /// Read both fields. Absent, empty or non-UTF-8 values are rejected.
    pub fn from_transient(
        transient: &TransientMap,
        fields: &TransientFieldConfig,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id: read_field(transient, &fields.user_id)?,
            claimed_role: read_field(transient, &fields.role)?,
        })
    }
}

fn read_field(transient: &TransientMap, name: &str) -> Result<String, ValidationError> {
    let bytes = transient
        .get(name)
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| ValidationError::MissingTransientField(name.to_string()))?;
    String::from_utf8(bytes.clone())
        .map_err(|_| ValidationError::NonUtf8TransientField(name.to_string()))
}
