//! Cross-check of a claimed role against the principal's registry record.

use crate::domain::principal::PrincipalId;
use coc_types::{AuthorizationError, ChaincodeResult, NotFoundError, UserRoleRecord};

/// Accept `claimed` only if the registry grants it to `principal`.
///
/// `record` is the registry lookup result; `None` means the principal was
/// never registered.
pub fn validate_role_claim(
    principal: &PrincipalId,
    record: Option<UserRoleRecord>,
    claimed: &str,
) -> ChaincodeResult<UserRoleRecord> {
    let record =
        record.ok_or_else(|| NotFoundError::UnregisteredUser(principal.as_str().to_string()))?;

    if !record.holds(claimed) {
        return Err(AuthorizationError::RoleNotHeld {
            principal_id: principal.as_str().to_string(),
            claimed: claimed.to_string(),
            held: record.role_names(),
        }
        .into());
    }
    Ok(record)
}
