//! Identity verifier returning a preset result, for pipeline tests that do
//! not need real certificates.

use crate::domain::IdentityInfo;
use crate::ports::IdentityVerifier;
use coc_types::IdentityError;

#[derive(Debug, Clone)]
pub struct FixedIdentityVerifier {
    outcome: Result<IdentityInfo, IdentityError>,
}

impl FixedIdentityVerifier {
    /// Always yields `identity`, whatever the creator bytes.
    pub fn new(identity: IdentityInfo) -> Self {
        Self {
            outcome: Ok(identity),
        }
    }

    /// Always fails with `error`.
    pub fn failing(error: IdentityError) -> Self {
        Self { outcome: Err(error) }
    }
}

impl IdentityVerifier for FixedIdentityVerifier {
    fn extract(&self, _creator: &[u8]) -> Result<IdentityInfo, IdentityError> {
        self.outcome.clone()
    }
}
