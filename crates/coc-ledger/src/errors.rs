use coc_types::{ChaincodeError, StorageError};
use thiserror::Error;

/// Failure reported by the ledger host itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Host could not service the call.
    #[error("ledger host unavailable: {0}")]
    Unavailable(String),

    /// Key rejected by the host (empty, or reserved characters).
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Host does not expose the requested transaction attribute.
    #[error("transaction attribute missing: {0}")]
    MissingAttribute(&'static str),
}

impl From<LedgerError> for ChaincodeError {
    fn from(err: LedgerError) -> Self {
        StorageError::Host(err.to_string()).into()
    }
}
