//! # Driven Ports (Outbound)
//!
//! Traits the ledger host implements for the chaincode.
//!
//! - [`LedgerState`]: key-prefixed get/put/delete and range scans
//! - [`TransactionContext`]: per-transaction attributes supplied by the host
//! - [`ChaincodeStub`]: both, as one handle

use crate::errors::LedgerError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Out-of-band side-channel fields attached to a transaction.
///
/// Not part of the committed payload and not bound to the creator's
/// identity proof.
pub type TransientMap = HashMap<String, Vec<u8>>;

/// Key-value world state of the current channel.
///
/// Reads observe committed state. Writes are buffered by the host and
/// applied only if the transaction commits.
pub trait LedgerState: Send + Sync {
    /// Committed value for `key`, or `None` if absent.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Buffer a write of `value` to `key`.
    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Buffer a deletion of `key`.
    fn del_state(&self, key: &str) -> Result<(), LedgerError>;

    /// Committed entries with `start <= key < end`, in key order.
    fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, LedgerError>;
}

/// Attributes of the transaction being executed.
pub trait TransactionContext: Send + Sync {
    /// Serialized identity envelope of the immediate submitter.
    fn creator(&self) -> Result<&[u8], LedgerError>;

    /// Side-channel map.
    fn transient(&self) -> Result<&TransientMap, LedgerError>;

    /// Channel (partition) the transaction runs on.
    fn channel_id(&self) -> &str;

    /// Host-assigned transaction id.
    fn tx_id(&self) -> &str;

    /// Timestamp fixed by the submitting client, identical on every endorser.
    fn tx_timestamp(&self) -> Result<DateTime<Utc>, LedgerError>;

    /// Invoked function name and its positional string arguments.
    fn function_and_parameters(&self) -> (String, Vec<String>);
}

/// Full host handle for one transaction.
pub trait ChaincodeStub: LedgerState + TransactionContext {}

impl<T: LedgerState + TransactionContext + ?Sized> ChaincodeStub for T {}
