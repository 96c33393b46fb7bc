//! JSON record codec over [`LedgerState`].
//!
//! Host failures become [`StorageError`]s tagged with the key involved.

use crate::domain::keys::KeyPrefix;
use crate::ports::LedgerState;
use coc_types::{ChaincodeResult, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Read and decode the record at `key`.
pub fn read_record<T, S>(state: &S, key: &str) -> ChaincodeResult<Option<T>>
where
    T: DeserializeOwned,
    S: LedgerState + ?Sized,
{
    let bytes = state.get_state(key).map_err(|e| StorageError::Read {
        key: key.to_string(),
        reason: e.to_string(),
    })?;

    match bytes {
        None => Ok(None),
        Some(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| {
                StorageError::Codec {
                    key: key.to_string(),
                    reason: e.to_string(),
                }
                .into()
            }),
    }
}

/// Encode and buffer `record` at `key`.
pub fn write_record<T, S>(state: &S, key: &str, record: &T) -> ChaincodeResult<()>
where
    T: Serialize,
    S: LedgerState + ?Sized,
{
    let bytes = serde_json::to_vec(record).map_err(|e| StorageError::Codec {
        key: key.to_string(),
        reason: e.to_string(),
    })?;

    state.put_state(key, bytes).map_err(|e| {
        StorageError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Returns true if any value is committed at `key`.
pub fn record_exists<S>(state: &S, key: &str) -> ChaincodeResult<bool>
where
    S: LedgerState + ?Sized,
{
    state
        .get_state(key)
        .map(|bytes| bytes.is_some())
        .map_err(|e| {
            StorageError::Read {
                key: key.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
}

/// Buffer deletion of `key`.
pub fn delete_record<S>(state: &S, key: &str) -> ChaincodeResult<()>
where
    S: LedgerState + ?Sized,
{
    state.del_state(key).map_err(|e| {
        StorageError::Delete {
            key: key.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Decode every record under `prefix`, in key order.
///
/// Entries that fail to decode are skipped so one bad record cannot hide
/// the rest of a listing.
pub fn scan_records<T, S>(state: &S, prefix: KeyPrefix) -> ChaincodeResult<Vec<T>>
where
    T: DeserializeOwned,
    S: LedgerState + ?Sized,
{
    let (start, end) = prefix.range();
    let entries = state
        .get_state_by_range(&start, &end)
        .map_err(|e| StorageError::Scan {
            start: start.clone(),
            end: end.clone(),
            reason: e.to_string(),
        })?;

    let mut records = Vec::with_capacity(entries.len());
    for (key, bytes) in entries {
        match serde_json::from_slice(&bytes) {
            Ok(record) => records.push(record),
            Err(e) => warn!(key = %key, error = %e, "Skipping undecodable record"),
        }
    }
    Ok(records)
}
