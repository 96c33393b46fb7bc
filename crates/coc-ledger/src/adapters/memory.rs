//! # In-Memory Ledger Host
//!
//! [`InMemoryLedger`] holds committed world state for one channel.
//! [`MockStub`] is one transaction against it: reads see committed state,
//! writes go to a private write set, and [`MockStub::commit`] applies the
//! whole set at once. Dropping a stub without committing discards it.

use crate::errors::LedgerError;
use crate::ports::{LedgerState, TransactionContext, TransientMap};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

// =============================================================================
// COMMITTED STATE
// =============================================================================

/// Committed key-value state. Direct writes apply immediately.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<BTreeMap<String, Vec<u8>>>,
    unavailable: AtomicBool,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle for building stubs.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Make every subsequent call fail with [`LedgerError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of committed keys.
    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Committed value, bypassing availability checks. For assertions.
    pub fn snapshot(&self, key: &str) -> Option<Vec<u8>> {
        self.state.read().get(key).cloned()
    }

    fn check_available(&self) -> Result<(), LedgerError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable("in-memory host offline".into()));
        }
        Ok(())
    }

    fn apply(&self, writes: BTreeMap<String, Option<Vec<u8>>>) {
        let mut state = self.state.write();
        for (key, value) in writes {
            match value {
                Some(bytes) => {
                    state.insert(key, bytes);
                }
                None => {
                    state.remove(&key);
                }
            }
        }
    }
}

fn validate_key(key: &str) -> Result<(), LedgerError> {
    if key.is_empty() {
        return Err(LedgerError::InvalidKey("empty key".into()));
    }
    Ok(())
}

impl LedgerState for InMemoryLedger {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.check_available()?;
        Ok(self.state.read().get(key).cloned())
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.check_available()?;
        validate_key(key)?;
        self.state.write().insert(key.to_string(), value);
        Ok(())
    }

    fn del_state(&self, key: &str) -> Result<(), LedgerError> {
        self.check_available()?;
        validate_key(key)?;
        self.state.write().remove(key);
        Ok(())
    }

    fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        self.check_available()?;
        if start >= end {
            return Ok(Vec::new());
        }
        let state = self.state.read();
        Ok(state
            .range(start.to_string()..end.to_string())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

// =============================================================================
// TRANSACTION STUB
// =============================================================================

/// One transaction executing against an [`InMemoryLedger`].
pub struct MockStub {
    ledger: Arc<InMemoryLedger>,
    writes: Mutex<BTreeMap<String, Option<Vec<u8>>>>,
    creator: Option<Vec<u8>>,
    transient: TransientMap,
    channel_id: String,
    tx_id: String,
    timestamp: DateTime<Utc>,
    function: String,
    args: Vec<String>,
}

impl MockStub {
    /// Start building a transaction on `ledger`.
    pub fn builder(ledger: Arc<InMemoryLedger>) -> MockStubBuilder {
        MockStubBuilder {
            ledger,
            creator: None,
            transient: TransientMap::new(),
            channel_id: String::new(),
            tx_id: None,
            timestamp: None,
            function: String::new(),
            args: Vec::new(),
        }
    }

    /// Number of buffered writes and deletes.
    pub fn pending_writes(&self) -> usize {
        self.writes.lock().len()
    }

    /// Apply the write set to the ledger. Returns the number of keys touched.
    pub fn commit(self) -> usize {
        let writes = self.writes.into_inner();
        let touched = writes.len();
        debug!(tx_id = %self.tx_id, touched, "Committing write set");
        self.ledger.apply(writes);
        touched
    }
}

impl LedgerState for MockStub {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.ledger.get_state(key)
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.ledger.check_available()?;
        validate_key(key)?;
        self.writes.lock().insert(key.to_string(), Some(value));
        Ok(())
    }

    fn del_state(&self, key: &str) -> Result<(), LedgerError> {
        self.ledger.check_available()?;
        validate_key(key)?;
        self.writes.lock().insert(key.to_string(), None);
        Ok(())
    }

    fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        self.ledger.get_state_by_range(start, end)
    }
}

impl TransactionContext for MockStub {
    fn creator(&self) -> Result<&[u8], LedgerError> {
        self.creator
            .as_deref()
            .ok_or(LedgerError::MissingAttribute("creator"))
    }

    fn transient(&self) -> Result<&TransientMap, LedgerError> {
        Ok(&self.transient)
    }

    fn channel_id(&self) -> &str {
        &self.channel_id
    }

    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn tx_timestamp(&self) -> Result<DateTime<Utc>, LedgerError> {
        Ok(self.timestamp)
    }

    fn function_and_parameters(&self) -> (String, Vec<String>) {
        (self.function.clone(), self.args.clone())
    }
}

/// Builder for [`MockStub`].
pub struct MockStubBuilder {
    ledger: Arc<InMemoryLedger>,
    creator: Option<Vec<u8>>,
    transient: TransientMap,
    channel_id: String,
    tx_id: Option<String>,
    timestamp: Option<DateTime<Utc>>,
    function: String,
    args: Vec<String>,
}

impl MockStubBuilder {
    /// Serialized creator identity envelope.
    pub fn creator(mut self, creator: impl Into<Vec<u8>>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Add a side-channel field.
    pub fn transient(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.transient.insert(key.into(), value.into());
        self
    }

    pub fn channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.tx_id = Some(tx_id.into());
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Function name and positional arguments.
    pub fn invoke<I, A>(mut self, function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.function = function.into();
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> MockStub {
        MockStub {
            ledger: self.ledger,
            writes: Mutex::new(BTreeMap::new()),
            creator: self.creator,
            transient: self.transient,
            channel_id: self.channel_id,
            tx_id: self.tx_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            function: self.function,
            args: self.args,
        }
    }
}
