//! # coc-ledger
//!
//! Boundary between the chaincode and the permissioned ledger host.
//!
//! ## Role in System
//!
//! - **Driven Ports**: [`LedgerState`] (key-value state) and
//!   [`TransactionContext`] (creator identity, transient side channel,
//!   channel id, transaction timestamp).
//! - **Record Codec**: JSON encoding of records under fixed key prefixes.
//! - **In-Memory Host**: [`InMemoryLedger`] + [`MockStub`] with
//!   commit-or-discard write sets, used by every test in the workspace.
//!
//! ## Atomicity
//!
//! The host commits a transaction's writes all together or not at all. Code
//! above this layer never rolls back by hand; it returns an error and the
//! write set is discarded.

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use errors::LedgerError;
pub use ports::*;
