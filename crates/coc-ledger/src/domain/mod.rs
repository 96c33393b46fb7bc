//! # Domain Layer
//!
//! Key layout and record encoding. No host I/O beyond the [`LedgerState`]
//! port.
//!
//! [`LedgerState`]: crate::ports::LedgerState

pub mod codec;
pub mod keys;

pub use codec::*;
pub use keys::*;
