//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory ledger host. A production host adapter wraps the platform's
//! chaincode shim behind the same ports.

pub mod memory;

pub use memory::*;
