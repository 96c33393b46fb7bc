//! # Chain-of-Custody Shared Types
//!
//! Entities persisted on the ledger and the error taxonomy every layer
//! reports through.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: record layouts live here and nowhere else.
//! - **Tagged Errors**: every failure carries exactly one [`ErrorKind`] so the
//!   host response stays machine-inspectable.
//! - **Closed Role Vocabulary**: [`Role`] has four variants; anything else is
//!   rejected when parsed.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
