//! # Identity Exploits
//!
//! Attempts to act with more authority than the submitter holds. Every
//! attempt must fail with an identity, validation, not-found or
//! authorization error and leave the ledger untouched.

pub mod escalation;
pub mod spoofing;
