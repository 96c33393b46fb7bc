//! # Ports Layer
//!
//! Driven ports of the access layer: certificate decoding and policy
//! evaluation. Both sit behind traits so pipeline tests can substitute
//! synthetic identities and decisions.

pub mod outbound;

pub use outbound::*;
