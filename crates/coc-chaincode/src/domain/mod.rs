//! # Domain Layer
//!
//! Record stores over [`coc_ledger::LedgerState`]. They assume the caller
//! already passed access control.

pub mod evidence;
pub mod guid;
pub mod investigation;

pub use evidence::{CustodyUpdate, EvidenceStore, NewEvidence, COLLECTED_ACTION};
pub use guid::GuidRegistry;
pub use investigation::InvestigationStore;
