//! # coc-chaincode
//!
//! Chain-of-custody chaincode for digital evidence.
//!
//! ## Records
//!
//! | Prefix | Record | Store |
//! |--------|--------|-------|
//! | `INVESTIGATION:` | [`coc_types::Investigation`] | [`InvestigationStore`] |
//! | `EVIDENCE:` | [`coc_types::Evidence`] + custody trail | [`EvidenceStore`] |
//! | `GUIDMAP:` | [`coc_types::GuidMapping`] | [`GuidRegistry`] |
//! | `USERROLE:` | [`coc_types::UserRoleRecord`] | [`coc_access_control::PrincipalRegistry`] |
//!
//! ## Entry Point
//!
//! [`CustodyChaincode::invoke`] parses the call into an [`Operation`], runs
//! it through the access gate and executes it. The ledger host commits the
//! write set only when the returned [`Response`] is a success.

pub mod domain;
pub mod operation;
pub mod response;
pub mod service;

pub use domain::{CustodyUpdate, EvidenceStore, GuidRegistry, InvestigationStore, NewEvidence};
pub use operation::{AdminOperation, Operation, UserOperation};
pub use response::{ErrorBody, Response};
pub use service::{ChaincodeStats, CustodyChaincode, HashVerification, INIT_MESSAGE};
