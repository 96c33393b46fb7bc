//! # GUID Indirection
//!
//! Opaque handles disclosed to external parties in place of internal
//! evidence ids, stored under `GUIDMAP:<guid>`.
//!
//! The target evidence must exist when a mapping is created. It is not
//! checked again afterwards, so a mapping can outlive its evidence; in that
//! case [`GuidRegistry::resolve`] still succeeds and
//! [`GuidRegistry::resolve_to_evidence`] reports the evidence as not found.
//!
//! Authorization happens in the dispatcher, not here.

use crate::domain::evidence::EvidenceStore;
use chrono::{DateTime, Utc};
use coc_ledger::{
    delete_record, read_record, record_exists, scan_records, write_record, KeyPrefix, LedgerState,
};
use coc_types::{ChaincodeResult, Evidence, GuidMapping, NotFoundError, ValidationError};
use tracing::info;

pub struct GuidRegistry<'a, S: LedgerState + ?Sized> {
    state: &'a S,
}

impl<'a, S: LedgerState + ?Sized> GuidRegistry<'a, S> {
    pub fn new(state: &'a S) -> Self {
        Self { state }
    }

    /// Map `guid` to an existing evidence record.
    pub fn create(
        &self,
        guid: &str,
        evidence_id: &str,
        created_by: &str,
        description: &str,
        now: DateTime<Utc>,
    ) -> ChaincodeResult<GuidMapping> {
        if guid.is_empty() {
            return Err(ValidationError::EmptyField("guid").into());
        }
        let key = KeyPrefix::GuidMap.key(guid);
        if record_exists(self.state, &key)? {
            return Err(ValidationError::Duplicate {
                entity: "GUID mapping",
                id: guid.to_string(),
            }
            .into());
        }
        EvidenceStore::new(self.state).get(evidence_id)?;

        let mapping = GuidMapping {
            guid: guid.to_string(),
            internal_evidence_id: evidence_id.to_string(),
            created_by: created_by.to_string(),
            created_at: now,
            description: description.to_string(),
        };
        write_record(self.state, &key, &mapping)?;

        info!(guid, created_by, "GUID mapping created");
        Ok(mapping)
    }

    pub fn resolve(&self, guid: &str) -> ChaincodeResult<GuidMapping> {
        read_record(self.state, &KeyPrefix::GuidMap.key(guid))?
            .ok_or_else(|| NotFoundError::GuidMapping(guid.to_string()).into())
    }

    /// Resolve, then load the evidence the mapping points at.
    pub fn resolve_to_evidence(&self, guid: &str) -> ChaincodeResult<Evidence> {
        let mapping = self.resolve(guid)?;
        EvidenceStore::new(self.state).get(&mapping.internal_evidence_id)
    }

    /// Replace the description. Nothing else about a mapping changes.
    pub fn update_description(&self, guid: &str, description: &str) -> ChaincodeResult<GuidMapping> {
        let mut mapping = self.resolve(guid)?;
        mapping.description = description.to_string();
        write_record(self.state, &KeyPrefix::GuidMap.key(guid), &mapping)?;

        info!(guid, "GUID mapping description updated");
        Ok(mapping)
    }

    pub fn list(&self) -> ChaincodeResult<Vec<GuidMapping>> {
        scan_records(self.state, KeyPrefix::GuidMap)
    }

    pub fn delete(&self, guid: &str) -> ChaincodeResult<()> {
        let key = KeyPrefix::GuidMap.key(guid);
        if !record_exists(self.state, &key)? {
            return Err(NotFoundError::GuidMapping(guid.to_string()).into());
        }
        delete_record(self.state, &key)?;

        info!(guid, "GUID mapping deleted");
        Ok(())
    }
}
