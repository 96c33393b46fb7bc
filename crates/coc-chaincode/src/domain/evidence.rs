//! Evidence records and their custody trail under `EVIDENCE:<id>`.

use crate::domain::investigation::InvestigationStore;
use chrono::{DateTime, Utc};
use coc_ledger::{read_record, record_exists, scan_records, write_record, KeyPrefix, LedgerState};
use coc_types::{
    ChaincodeResult, CustodyEvent, Evidence, EvidenceMeta, NotFoundError, PolicyDomain,
    ValidationError,
};
use tracing::info;

/// Custody action recorded when evidence is first registered.
pub const COLLECTED_ACTION: &str = "collected";
const COLLECTED_DESCRIPTION: &str = "Evidence added to blockchain";

/// Arguments of a new evidence registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvidence {
    pub id: String,
    pub investigation_id: String,
    pub hash: String,
    pub ipfs_cid: String,
    pub meta: EvidenceMeta,
}

impl NewEvidence {
    /// Parse the metadata argument.
    pub fn parse_meta(meta_json: &str) -> Result<EvidenceMeta, ValidationError> {
        serde_json::from_str(meta_json)
            .map_err(|e| ValidationError::MalformedPayload(format!("evidence metadata: {e}")))
    }
}

/// A custody hand-over to append. The timestamp comes from the transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustodyUpdate {
    pub action: String,
    pub custodian: String,
    pub location: String,
    pub description: String,
}

pub struct EvidenceStore<'a, S: LedgerState + ?Sized> {
    state: &'a S,
}

impl<'a, S: LedgerState + ?Sized> EvidenceStore<'a, S> {
    pub fn new(state: &'a S) -> Self {
        Self { state }
    }

    /// Register evidence under an existing investigation and seed its
    /// custody trail with a `collected` event.
    pub fn add(
        &self,
        new: NewEvidence,
        created_by: &str,
        domain: PolicyDomain,
        now: DateTime<Utc>,
    ) -> ChaincodeResult<Evidence> {
        if new.id.is_empty() {
            return Err(ValidationError::EmptyField("evidence id").into());
        }
        let key = KeyPrefix::Evidence.key(&new.id);
        if record_exists(self.state, &key)? {
            return Err(ValidationError::Duplicate {
                entity: "evidence",
                id: new.id,
            }
            .into());
        }
        InvestigationStore::new(self.state).get(&new.investigation_id)?;

        let evidence = Evidence {
            id: new.id,
            investigation_id: new.investigation_id,
            hash: new.hash,
            ipfs_cid: new.ipfs_cid,
            created_by: created_by.to_string(),
            created_at: now,
            channel: domain,
            meta: new.meta,
            chain_of_custody: vec![CustodyEvent {
                timestamp: now,
                action: COLLECTED_ACTION.to_string(),
                custodian: created_by.to_string(),
                location: String::new(),
                description: COLLECTED_DESCRIPTION.to_string(),
            }],
        };
        write_record(self.state, &key, &evidence)?;

        info!(
            id = %evidence.id,
            investigation_id = %evidence.investigation_id,
            created_by,
            "Evidence added"
        );
        Ok(evidence)
    }

    pub fn get(&self, id: &str) -> ChaincodeResult<Evidence> {
        read_record(self.state, &KeyPrefix::Evidence.key(id))?
            .ok_or_else(|| NotFoundError::Evidence(id.to_string()).into())
    }

    /// Append one event to the custody trail.
    pub fn append_custody(
        &self,
        evidence_id: &str,
        update: CustodyUpdate,
        now: DateTime<Utc>,
    ) -> ChaincodeResult<Evidence> {
        let mut evidence = self.get(evidence_id)?;
        evidence.chain_of_custody.push(CustodyEvent {
            timestamp: now,
            action: update.action,
            custodian: update.custodian,
            location: update.location,
            description: update.description,
        });
        write_record(self.state, &KeyPrefix::Evidence.key(evidence_id), &evidence)?;

        info!(
            evidence_id,
            events = evidence.chain_of_custody.len(),
            "Custody event appended"
        );
        Ok(evidence)
    }

    pub fn list(&self) -> ChaincodeResult<Vec<Evidence>> {
        scan_records(self.state, KeyPrefix::Evidence)
    }

    pub fn list_by_investigation(&self, investigation_id: &str) -> ChaincodeResult<Vec<Evidence>> {
        let mut all = self.list()?;
        all.retain(|evidence| evidence.investigation_id == investigation_id);
        Ok(all)
    }

    /// Returns true if `hash` equals the registered content hash.
    pub fn verify_hash(&self, evidence_id: &str, hash: &str) -> ChaincodeResult<bool> {
        Ok(self.get(evidence_id)?.hash == hash)
    }
}
