//! Investigation records under `INVESTIGATION:<id>`.

use chrono::{DateTime, Utc};
use coc_ledger::{read_record, record_exists, scan_records, write_record, KeyPrefix, LedgerState};
use coc_types::{
    ChaincodeResult, Investigation, InvestigationStatus, NotFoundError, PolicyDomain,
    ValidationError,
};
use tracing::info;

pub struct InvestigationStore<'a, S: LedgerState + ?Sized> {
    state: &'a S,
}

impl<'a, S: LedgerState + ?Sized> InvestigationStore<'a, S> {
    pub fn new(state: &'a S) -> Self {
        Self { state }
    }

    /// Open a new investigation. Ids are unique per channel.
    pub fn create(
        &self,
        id: &str,
        title: &str,
        description: &str,
        created_by: &str,
        domain: PolicyDomain,
        now: DateTime<Utc>,
    ) -> ChaincodeResult<Investigation> {
        if id.is_empty() {
            return Err(ValidationError::EmptyField("investigation id").into());
        }
        let key = KeyPrefix::Investigation.key(id);
        if record_exists(self.state, &key)? {
            return Err(ValidationError::Duplicate {
                entity: "investigation",
                id: id.to_string(),
            }
            .into());
        }

        let investigation = Investigation {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            status: InvestigationStatus::Open,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
            channel: domain,
        };
        write_record(self.state, &key, &investigation)?;

        info!(id, created_by, %domain, "Investigation created");
        Ok(investigation)
    }

    pub fn get(&self, id: &str) -> ChaincodeResult<Investigation> {
        read_record(self.state, &KeyPrefix::Investigation.key(id))?
            .ok_or_else(|| NotFoundError::Investigation(id.to_string()).into())
    }

    /// Overwrite title and description. Empty values keep the current text.
    pub fn update(
        &self,
        id: &str,
        title: &str,
        description: &str,
        now: DateTime<Utc>,
    ) -> ChaincodeResult<Investigation> {
        let mut investigation = self.get(id)?;
        if !title.is_empty() {
            investigation.title = title.to_string();
        }
        if !description.is_empty() {
            investigation.description = description.to_string();
        }
        investigation.updated_at = now;
        self.save(&investigation)?;

        info!(id, "Investigation updated");
        Ok(investigation)
    }

    pub fn archive(&self, id: &str, now: DateTime<Utc>) -> ChaincodeResult<Investigation> {
        self.transition(id, "archive", InvestigationStatus::Open, InvestigationStatus::Archived, now)
    }

    pub fn reopen(&self, id: &str, now: DateTime<Utc>) -> ChaincodeResult<Investigation> {
        self.transition(id, "reopen", InvestigationStatus::Archived, InvestigationStatus::Open, now)
    }

    pub fn list(&self) -> ChaincodeResult<Vec<Investigation>> {
        scan_records(self.state, KeyPrefix::Investigation)
    }

    fn transition(
        &self,
        id: &str,
        action: &'static str,
        from: InvestigationStatus,
        to: InvestigationStatus,
        now: DateTime<Utc>,
    ) -> ChaincodeResult<Investigation> {
        let mut investigation = self.get(id)?;
        if investigation.status != from {
            return Err(ValidationError::InvalidTransition {
                id: id.to_string(),
                action,
                status: investigation.status.to_string(),
            }
            .into());
        }
        investigation.status = to;
        investigation.updated_at = now;
        self.save(&investigation)?;

        info!(id, status = %to, "Investigation status changed");
        Ok(investigation)
    }

    fn save(&self, investigation: &Investigation) -> ChaincodeResult<()> {
        write_record(
            self.state,
            &KeyPrefix::Investigation.key(&investigation.id),
            investigation,
        )
    }
}
