//! # Custody Chaincode Service
//!
//! Entry point the ledger host calls. Every invocation runs:
//!
//! 1. parse the function name and arguments into an [`Operation`]
//! 2. admin operations: verify the administrator certificate;
//!    user operations: the full gateway / role claim / policy pipeline
//! 3. execute against the record stores with the transaction timestamp
//! 4. wrap the outcome in a [`Response`]
//!
//! The service never commits. On error the host discards the write set.

use crate::domain::{CustodyUpdate, EvidenceStore, GuidRegistry, InvestigationStore, NewEvidence};
use crate::operation::{AdminOperation, Operation, UserOperation};
use crate::response::Response;
use coc_access_control::{
    embedded_enforcer, AccessControlConfig, AccessGate, AuthenticatedUser, ConfigError,
    IdentityVerifier, PolicyEngine, PolicyError, PrincipalRegistry, UnavailableEngine,
    VerifiedAdmin, X509IdentityVerifier,
};
use coc_ledger::ChaincodeStub;
use coc_types::{
    AuthorizationError, ChaincodeError, ChaincodeResult, ErrorKind, PolicyDomain, StorageError,
};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Message returned by a successful `Init`.
pub const INIT_MESSAGE: &str = "Chaincode initialized successfully";

/// Invocation counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChaincodeStats {
    /// Total invocations dispatched.
    pub invocations: u64,
    /// Invocations that returned a success response.
    pub succeeded: u64,
    /// Failures of kind identity or authorization.
    pub rejected: u64,
    /// All other failures.
    pub failed: u64,
}

/// The chain-of-custody chaincode.
pub struct CustodyChaincode {
    gate: AccessGate,
    /// Set when the embedded policy failed to load.
    engine_error: Option<PolicyError>,
    stats: RwLock<ChaincodeStats>,
}

impl CustodyChaincode {
    /// Production wiring: X.509 identity extraction and the embedded rule set.
    ///
    /// Fails only on an invalid configuration. A rule set that fails to
    /// load does not abort construction: every user operation is then
    /// denied and `Init` reports the failure.
    pub fn new(config: AccessControlConfig) -> Result<Self, ConfigError> {
        let verifier = Arc::new(X509IdentityVerifier::new(config.admin.marker.clone()));
        match embedded_enforcer() {
            Ok(engine) => Self::with_components(config, verifier, engine),
            Err(e) => {
                error!(error = %e, "Embedded policy failed to load; denying all user operations");
                let engine = Arc::new(UnavailableEngine::new(&e));
                let mut chaincode = Self::with_components(config, verifier, engine)?;
                chaincode.engine_error = Some(e);
                Ok(chaincode)
            }
        }
    }

    /// Wiring with explicit collaborators.
    pub fn with_components(
        config: AccessControlConfig,
        verifier: Arc<dyn IdentityVerifier>,
        engine: Arc<dyn PolicyEngine>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            gate: AccessGate::new(config, verifier, engine)?,
            engine_error: None,
            stats: RwLock::new(ChaincodeStats::default()),
        })
    }

    /// Parse a TOML configuration and build the production wiring.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Self::new(AccessControlConfig::from_toml_str(source)?)
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Snapshot of the invocation counters.
    pub fn stats(&self) -> ChaincodeStats {
        self.stats.read().clone()
    }

    /// Instantiation hook. Touches no state.
    pub fn init<S: ChaincodeStub + ?Sized>(&self, stub: &S) -> Response {
        if let Some(e) = &self.engine_error {
            let err = ChaincodeError::from(AuthorizationError::EngineUnavailable(e.to_string()));
            error!(channel = %stub.channel_id(), error = %err, "Init failed");
            return Response::error(&err);
        }
        info!(channel = %stub.channel_id(), "Chaincode initialized");
        Response::success(INIT_MESSAGE)
    }

    /// Dispatch one transaction.
    #[instrument(
        skip_all,
        fields(function = tracing::field::Empty, channel = %stub.channel_id(), tx_id = %stub.tx_id())
    )]
    pub fn invoke<S: ChaincodeStub + ?Sized>(&self, stub: &S) -> Response {
        let (function, args) = stub.function_and_parameters();
        tracing::Span::current().record("function", function.as_str());

        let result = Operation::parse(&function, args)
            .map_err(ChaincodeError::from)
            .and_then(|op| self.execute(stub, op));

        let mut stats = self.stats.write();
        stats.invocations += 1;
        match result {
            Ok(payload) => {
                stats.succeeded += 1;
                debug!(bytes = payload.len(), "Invocation succeeded");
                Response::success(payload)
            }
            Err(err) => {
                match err.kind() {
                    ErrorKind::Identity | ErrorKind::Authorization => stats.rejected += 1,
                    _ => stats.failed += 1,
                }
                warn!(kind = %err.kind(), error = %err, "Invocation failed");
                Response::error(&err)
            }
        }
    }

    fn execute<S: ChaincodeStub + ?Sized>(&self, stub: &S, op: Operation) -> ChaincodeResult<Vec<u8>> {
        match op {
            Operation::Admin(op) => {
                let admin = self.gate.authenticate_admin(stub)?;
                self.run_admin(stub, &admin, op)
            }
            Operation::User(op) => {
                let user = self.gate.authorize_user(stub, &op.requirements())?;
                let domain = self.gate.domain(stub);
                self.run_user(stub, &user, domain, op)
            }
        }
    }

    fn run_admin<S: ChaincodeStub + ?Sized>(
        &self,
        stub: &S,
        admin: &VerifiedAdmin,
        op: AdminOperation,
    ) -> ChaincodeResult<Vec<u8>> {
        let registry = PrincipalRegistry::new(stub);
        match op {
            AdminOperation::SetUserRoles {
                principal_id,
                roles_csv,
            } => {
                registry.set_roles(admin, &principal_id, &roles_csv, stub.tx_timestamp()?)?;
                Ok(format!("Roles set for principal: {principal_id}").into_bytes())
            }
            AdminOperation::GetUserRoles { principal_id } => {
                to_json("user role", &registry.get_roles(&principal_id)?)
            }
            AdminOperation::ListUserRoles => to_json("user roles", &registry.list(admin)?),
            AdminOperation::DeleteUserRole { principal_id } => {
                registry.delete(admin, &principal_id)?;
                Ok(format!("User role deleted for principal: {principal_id}").into_bytes())
            }
            AdminOperation::DeleteGuidMapping { guid } => {
                GuidRegistry::new(stub).delete(&guid)?;
                info!(guid = %guid, admin = admin.common_name(), "GUID mapping removed by admin");
                Ok(format!("GUID mapping deleted: {guid}").into_bytes())
            }
        }
    }

    fn run_user<S: ChaincodeStub + ?Sized>(
        &self,
        stub: &S,
        user: &AuthenticatedUser,
        domain: PolicyDomain,
        op: UserOperation,
    ) -> ChaincodeResult<Vec<u8>> {
        let investigations = InvestigationStore::new(stub);
        let evidence = EvidenceStore::new(stub);
        let guids = GuidRegistry::new(stub);
        let created_by = user.user_id.as_str();

        match op {
            UserOperation::CreateInvestigation {
                id,
                title,
                description,
            } => {
                let now = stub.tx_timestamp()?;
                investigations.create(&id, &title, &description, created_by, domain, now)?;
                Ok(format!("Investigation created: {id}").into_bytes())
            }
            UserOperation::GetInvestigation { id } => {
                to_json("investigation", &investigations.get(&id)?)
            }
            UserOperation::UpdateInvestigation {
                id,
                title,
                description,
            } => {
                investigations.update(&id, &title, &description, stub.tx_timestamp()?)?;
                Ok(format!("Investigation updated: {id}").into_bytes())
            }
            UserOperation::ListInvestigations => to_json("investigations", &investigations.list()?),
            UserOperation::ArchiveInvestigation { id } => {
                investigations.archive(&id, stub.tx_timestamp()?)?;
                Ok(format!("Investigation archived: {id}").into_bytes())
            }
            UserOperation::ReopenInvestigation { id } => {
                investigations.reopen(&id, stub.tx_timestamp()?)?;
                Ok(format!("Investigation reopened: {id}").into_bytes())
            }

            UserOperation::AddEvidence {
                id,
                investigation_id,
                hash,
                ipfs_cid,
                meta_json,
            } => {
                let meta = NewEvidence::parse_meta(&meta_json)?;
                let new = NewEvidence {
                    id: id.clone(),
                    investigation_id,
                    hash,
                    ipfs_cid,
                    meta,
                };
                evidence.add(new, created_by, domain, stub.tx_timestamp()?)?;
                Ok(format!("Evidence added: {id}").into_bytes())
            }
            UserOperation::GetEvidence { id } => to_json("evidence", &evidence.get(&id)?),
            UserOperation::ListEvidence => to_json("evidence list", &evidence.list()?),
            UserOperation::ListEvidenceByInvestigation { investigation_id } => to_json(
                "evidence list",
                &evidence.list_by_investigation(&investigation_id)?,
            ),
            UserOperation::AddCustodyEvent {
                evidence_id,
                action,
                custodian,
                location,
                description,
            } => {
                let update = CustodyUpdate {
                    action,
                    custodian,
                    location,
                    description,
                };
                evidence.append_custody(&evidence_id, update, stub.tx_timestamp()?)?;
                Ok(format!("Custody event added to evidence: {evidence_id}").into_bytes())
            }
            UserOperation::VerifyEvidenceHash { evidence_id, hash } => {
                let valid = evidence.verify_hash(&evidence_id, &hash)?;
                to_json("hash verification", &HashVerification { evidence_id, valid })
            }

            UserOperation::CreateGuidMapping {
                guid,
                evidence_id,
                description,
            } => {
                let now = stub.tx_timestamp()?;
                guids.create(&guid, &evidence_id, created_by, &description, now)?;
                Ok(format!("GUID mapping created: {guid}").into_bytes())
            }
            UserOperation::ResolveGuid { guid } => to_json("GUID mapping", &guids.resolve(&guid)?),
            UserOperation::GetEvidenceByGuid { guid } => {
                to_json("evidence", &guids.resolve_to_evidence(&guid)?)
            }
            UserOperation::ListGuidMappings => to_json("GUID mappings", &guids.list()?),
            UserOperation::UpdateGuidDescription { guid, description } => {
                guids.update_description(&guid, &description)?;
                Ok(format!("GUID mapping description updated: {guid}").into_bytes())
            }
        }
    }
}

/// Result of `VerifyEvidenceHash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashVerification {
    pub evidence_id: String,
    pub valid: bool,
}

fn to_json<T: Serialize + ?Sized>(what: &str, value: &T) -> ChaincodeResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| {
        StorageError::Codec {
            key: what.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
