//! Typed operation table.
//!
//! Every invocation is parsed into an [`Operation`] before any identity
//! work, so arity errors surface first. The split between
//! [`AdminOperation`] and [`UserOperation`] fixes the access path each
//! operation takes.

use coc_access_control::{Action, ObjectRef};
use coc_types::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Submitter must be a verified administrator.
    Admin(AdminOperation),
    /// Delegated user via the trusted gateway.
    User(UserOperation),
}

/// Registry administration and GUID removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminOperation {
    SetUserRoles { principal_id: String, roles_csv: String },
    GetUserRoles { principal_id: String },
    ListUserRoles,
    DeleteUserRole { principal_id: String },
    DeleteGuidMapping { guid: String },
}

/// Operations performed on behalf of a delegated end user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserOperation {
    // Investigations
    CreateInvestigation { id: String, title: String, description: String },
    GetInvestigation { id: String },
    UpdateInvestigation { id: String, title: String, description: String },
    ListInvestigations,
    ArchiveInvestigation { id: String },
    ReopenInvestigation { id: String },

    // Evidence
    AddEvidence {
        id: String,
        investigation_id: String,
        hash: String,
        ipfs_cid: String,
        meta_json: String,
    },
    GetEvidence { id: String },
    ListEvidence,
    ListEvidenceByInvestigation { investigation_id: String },
    AddCustodyEvent {
        evidence_id: String,
        action: String,
        custodian: String,
        location: String,
        description: String,
    },
    VerifyEvidenceHash { evidence_id: String, hash: String },

    // GUID indirection
    CreateGuidMapping { guid: String, evidence_id: String, description: String },
    ResolveGuid { guid: String },
    GetEvidenceByGuid { guid: String },
    ListGuidMappings,
    UpdateGuidDescription { guid: String, description: String },
}

impl Operation {
    /// Parse a function name and its positional arguments.
    pub fn parse(function: &str, args: Vec<String>) -> Result<Self, ValidationError> {
        use AdminOperation as A;
        use UserOperation as U;

        let op = match function {
            "SetUserRoles" => {
                let [principal_id, roles_csv] = arity(function, args, ["principalID", "rolesCsv"])?;
                Operation::Admin(A::SetUserRoles { principal_id, roles_csv })
            }
            "GetUserRoles" => {
                let [principal_id] = arity(function, args, ["principalID"])?;
                Operation::Admin(A::GetUserRoles { principal_id })
            }
            "ListUserRoles" => {
                let [] = arity(function, args, [])?;
                Operation::Admin(A::ListUserRoles)
            }
            "DeleteUserRole" => {
                let [principal_id] = arity(function, args, ["principalID"])?;
                Operation::Admin(A::DeleteUserRole { principal_id })
            }
            "DeleteGUIDMapping" => {
                let [guid] = arity(function, args, ["guid"])?;
                Operation::Admin(A::DeleteGuidMapping { guid })
            }

            "CreateInvestigation" => {
                let [id, title, description] = arity(function, args, ["id", "title", "description"])?;
                Operation::User(U::CreateInvestigation { id, title, description })
            }
            "GetInvestigation" => {
                let [id] = arity(function, args, ["id"])?;
                Operation::User(U::GetInvestigation { id })
            }
            "UpdateInvestigation" => {
                let [id, title, description] = arity(function, args, ["id", "title", "description"])?;
                Operation::User(U::UpdateInvestigation { id, title, description })
            }
            "ListInvestigations" => {
                let [] = arity(function, args, [])?;
                Operation::User(U::ListInvestigations)
            }
            "ArchiveInvestigation" => {
                let [id] = arity(function, args, ["id"])?;
                Operation::User(U::ArchiveInvestigation { id })
            }
            "ReopenInvestigation" => {
                let [id] = arity(function, args, ["id"])?;
                Operation::User(U::ReopenInvestigation { id })
            }

            "AddEvidence" => {
                // Trailing arguments beyond the metadata are ignored.
                let names = ["id", "investigationId", "hash", "ipfsCid", "metaJSON"];
                let mut args = args;
                args.truncate(names.len());
                let [id, investigation_id, hash, ipfs_cid, meta_json] =
                    arity(function, args, names).map_err(at_least)?;
                Operation::User(U::AddEvidence { id, investigation_id, hash, ipfs_cid, meta_json })
            }
            "GetEvidence" => {
                let [id] = arity(function, args, ["id"])?;
                Operation::User(U::GetEvidence { id })
            }
            "ListEvidence" => {
                let [] = arity(function, args, [])?;
                Operation::User(U::ListEvidence)
            }
            "ListEvidenceByInvestigation" => {
                let [investigation_id] = arity(function, args, ["investigationId"])?;
                Operation::User(U::ListEvidenceByInvestigation { investigation_id })
            }
            "AddCustodyEvent" => {
                let [evidence_id, action, custodian, location, description] = arity(
                    function,
                    args,
                    ["evidenceId", "action", "custodian", "location", "description"],
                )?;
                Operation::User(U::AddCustodyEvent { evidence_id, action, custodian, location, description })
            }
            "VerifyEvidenceHash" => {
                let [evidence_id, hash] = arity(function, args, ["evidenceId", "hash"])?;
                Operation::User(U::VerifyEvidenceHash { evidence_id, hash })
            }

            "CreateGUIDMapping" => {
                let [guid, evidence_id, description] =
                    arity(function, args, ["guid", "internalEvidenceId", "description"])?;
                Operation::User(U::CreateGuidMapping { guid, evidence_id, description })
            }
            "ResolveGUID" => {
                let [guid] = arity(function, args, ["guid"])?;
                Operation::User(U::ResolveGuid { guid })
            }
            "GetEvidenceByGUID" => {
                let [guid] = arity(function, args, ["guid"])?;
                Operation::User(U::GetEvidenceByGuid { guid })
            }
            "ListGUIDMappings" => {
                let [] = arity(function, args, [])?;
                Operation::User(U::ListGuidMappings)
            }
            "UpdateGUIDDescription" => {
                let [guid, description] = arity(function, args, ["guid", "description"])?;
                Operation::User(U::UpdateGuidDescription { guid, description })
            }

            other => return Err(ValidationError::UnknownFunction(other.to_string())),
        };
        Ok(op)
    }

    /// Host-facing function name.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Admin(op) => op.name(),
            Operation::User(op) => op.name(),
        }
    }
}

impl AdminOperation {
    pub fn name(&self) -> &'static str {
        match self {
            AdminOperation::SetUserRoles { .. } => "SetUserRoles",
            AdminOperation::GetUserRoles { .. } => "GetUserRoles",
            AdminOperation::ListUserRoles => "ListUserRoles",
            AdminOperation::DeleteUserRole { .. } => "DeleteUserRole",
            AdminOperation::DeleteGuidMapping { .. } => "DeleteGUIDMapping",
        }
    }
}

impl UserOperation {
    pub fn name(&self) -> &'static str {
        match self {
            UserOperation::CreateInvestigation { .. } => "CreateInvestigation",
            UserOperation::GetInvestigation { .. } => "GetInvestigation",
            UserOperation::UpdateInvestigation { .. } => "UpdateInvestigation",
            UserOperation::ListInvestigations => "ListInvestigations",
            UserOperation::ArchiveInvestigation { .. } => "ArchiveInvestigation",
            UserOperation::ReopenInvestigation { .. } => "ReopenInvestigation",
            UserOperation::AddEvidence { .. } => "AddEvidence",
            UserOperation::GetEvidence { .. } => "GetEvidence",
            UserOperation::ListEvidence => "ListEvidence",
            UserOperation::ListEvidenceByInvestigation { .. } => "ListEvidenceByInvestigation",
            UserOperation::AddCustodyEvent { .. } => "AddCustodyEvent",
            UserOperation::VerifyEvidenceHash { .. } => "VerifyEvidenceHash",
            UserOperation::CreateGuidMapping { .. } => "CreateGUIDMapping",
            UserOperation::ResolveGuid { .. } => "ResolveGUID",
            UserOperation::GetEvidenceByGuid { .. } => "GetEvidenceByGUID",
            UserOperation::ListGuidMappings => "ListGUIDMappings",
            UserOperation::UpdateGuidDescription { .. } => "UpdateGUIDDescription",
        }
    }

    /// (object, action) pairs the policy must allow, all of them.
    pub fn requirements(&self) -> Vec<(ObjectRef, Action)> {
        use UserOperation as U;
        let investigation = |id: &str| ObjectRef::Investigation(id.to_string());
        let evidence = |id: &str| ObjectRef::Evidence(id.to_string());

        match self {
            U::CreateInvestigation { .. } => vec![(ObjectRef::Investigations, Action::Create)],
            U::GetInvestigation { id } => vec![(investigation(id), Action::View)],
            U::UpdateInvestigation { id, .. } => vec![(investigation(id), Action::Update)],
            U::ListInvestigations => vec![(ObjectRef::Investigations, Action::View)],
            U::ArchiveInvestigation { id } => vec![(investigation(id), Action::Archive)],
            U::ReopenInvestigation { id } => vec![(investigation(id), Action::Reopen)],

            U::AddEvidence { .. } => vec![(ObjectRef::EvidenceCollection, Action::Create)],
            U::GetEvidence { id } => vec![(evidence(id), Action::View)],
            U::ListEvidence | U::ListEvidenceByInvestigation { .. } => {
                vec![(ObjectRef::EvidenceCollection, Action::View)]
            }
            U::AddCustodyEvent { evidence_id, .. } => vec![(evidence(evidence_id), Action::Append)],
            U::VerifyEvidenceHash { evidence_id, .. } => vec![(evidence(evidence_id), Action::View)],

            U::CreateGuidMapping { .. } => vec![(ObjectRef::GuidMapping, Action::Create)],
            U::ResolveGuid { .. } => vec![(ObjectRef::GuidMapping, Action::ResolveGuid)],
            U::GetEvidenceByGuid { .. } => vec![
                (ObjectRef::GuidMapping, Action::ResolveGuid),
                (ObjectRef::EvidenceCollection, Action::View),
            ],
            U::ListGuidMappings => vec![(ObjectRef::GuidMapping, Action::View)],
            U::UpdateGuidDescription { .. } => vec![(ObjectRef::GuidMapping, Action::Update)],
        }
    }
}

fn arity<const N: usize>(
    function: &str,
    args: Vec<String>,
    names: [&str; N],
) -> Result<[String; N], ValidationError> {
    let actual = args.len();
    <[String; N]>::try_from(args).map_err(|_| ValidationError::ArgumentCount {
        function: function.to_string(),
        expected: if N == 0 {
            "no arguments".to_string()
        } else {
            names.join(", ")
        },
        actual,
    })
}

fn at_least(err: ValidationError) -> ValidationError {
    match err {
        ValidationError::ArgumentCount {
            function,
            expected,
            actual,
        } => ValidationError::ArgumentCount {
            function,
            expected: format!("at least {expected}"),
            actual,
        },
        other => other,
    }
}
