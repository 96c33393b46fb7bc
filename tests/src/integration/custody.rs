//! Investigation and evidence lifecycle on the hot channel.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use coc_chaincode::HashVerification;
    use coc_types::{ErrorKind, Evidence, Investigation, InvestigationStatus, PolicyDomain};

    fn network() -> CustodyNetwork {
        let net = CustodyNetwork::new();
        net.grant(HOT, "alice", INVESTIGATOR);
        net.grant(HOT, "ops", SYSTEM_ADMIN);
        net.grant(HOT, "audit", AUDITOR);
        net
    }

    fn investigation(net: &CustodyNetwork, id: &str) -> Investigation {
        net.as_user(HOT, "audit", AUDITOR, "GetInvestigation", &[id])
            .json()
            .unwrap()
    }

    #[test]
    fn test_investigation_lifecycle() {
        let net = network();
        net.seed_case(HOT, "alice", INVESTIGATOR, "I1", "E1");

        let created = investigation(&net, "I1");
        assert_eq!(created.status, InvestigationStatus::Open);
        assert_eq!(created.channel, PolicyDomain::Hot);
        assert_eq!(created.created_by, "alice");

        // Empty fields keep the current text.
        let r = net.as_user(HOT, "alice", INVESTIGATOR, "UpdateInvestigation", &["I1", "", "new description"]);
        assert_eq!(r.payload_str(), "Investigation updated: I1");
        let updated = investigation(&net, "I1");
        assert_eq!(updated.title, "Case");
        assert_eq!(updated.description, "new description");
        assert!(updated.updated_at > created.updated_at);

        // Investigators cannot archive on hot.
        let r = net.as_user(HOT, "alice", INVESTIGATOR, "ArchiveInvestigation", &["I1"]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Authorization));

        let r = net.as_user(HOT, "ops", SYSTEM_ADMIN, "ArchiveInvestigation", &["I1"]);
        assert!(r.is_ok());
        assert_eq!(investigation(&net, "I1").status, InvestigationStatus::Archived);

        let r = net.as_user(HOT, "ops", SYSTEM_ADMIN, "ArchiveInvestigation", &["I1"]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Validation));

        let r = net.as_user(HOT, "ops", SYSTEM_ADMIN, "ReopenInvestigation", &["I1"]);
        assert_eq!(r.payload_str(), "Investigation reopened: I1");
        let r = net.as_user(HOT, "ops", SYSTEM_ADMIN, "ReopenInvestigation", &["I1"]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Validation));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let net = network();
        net.seed_case(HOT, "alice", INVESTIGATOR, "I1", "E1");

        let r = net.as_user(HOT, "alice", INVESTIGATOR, "CreateInvestigation", &["I1", "again", ""]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Validation));
        assert!(r.error.unwrap().message.contains("already exists"));

        let r = net.as_user(HOT, "alice", INVESTIGATOR, "AddEvidence", &["E1", "I1", "h", "cid", "{}"]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Validation));
    }

    #[test]
    fn test_custody_trail() {
        let net = network();
        net.seed_case(HOT, "alice", INVESTIGATOR, "I1", "E1");

        for (action, custodian) in [("transferred", "bob"), ("analyzed", "forensics-lab")] {
            let r = net.as_user(
                HOT,
                "alice",
                INVESTIGATOR,
                "AddCustodyEvent",
                &["E1", action, custodian, "Building 4", "routine"],
            );
            assert_eq!(r.payload_str(), "Custody event added to evidence: E1");
        }

        let evidence: Evidence = net
            .as_user(HOT, "audit", AUDITOR, "GetEvidence", &["E1"])
            .json()
            .unwrap();
        let actions: Vec<_> = evidence
            .chain_of_custody
            .iter()
            .map(|event| event.action.as_str())
            .collect();
        assert_eq!(actions, vec!["collected", "transferred", "analyzed"]);
        assert!(evidence
            .chain_of_custody
            .windows(2)
            .all(|pair| pair[0].timestamp < pair[1].timestamp));

        // Auditors read but do not append.
        let r = net.as_user(HOT, "audit", AUDITOR, "AddCustodyEvent", &["E1", "moved", "x", "", ""]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Authorization));
    }

    #[test]
    fn test_evidence_listing() {
        let net = network();
        net.seed_case(HOT, "alice", INVESTIGATOR, "I1", "E1");
        net.seed_case(HOT, "alice", INVESTIGATOR, "I2", "E2");
        let r = net.as_user(HOT, "alice", INVESTIGATOR, "AddEvidence", &["E3", "I1", "h3", "cid3", "{}"]);
        assert!(r.is_ok());

        let all: Vec<Evidence> = net.as_user(HOT, "audit", AUDITOR, "ListEvidence", &[]).json().unwrap();
        assert_eq!(all.len(), 3);

        let r = net.as_user(HOT, "audit", AUDITOR, "ListEvidenceByInvestigation", &["I1"]);
        let ids: Vec<String> = r
            .json::<Vec<Evidence>>()
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["E1", "E3"]);

        let r = net.as_user(HOT, "audit", AUDITOR, "ListInvestigations", &[]);
        assert_eq!(r.json::<Vec<Investigation>>().unwrap().len(), 2);
    }

    #[test]
    fn test_verify_hash() {
        let net = network();
        net.seed_case(HOT, "alice", INVESTIGATOR, "I1", "E1");

        let r = net.as_user(HOT, "audit", AUDITOR, "VerifyEvidenceHash", &["E1", "sha256:feed"]);
        assert_eq!(
            r.json::<HashVerification>().unwrap(),
            HashVerification {
                evidence_id: "E1".into(),
                valid: true
            }
        );
        let raw: serde_json::Value = r.json().unwrap();
        assert_eq!(raw, serde_json::json!({"evidenceId": "E1", "valid": true}));

        let r = net.as_user(HOT, "audit", AUDITOR, "VerifyEvidenceHash", &["E1", "SHA256:FEED"]);
        assert!(!r.json::<HashVerification>().unwrap().valid);

        let r = net.as_user(HOT, "audit", AUDITOR, "VerifyEvidenceHash", &["E9", "x"]);
        assert_eq!(r.error_kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_bad_metadata_and_arity() {
        let net = network();
        net.seed_case(HOT, "alice", INVESTIGATOR, "I1", "E1");

        let r = net.as_user(HOT, "alice", INVESTIGATOR, "AddEvidence", &["E2", "I1", "h", "cid", "{not json"]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Validation));
        assert!(r.error.unwrap().message.contains("malformed payload"));

        let r = net.as_user(HOT, "alice", INVESTIGATOR, "AddEvidence", &["E2", "I1", "h"]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Validation));
        assert!(r.error.unwrap().message.contains("AddEvidence"));
    }
}
