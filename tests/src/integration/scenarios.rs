//! Delegated-user pipeline: gateway trust, role claim, domain, policy.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use coc_access_control::{
        AccessControlConfig, PolicyEngine, PolicyError, PolicyRequest, X509IdentityVerifier,
    };
    use coc_chaincode::CustodyChaincode;
    use coc_types::{Evidence, ErrorKind};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Allows everything and counts how often it was asked.
    #[derive(Default)]
    struct CountingEngine {
        calls: AtomicUsize,
    }

    impl PolicyEngine for CountingEngine {
        fn enforce(&self, _request: &PolicyRequest) -> Result<bool, PolicyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    #[test]
    fn test_registered_investigator_creates_evidence() {
        let net = CustodyNetwork::new();
        net.grant(HOT, "u1", INVESTIGATOR);

        let r = net.as_user(HOT, "u1", INVESTIGATOR, "CreateInvestigation", &["INV-1", "Burglary", "Warehouse"]);
        assert_eq!(r.payload_str(), "Investigation created: INV-1");

        let r = net.as_user(
            HOT,
            "u1",
            INVESTIGATOR,
            "AddEvidence",
            &["EV-1", "INV-1", "sha256:abc", "QmAbc", r#"{"type":"photo","sizeBytes":2048}"#],
        );
        assert_eq!(r.payload_str(), "Evidence added: EV-1");

        let r = net.as_user(HOT, "u1", INVESTIGATOR, "GetEvidence", &["EV-1"]);
        let evidence: Evidence = r.json().unwrap();
        assert_eq!(evidence.created_by, "u1");
        assert_eq!(evidence.meta.kind, "photo");
        assert_eq!(evidence.chain_of_custody.len(), 1);
        assert_eq!(evidence.chain_of_custody[0].custodian, "u1");
    }

    #[test]
    fn test_unheld_role_fails_before_policy() {
        let engine = Arc::new(CountingEngine::default());
        let chaincode = CustodyChaincode::with_components(
            AccessControlConfig::default(),
            Arc::new(X509IdentityVerifier::default()),
            engine.clone(),
        )
        .unwrap();
        let net = CustodyNetwork::with_chaincode(chaincode);
        net.grant(HOT, "u1", INVESTIGATOR);

        let r = net.as_user(HOT, "u1", COURT, "ListEvidence", &[]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Authorization));
        let message = r.error.unwrap().message;
        assert!(message.contains("role 'BlockchainCourt' not allowed"), "{message}");
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);

        // The held role reaches the engine.
        let r = net.as_user(HOT, "u1", INVESTIGATOR, "ListEvidence", &[]);
        assert!(r.is_ok());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_channel_denies_every_role() {
        let net = CustodyNetwork::new();
        let channel = "staging-chain";
        net.grant(channel, "u1", "BlockchainInvestigator,BlockchainAuditor,BlockchainCourt,SystemAdmin");

        for role in [INVESTIGATOR, AUDITOR, COURT, SYSTEM_ADMIN] {
            for (function, args) in [
                ("ListInvestigations", vec![]),
                ("CreateInvestigation", vec!["I1", "t", "d"]),
                ("ListGUIDMappings", vec![]),
            ] {
                let r = net.as_user(channel, "u1", role, function, &args);
                assert_eq!(r.error_kind(), Some(ErrorKind::Authorization), "{role} {function}");
                assert!(r.error.unwrap().message.contains("domain 'unknown'"));
            }
        }
    }

    #[test]
    fn test_unregistered_user() {
        let net = CustodyNetwork::new();
        let r = net.as_user(HOT, "ghost", INVESTIGATOR, "ListEvidence", &[]);
        assert_eq!(r.error_kind(), Some(ErrorKind::NotFound));
        assert!(r.error.unwrap().message.contains("LabOrgMSP|lab-gw|user:ghost"));
    }

    #[test]
    fn test_grants_are_per_channel() {
        let net = CustodyNetwork::new();
        net.grant(HOT, "u1", AUDITOR);

        assert!(net.as_user(HOT, "u1", AUDITOR, "ListInvestigations", &[]).is_ok());
        let r = net.as_user(COLD, "u1", AUDITOR, "ListInvestigations", &[]);
        assert_eq!(r.error_kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_multi_role_principal_acts_per_claim() {
        let net = CustodyNetwork::new();
        net.grant(HOT, "u1", "BlockchainAuditor, SystemAdmin");
        net.seed_case(HOT, "u1", SYSTEM_ADMIN, "I1", "E1");

        let r = net.as_user(HOT, "u1", AUDITOR, "ArchiveInvestigation", &["I1"]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Authorization));

        let r = net.as_user(HOT, "u1", SYSTEM_ADMIN, "ArchiveInvestigation", &["I1"]);
        assert_eq!(r.payload_str(), "Investigation archived: I1");
    }

    #[test]
    fn test_court_denied_on_hot_even_when_granted() {
        let net = CustodyNetwork::new();
        net.grant(HOT, "judge", COURT);
        for (function, args) in [
            ("ListEvidence", vec![]),
            ("GetInvestigation", vec!["I1"]),
            ("VerifyEvidenceHash", vec!["E1", "h"]),
        ] {
            let r = net.as_user(HOT, "judge", COURT, function, &args);
            assert_eq!(r.error_kind(), Some(ErrorKind::Authorization), "{function}");
        }
    }
}
