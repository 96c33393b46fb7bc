//! A failed operation returns an error and the host discards its write set.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use coc_types::{ErrorKind, Investigation};

    #[test]
    fn test_rejected_operations_buffer_nothing() {
        let net = CustodyNetwork::new();
        net.grant(HOT, "audit", AUDITOR);
        let gateway = creator(LAB_ORG, GATEWAY_CN, &[]);
        let user: &[u8] = b"audit";
        let role: &[u8] = b"BlockchainAuditor";

        let out = net.submit(
            HOT,
            &gateway,
            &[("userId", user), ("role", role)],
            "CreateInvestigation",
            &["I1", "t", "d"],
        );
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Authorization));
        assert_eq!(out.writes, 0);
        assert!(net.committed(HOT, "INVESTIGATION:I1").is_none());
    }

    #[test]
    fn test_failure_after_reads_leaves_state_untouched() {
        let net = CustodyNetwork::new();
        net.grant(HOT, "alice", INVESTIGATOR);
        net.seed_case(HOT, "alice", INVESTIGATOR, "I1", "E1");
        let before = net.committed(HOT, "EVIDENCE:E1");

        // Evidence under a missing investigation.
        let r = net.as_user(HOT, "alice", INVESTIGATOR, "AddEvidence", &["E2", "I9", "h", "c", "{}"]);
        assert_eq!(r.error_kind(), Some(ErrorKind::NotFound));
        assert!(net.committed(HOT, "EVIDENCE:E2").is_none());

        // Custody event on missing evidence.
        let r = net.as_user(HOT, "alice", INVESTIGATOR, "AddCustodyEvent", &["E9", "moved", "x", "", ""]);
        assert_eq!(r.error_kind(), Some(ErrorKind::NotFound));

        assert_eq!(net.committed(HOT, "EVIDENCE:E1"), before);
    }

    #[test]
    fn test_host_outage_is_storage_error() {
        let net = CustodyNetwork::new();
        net.grant(HOT, "alice", INVESTIGATOR);
        net.seed_case(HOT, "alice", INVESTIGATOR, "I1", "E1");

        net.ledger(HOT).set_unavailable(true);
        let r = net.as_user(HOT, "alice", INVESTIGATOR, "UpdateInvestigation", &["I1", "x", "y"]);
        // The registry read fails first.
        assert_eq!(r.error_kind(), Some(ErrorKind::Storage));

        net.ledger(HOT).set_unavailable(false);
        let investigation: Investigation = net
            .as_user(HOT, "alice", INVESTIGATOR, "GetInvestigation", &["I1"])
            .json()
            .unwrap();
        assert_eq!(investigation.title, "Case");
    }

    #[test]
    fn test_registry_write_discarded_on_validation_failure() {
        let net = CustodyNetwork::new();
        let admin = creator(LAB_ORG, "lab-admin", &["admin"]);
        let out = net.submit(HOT, &admin, &[], "SetUserRoles", &[&principal("u1"), "Nobody"]);
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Validation));
        assert_eq!(out.writes, 0);
        assert!(net.ledger(HOT).is_empty());
    }
}
