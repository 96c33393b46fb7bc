//! Privilege escalation through the side channel and principal ids.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use coc_types::ErrorKind;

    fn network() -> CustodyNetwork {
        let net = CustodyNetwork::new();
        net.grant(HOT, "u1", AUDITOR);
        net
    }

    fn gateway() -> Vec<u8> {
        creator(LAB_ORG, GATEWAY_CN, &["client"])
    }

    #[test]
    fn test_claiming_an_ungranted_role() {
        let net = network();
        let r = net.as_user(HOT, "u1", SYSTEM_ADMIN, "CreateInvestigation", &["I1", "t", "d"]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Authorization));
        assert!(net.committed(HOT, "INVESTIGATION:I1").is_none());
    }

    #[test]
    fn test_role_name_variants_are_not_roles() {
        let net = network();
        for claimed in ["blockchainauditor", " BlockchainAuditor", "BlockchainAuditor,SystemAdmin", ""] {
            let r = net.as_user(HOT, "u1", claimed, "ListEvidence", &[]);
            assert!(!r.is_ok(), "claim {claimed:?} accepted");
        }
    }

    #[test]
    fn test_separator_injection_in_user_id() {
        let net = network();
        // Looks like another principal's id once prefixed; must not resolve to u1.
        for user in ["u1|x", "x|user:u1", "u1 ", "U1"] {
            let r = net.as_user(HOT, user, AUDITOR, "ListEvidence", &[]);
            assert_eq!(r.error_kind(), Some(ErrorKind::NotFound), "{user:?}");
        }
        assert!(net.as_user(HOT, "u1", AUDITOR, "ListEvidence", &[]).is_ok());
    }

    #[test]
    fn test_missing_side_channel_fields() {
        let net = network();
        let user: &[u8] = b"u1";
        let out = net.submit(HOT, &gateway(), &[("userId", user)], "ListEvidence", &[]);
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Validation));
        assert!(out.response.error.unwrap().message.contains("role not found in transient map"));

        let out = net.submit(HOT, &gateway(), &[], "ListEvidence", &[]);
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Validation));
    }

    #[test]
    fn test_non_utf8_side_channel() {
        let net = network();
        let user: &[u8] = b"u1";
        let role: &[u8] = &[0xff, 0xfe, 0x00];
        let out = net.submit(HOT, &gateway(), &[("userId", user), ("role", role)], "ListEvidence", &[]);
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Validation));
    }

    #[test]
    fn test_registry_mutation_through_gateway() {
        let net = network();
        let user: &[u8] = b"u1";
        let role: &[u8] = b"SystemAdmin";
        let out = net.submit(
            HOT,
            &gateway(),
            &[("userId", user), ("role", role)],
            "SetUserRoles",
            &[&principal("u1"), SYSTEM_ADMIN],
        );
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Identity));

        let r = net.as_user(HOT, "u1", SYSTEM_ADMIN, "ListEvidence", &[]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Authorization));
    }

    #[test]
    fn test_deleting_mappings_requires_admin() {
        let net = CustodyNetwork::new();
        net.grant(COLD, "ops", SYSTEM_ADMIN);
        net.seed_case(COLD, "ops", SYSTEM_ADMIN, "I1", "E1");
        let r = net.as_user(COLD, "ops", SYSTEM_ADMIN, "CreateGUIDMapping", &["g-1", "E1", ""]);
        assert!(r.is_ok());

        let user: &[u8] = b"ops";
        let role: &[u8] = b"SystemAdmin";
        let out = net.submit(COLD, &gateway(), &[("userId", user), ("role", role)], "DeleteGUIDMapping", &["g-1"]);
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Identity));
        assert!(net.committed(COLD, "GUIDMAP:g-1").is_some());
    }
}
