//! Registry administration through administrator certificates.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use coc_types::{ErrorKind, Role, UserRoleRecord};

    #[test]
    fn test_set_get_list_delete() {
        let net = CustodyNetwork::new();
        let p1 = principal("u1");
        let p2 = principal("u2");

        let r = net.as_admin(HOT, "SetUserRoles", &[&p1, " BlockchainInvestigator , BlockchainAuditor,"]);
        assert_eq!(r.payload_str(), format!("Roles set for principal: {p1}"));
        net.grant(HOT, "u2", COURT);

        let r = net.as_admin(HOT, "GetUserRoles", &[&p1]);
        let record: UserRoleRecord = r.json().unwrap();
        assert_eq!(record.principal_id, p1);
        assert!(record.roles.contains(&Role::BlockchainInvestigator));
        assert!(record.roles.contains(&Role::BlockchainAuditor));
        assert_eq!(record.roles.len(), 2);
        assert_eq!(record.updated_by, "lab-admin");

        let r = net.as_admin(HOT, "ListUserRoles", &[]);
        let all: Vec<UserRoleRecord> = r.json().unwrap();
        let ids: Vec<_> = all.iter().map(|rec| rec.principal_id.as_str()).collect();
        assert_eq!(ids, vec![p1.as_str(), p2.as_str()]);

        let r = net.as_admin(HOT, "DeleteUserRole", &[&p2]);
        assert!(r.is_ok());
        let r = net.as_admin(HOT, "DeleteUserRole", &[&p2]);
        assert_eq!(r.error_kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_set_replaces_role_set() {
        let net = CustodyNetwork::new();
        net.grant(HOT, "u1", "BlockchainInvestigator,SystemAdmin");
        net.grant(HOT, "u1", AUDITOR);

        let r = net.as_admin(HOT, "GetUserRoles", &[&principal("u1")]);
        let record: UserRoleRecord = r.json().unwrap();
        assert_eq!(record.role_names(), vec![AUDITOR]);

        let r = net.as_user(HOT, "u1", INVESTIGATOR, "ListEvidence", &[]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Authorization));
    }

    #[test]
    fn test_court_org_admin_accepted() {
        let net = CustodyNetwork::new();
        let court_admin = creator(COURT_ORG, "court-admin", &["admin"]);
        let out = net.submit(HOT, &court_admin, &[], "SetUserRoles", &[&principal("judge"), COURT]);
        assert!(out.response.is_ok(), "{:?}", out.response);

        let r = net.as_admin(HOT, "GetUserRoles", &[&principal("judge")]);
        assert_eq!(r.json::<UserRoleRecord>().unwrap().updated_by, "court-admin");
    }

    #[test]
    fn test_foreign_org_admin_rejected() {
        let net = CustodyNetwork::new();
        let foreign = creator("DefenseOrgMSP", "defense-admin", &["admin"]);
        let out = net.submit(HOT, &foreign, &[], "SetUserRoles", &[&principal("u1"), SYSTEM_ADMIN]);
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Identity));
        assert!(out.response.error.unwrap().message.contains("DefenseOrgMSP"));
        assert_eq!(out.writes, 0);
        assert!(net.committed(HOT, &format!("USERROLE:{}", principal("u1"))).is_none());
    }

    #[test]
    fn test_gateway_is_not_an_admin() {
        let net = CustodyNetwork::new();
        let gateway = creator(LAB_ORG, GATEWAY_CN, &["client"]);
        let out = net.submit(HOT, &gateway, &[], "ListUserRoles", &[]);
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Identity));
        assert!(out.response.error.unwrap().message.contains("admin identity required"));
    }

    #[test]
    fn test_admin_cannot_use_user_operations() {
        let net = CustodyNetwork::new();
        let admin = creator(LAB_ORG, "lab-admin", &["admin"]);
        let user_id: &[u8] = b"lab-admin";
        let role: &[u8] = b"SystemAdmin";
        let out = net.submit(
            HOT,
            &admin,
            &[("userId", user_id), ("role", role)],
            "CreateInvestigation",
            &["I1", "t", "d"],
        );
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Identity));
        assert!(out.response.error.unwrap().message.contains("untrusted submitter"));
    }

    #[test]
    fn test_invalid_role_lists() {
        let net = CustodyNetwork::new();
        let p = principal("u1");

        let r = net.as_admin(HOT, "SetUserRoles", &[&p, "BlockchainInvestigator,Sheriff"]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Validation));
        assert!(r.error.unwrap().message.contains("invalid role: Sheriff"));

        let r = net.as_admin(HOT, "SetUserRoles", &[&p, " , ,"]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Validation));

        let r = net.as_admin(HOT, "SetUserRoles", &["", INVESTIGATOR]);
        assert_eq!(r.error_kind(), Some(ErrorKind::Validation));

        let r = net.as_admin(HOT, "GetUserRoles", &[&p]);
        assert_eq!(r.error_kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_admin_deletes_guid_mapping() {
        let net = CustodyNetwork::new();
        net.grant(COLD, "sys", SYSTEM_ADMIN);
        net.seed_case(COLD, "sys", SYSTEM_ADMIN, "I1", "E1");
        let r = net.as_user(COLD, "sys", SYSTEM_ADMIN, "CreateGUIDMapping", &["g-1", "E1", "exhibit"]);
        assert!(r.is_ok(), "{r:?}");

        let r = net.as_admin(COLD, "DeleteGUIDMapping", &["g-1"]);
        assert_eq!(r.payload_str(), "GUID mapping deleted: g-1");
        assert!(net.committed(COLD, "GUIDMAP:g-1").is_none());

        let r = net.as_admin(COLD, "DeleteGUIDMapping", &["g-1"]);
        assert_eq!(r.error_kind(), Some(ErrorKind::NotFound));
    }
}
