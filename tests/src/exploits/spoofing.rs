//! Submitter impersonation: certificates that look like the gateway or an
//! administrator but are not.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use coc_types::ErrorKind;

    fn user_fields<'a>(user: &'a str, role: &'a str) -> [(&'static str, &'a [u8]); 2] {
        [("userId", user.as_bytes()), ("role", role.as_bytes())]
    }

    fn network() -> CustodyNetwork {
        let net = CustodyNetwork::new();
        net.grant(HOT, "u1", SYSTEM_ADMIN);
        net
    }

    #[test]
    fn test_gateway_name_from_other_org() {
        let net = network();
        let forged = creator("EvilOrgMSP", GATEWAY_CN, &["client"]);
        let out = net.submit(HOT, &forged, &user_fields("u1", SYSTEM_ADMIN), "ListEvidence", &[]);
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Identity));
        assert!(out.response.error.unwrap().message.contains("organization id 'EvilOrgMSP'"));
    }

    #[test]
    fn test_trusted_org_other_client() {
        let net = network();
        let other = creator(LAB_ORG, "lab-gw-2", &["client"]);
        let out = net.submit(HOT, &other, &user_fields("u1", SYSTEM_ADMIN), "ListEvidence", &[]);
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Identity));
        assert!(out.response.error.unwrap().message.contains("common name 'lab-gw-2'"));
    }

    #[test]
    fn test_case_variant_of_gateway_name() {
        let net = network();
        let other = creator(LAB_ORG, "LAB-GW", &[]);
        let out = net.submit(HOT, &other, &user_fields("u1", SYSTEM_ADMIN), "ListEvidence", &[]);
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Identity));
    }

    #[test]
    fn test_admin_marker_in_common_name_only() {
        let net = network();
        let fake = creator(LAB_ORG, "admin", &["client"]);
        let out = net.submit(HOT, &fake, &[], "SetUserRoles", &[&principal("u2"), SYSTEM_ADMIN]);
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Identity));
        assert_eq!(out.writes, 0);
    }

    #[test]
    fn test_garbage_creator() {
        let net = network();
        let garbage: [&[u8]; 3] = [b"", b"\x0a\xff\x01", b"not protobuf at all, just text"];
        for bytes in garbage {
            let out = net.submit(HOT, bytes, &user_fields("u1", SYSTEM_ADMIN), "ListEvidence", &[]);
            assert_eq!(out.response.error_kind(), Some(ErrorKind::Identity));
        }
    }

    #[test]
    fn test_envelope_without_certificate() {
        use coc_access_control::SerializedIdentity;
        use prost::Message;

        let net = network();
        let envelope = SerializedIdentity::new(LAB_ORG, b"-----BEGIN CERTIFICATE-----\n".to_vec()).encode_to_vec();
        let out = net.submit(HOT, &envelope, &user_fields("u1", SYSTEM_ADMIN), "ListEvidence", &[]);
        assert_eq!(out.response.error_kind(), Some(ErrorKind::Identity));
    }
}
