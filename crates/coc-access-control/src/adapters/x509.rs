//! # X.509 Identity Extractor
//!
//! The ledger host hands each transaction a protobuf `SerializedIdentity`
//! envelope: the issuing organization id plus the submitter's PEM
//! certificate. This adapter decodes both and reads the subject common name
//! and organizational units.

use crate::domain::IdentityInfo;
use crate::ports::IdentityVerifier;
use crate::config::DEFAULT_ADMIN_MARKER;
use coc_types::IdentityError;
use prost::Message;
use x509_parser::pem::parse_x509_pem;

/// Wire form of the creator identity.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct SerializedIdentity {
    /// Issuing organization id.
    #[prost(string, tag = "1")]
    pub mspid: String,

    /// PEM-encoded certificate.
    #[prost(bytes = "vec", tag = "2")]
    pub id_bytes: Vec<u8>,
}

impl SerializedIdentity {
    pub fn new(mspid: impl Into<String>, certificate_pem: impl Into<Vec<u8>>) -> Self {
        Self {
            mspid: mspid.into(),
            id_bytes: certificate_pem.into(),
        }
    }
}

/// Certificate-backed [`IdentityVerifier`].
#[derive(Debug, Clone)]
pub struct X509IdentityVerifier {
    admin_marker: String,
}

impl X509IdentityVerifier {
    /// `admin_marker` is the organizational-unit value that flags an admin.
    pub fn new(admin_marker: impl Into<String>) -> Self {
        Self {
            admin_marker: admin_marker.into(),
        }
    }
}

impl Default for X509IdentityVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_MARKER)
    }
}

impl IdentityVerifier for X509IdentityVerifier {
    fn extract(&self, creator: &[u8]) -> Result<IdentityInfo, IdentityError> {
        let envelope =
            SerializedIdentity::decode(creator).map_err(|e| IdentityError::Envelope(e.to_string()))?;

        let (_, pem) =
            parse_x509_pem(&envelope.id_bytes).map_err(|e| IdentityError::Pem(e.to_string()))?;
        let cert = pem
            .parse_x509()
            .map_err(|e| IdentityError::Certificate(e.to_string()))?;

        let subject = cert.subject();
        // With several CN attributes the last one wins. A missing common
        // name reads as empty and fails the trust checks.
        let common_name = subject
            .iter_common_name()
            .last()
            .and_then(|attr| attr.as_str().ok())
            .unwrap_or_default()
            .to_string();
        let is_admin = subject
            .iter_organizational_unit()
            .filter_map(|attr| attr.as_str().ok())
            .any(|ou| ou == self.admin_marker);

        Ok(IdentityInfo {
            organization_id: envelope.mspid,
            common_name,
            is_admin,
        })
    }
}
