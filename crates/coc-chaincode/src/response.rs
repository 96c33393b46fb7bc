//! Host response envelope.

use coc_types::{ChaincodeError, ErrorKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Status of a successful invocation.
pub const OK: u16 = 200;
/// Status of a failed invocation.
pub const ERROR: u16 = 500;

/// Machine-readable failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub code: u16,
    pub message: String,
}

impl From<&ChaincodeError> for ErrorBody {
    fn from(err: &ChaincodeError) -> Self {
        let kind = err.kind();
        Self {
            kind,
            code: kind.code(),
            message: err.to_string(),
        }
    }
}

/// Outcome returned to the ledger host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    #[serde(default)]
    pub payload: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl Response {
    pub fn success(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            status: OK,
            payload: payload.into(),
            error: None,
        }
    }

    pub fn error(err: &ChaincodeError) -> Self {
        Self {
            status: ERROR,
            payload: Vec::new(),
            error: Some(err.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == OK
    }

    /// Error kind, if the invocation failed.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }

    /// Payload as text, lossily.
    pub fn payload_str(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }

    /// Decode a JSON payload.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.payload)
    }
}
