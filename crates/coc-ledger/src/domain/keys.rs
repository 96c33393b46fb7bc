//! State key layout: `<PREFIX>:<id>`.

use std::fmt;

/// Upper bound appended to a prefix to scan every key under it.
pub const RANGE_END_MARKER: char = '~';

/// Record families and their key prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPrefix {
    UserRole,
    Evidence,
    Investigation,
    GuidMap,
}

impl KeyPrefix {
    pub const fn as_str(&self) -> &'static str {
        match self {
            KeyPrefix::UserRole => "USERROLE",
            KeyPrefix::Evidence => "EVIDENCE",
            KeyPrefix::Investigation => "INVESTIGATION",
            KeyPrefix::GuidMap => "GUIDMAP",
        }
    }

    /// State key for `id`.
    pub fn key(&self, id: &str) -> String {
        format!("{}:{}", self.as_str(), id)
    }

    /// Half-open range covering every key under this prefix.
    pub fn range(&self) -> (String, String) {
        (
            format!("{}:", self.as_str()),
            format!("{}:{}", self.as_str(), RANGE_END_MARKER),
        )
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
