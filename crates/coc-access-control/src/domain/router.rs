//! Channel id to policy domain.

use crate::config::ChannelConfig;
use coc_types::PolicyDomain;

/// Maps the active channel onto a [`PolicyDomain`]. Unrecognised channels,
/// including an empty id, route to [`PolicyDomain::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRouter {
    hot: String,
    cold: String,
}

impl DomainRouter {
    pub fn new(channels: &ChannelConfig) -> Self {
        Self {
            hot: channels.hot.clone(),
            cold: channels.cold.clone(),
        }
    }

    pub fn route(&self, channel_id: &str) -> PolicyDomain {
        // An empty id is never a partition, whatever the configuration says.
        if channel_id.is_empty() {
            PolicyDomain::Unknown
        } else if channel_id == self.hot {
            PolicyDomain::Hot
        } else if channel_id == self.cold {
            PolicyDomain::Cold
        } else {
            PolicyDomain::Unknown
        }
    }
}

impl Default for DomainRouter {
    fn default() -> Self {
        Self::new(&ChannelConfig::default())
    }
}
