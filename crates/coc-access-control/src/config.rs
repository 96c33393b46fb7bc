//! Access-control configuration with validation.
//!
//! Defaults are the production trust anchors. A deployment overrides them
//! from TOML only when its network uses different names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Trusted relay organization id.
pub const DEFAULT_GATEWAY_ORGANIZATION: &str = "LabOrgMSP";
/// Trusted relay certificate common name.
pub const DEFAULT_GATEWAY_COMMON_NAME: &str = "lab-gw";
/// Organizational-unit value marking an administrator certificate.
pub const DEFAULT_ADMIN_MARKER: &str = "admin";
/// Organizations whose administrators may mutate the role registry.
pub const DEFAULT_ADMIN_ORGANIZATIONS: [&str; 2] = ["LabOrgMSP", "CourtOrgMSP"];
pub const DEFAULT_HOT_CHANNEL: &str = "hot-chain";
pub const DEFAULT_COLD_CHANNEL: &str = "cold-chain";
pub const DEFAULT_USER_ID_FIELD: &str = "userId";
pub const DEFAULT_ROLE_FIELD: &str = "role";

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("admin organizations cannot be empty")]
    NoAdminOrganizations,

    #[error("hot and cold channels must differ (both '{0}')")]
    DuplicateChannel(String),
}

/// Main access-control configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessControlConfig {
    /// The single relay allowed to submit user-facing operations
    pub gateway: TrustedGatewayConfig,
    /// Who may administer the role registry
    pub admin: AdminConfig,
    /// Channel to domain routing
    pub channels: ChannelConfig,
    /// Side-channel field names
    pub transient: TransientFieldConfig,
}

impl AccessControlConfig {
    /// Parse and validate a TOML document. Missing sections take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.organization_id.is_empty() {
            return Err(ConfigError::EmptyField("gateway.organization_id"));
        }
        if self.gateway.common_name.is_empty() {
            return Err(ConfigError::EmptyField("gateway.common_name"));
        }

        if self.admin.organizations.is_empty() {
            return Err(ConfigError::NoAdminOrganizations);
        }
        if self.admin.organizations.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyField("admin.organizations[]"));
        }
        if self.admin.marker.is_empty() {
            return Err(ConfigError::EmptyField("admin.marker"));
        }

        if self.channels.hot.is_empty() {
            return Err(ConfigError::EmptyField("channels.hot"));
        }
        if self.channels.cold.is_empty() {
            return Err(ConfigError::EmptyField("channels.cold"));
        }
        if self.channels.hot == self.channels.cold {
            return Err(ConfigError::DuplicateChannel(self.channels.hot.clone()));
        }

        if self.transient.user_id.is_empty() {
            return Err(ConfigError::EmptyField("transient.user_id"));
        }
        if self.transient.role.is_empty() {
            return Err(ConfigError::EmptyField("transient.role"));
        }

        Ok(())
    }
}

/// Trusted relay identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustedGatewayConfig {
    /// Issuer organization id
    pub organization_id: String,
    /// Certificate subject common name
    pub common_name: String,
}

impl Default for TrustedGatewayConfig {
    fn default() -> Self {
        Self {
            organization_id: DEFAULT_GATEWAY_ORGANIZATION.to_string(),
            common_name: DEFAULT_GATEWAY_COMMON_NAME.to_string(),
        }
    }
}

/// Administrator verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Organizations allowed to administer
    pub organizations: Vec<String>,
    /// Organizational-unit marker required on the certificate
    pub marker: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            organizations: DEFAULT_ADMIN_ORGANIZATIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            marker: DEFAULT_ADMIN_MARKER.to_string(),
        }
    }
}

/// Channel ids of the two known partitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Operational partition
    pub hot: String,
    /// Archival partition
    pub cold: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            hot: DEFAULT_HOT_CHANNEL.to_string(),
            cold: DEFAULT_COLD_CHANNEL.to_string(),
        }
    }
}

/// Names of the side-channel fields carrying the delegated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransientFieldConfig {
    pub user_id: String,
    pub role: String,
}

impl Default for TransientFieldConfig {
    fn default() -> Self {
        Self {
            user_id: DEFAULT_USER_ID_FIELD.to_string(),
            role: DEFAULT_ROLE_FIELD.to_string(),
        }
    }
}
