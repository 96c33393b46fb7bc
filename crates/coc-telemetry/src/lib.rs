//! # coc-telemetry
//!
//! Structured logging for the chain-of-custody chaincode.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coc_telemetry::{init_tracing, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_tracing(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `coc-chaincode` | Service name in log lines |
//! | `COC_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directive |
//! | `COC_JSON_LOGS` | `false` (`true` in containers) | JSON line output |

mod config;
mod logging;

pub use config::{TelemetryConfig, DEFAULT_LOG_LEVEL, DEFAULT_SERVICE_NAME};
pub use logging::{init_test_tracing, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("invalid log filter {0}")]
    Filter(String),

    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}
