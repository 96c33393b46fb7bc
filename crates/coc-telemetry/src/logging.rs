//! Subscriber installation.
//!
//! The global subscriber can be set once per process. [`init_tracing`]
//! remembers a successful install and returns early afterwards, so every
//! test binary may call it from every test.

use crate::{TelemetryConfig, TelemetryError};
use lazy_static::lazy_static;
use parking_lot::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

lazy_static! {
    static ref INSTALLED: Mutex<bool> = Mutex::new(false);
}

/// Install the global `tracing` subscriber described by `config`.
///
/// The filter is validated first. Returns `Ok(false)` if an earlier call
/// already installed a subscriber.
pub fn init_tracing(config: &TelemetryConfig) -> Result<bool, TelemetryError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Filter(format!("'{}': {}", config.log_level, e)))?;

    let mut installed = INSTALLED.lock();
    if *installed {
        return Ok(false);
    }

    let result = if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true);
        if config.test_writer {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(json_layer.with_test_writer())
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(json_layer)
                .try_init()
        }
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(!config.test_writer);
        if config.test_writer {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer.with_test_writer())
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        }
    };
    result.map_err(|e| TelemetryError::Install(e.to_string()))?;

    *installed = true;
    tracing::info!(
        service = %config.service_name,
        level = %config.log_level,
        json = config.json_logs,
        "Tracing initialized"
    );
    Ok(true)
}

/// Install the test subscriber, ignoring a subscriber some other harness
/// already set.
pub fn init_test_tracing() {
    if let Err(e) = init_tracing(&TelemetryConfig::for_tests()) {
        // Another crate's subscriber won the race; its output is fine.
        tracing::debug!(error = %e, "Test tracing not installed");
    }
}
