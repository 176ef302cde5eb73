// Telemetry module for structured logging

use crate::config::{LogFormat, ObservabilityConfig};
use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Build the level filter, preferring `RUST_LOG` over the configured level
pub fn env_filter(log_level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))
}

/// Initialize structured logging
///
/// Logs are written to stderr so that stdout stays free for rendered output.
/// JSON output carries the current span and span list; pretty output is the
/// human-readable `fmt` format.
#[tracing::instrument(skip_all)]
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = env_filter(&config.log_level)?;

    let layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;

    tracing::debug!(
        log_level = %config.log_level,
        log_format = ?config.log_format,
        "Structured logging initialized"
    );

    Ok(())
}
