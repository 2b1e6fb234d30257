//! Tracing subscriber installation.
//!
//! Human-readable output goes to stdout by default. When a log file is
//! configured, events are appended to it as JSON lines instead, one object
//! per event with the current span list attached.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Installs the global subscriber described by `config`.
///
/// Installing twice is not an error: the first subscriber wins, which keeps
/// tests that build several routers in one process quiet.
///
/// # Errors
/// Fails if the configured log file cannot be opened for appending.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    // ---
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;

            let subscriber = json_file_subscriber(env_filter, file);
            if subscriber.try_init().is_ok() {
                tracing::info!(file = %path.display(), "Logging to file");
            }
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_target(true))
                .try_init()
                .ok(); // Ignores if already initialized
        }
    }

    Ok(())
}

/// Subscriber writing one JSON object per event to `file`.
fn json_file_subscriber(
    env_filter: EnvFilter,
    file: File,
) -> impl Subscriber + Send + Sync + 'static {
    // ---
    tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_ansi(false)
            .with_writer(Mutex::new(file)),
    )
}
