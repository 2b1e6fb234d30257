// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::Result;
use std::path::PathBuf;
use std::str::FromStr;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads an optional environment variable, falling back to a default string.
macro_rules! optional_env {
    // ---
    ($key:literal, $default:expr) => {
        std::env::var($key).unwrap_or_else(|_| $default.to_string())
    };
}

/// Reads an optional environment variable and parses it strictly.
///
/// A missing variable yields the default. A present but unparseable value
/// is a startup error.
macro_rules! optional_env_strict {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        match std::env::var($key) {
            Ok(v) => v.parse::<$ty>().map_err(|e| {
                anyhow::anyhow!(concat!("Invalid configuration for ", $key, ": {}"), e)
            })?,
            Err(_) => $default,
        }
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails because of an invalid
/// value for the given environment variable.
macro_rules! assert_invalid_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Invalid configuration for ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub metrics: MetricsConfig,
    pub logging: LoggingConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any configuration value is present but invalid.
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            server: ServerConfig::from_env(),
            metrics: MetricsConfig::from_env()?,
            logging: LoggingConfig::from_env(),
            telemetry: TelemetryConfig::from_env()?,
        })
    }
}

// ============================================================
// Server configuration
// ============================================================

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the API binds to. Defaults to `127.0.0.1:8080`.
    pub bind_addr: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        // ---
        Self {
            bind_addr: optional_env!("API_BIND_ADDR", "127.0.0.1:8080"),
        }
    }
}

// ============================================================
// Metrics configuration
// ============================================================

/// Which endpoint metrics backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsKind {
    /// Record nothing.
    Noop,
    /// In-memory counter-vector, scraped in Prometheus text format.
    Prometheus,
    /// Append-only sample log in a local SQLite file.
    Sqlite,
}

impl FromStr for MetricsKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "noop" => Ok(MetricsKind::Noop),
            "prom" | "prometheus" => Ok(MetricsKind::Prometheus),
            "sqlite" => Ok(MetricsKind::Sqlite),
            other => Err(anyhow::anyhow!(
                "unknown metrics type {other:?} (expected noop, prom or sqlite)"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Backend selection. Defaults to `prom`.
    pub kind: MetricsKind,

    /// SQLite url for the persisted-sample backend. Defaults to `sqlite://metrics.db`.
    pub database_url: String,
}

impl MetricsConfig {
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            kind: optional_env_strict!(
                "MEDICINE_METRICS_TYPE",
                MetricsKind,
                MetricsKind::Prometheus
            ),
            database_url: optional_env!("MEDICINE_METRICS_DB", "sqlite://metrics.db"),
        })
    }
}

// ============================================================
// Logging configuration
// ============================================================

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// When set, JSON log lines are appended to this file instead of stdout.
    pub log_file: Option<PathBuf>,

    /// Default filter directive when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        // ---
        Self {
            log_file: std::env::var_os("MEDICINE_LOG_FILE").map(PathBuf::from),
            default_filter: optional_env!("MEDICINE_LOG_LEVEL", "info"),
        }
    }
}

// ============================================================
// Trace configuration
// ============================================================

/// Where finished spans go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceExporter {
    None,
    Stdout,
}

impl FromStr for TraceExporter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(TraceExporter::None),
            "stdout" => Ok(TraceExporter::Stdout),
            other => Err(anyhow::anyhow!(
                "unknown trace exporter {other:?} (expected none or stdout)"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Span exporter. Defaults to `none`.
    pub exporter: TraceExporter,

    /// `service.name` resource attribute. Defaults to `medicine-api`.
    pub service_name: String,
}

impl TelemetryConfig {
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            exporter: optional_env_strict!(
                "MEDICINE_TRACE_EXPORTER",
                TraceExporter,
                TraceExporter::None
            ),
            service_name: optional_env!("MEDICINE_SERVICE_NAME", "medicine-api"),
        })
    }
}

// ============================================================
// Tests
// ============================================================
