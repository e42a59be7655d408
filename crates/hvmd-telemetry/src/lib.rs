#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Logging setup shared by the `hvmd` binaries.
//!
//! # Design
//! - Single entry point installing a `tracing` subscriber on stderr.
//! - Level comes from `RUST_LOG` when set, otherwise from `LoggingConfig`.
//! - Diagnostics never share stdout with command output.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default logging level when `RUST_LOG` is not provided.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Variable selecting the log format (`compact`, `pretty`, `json`).
pub const LOG_FORMAT_VAR: &str = "HVMD_LOG_FORMAT";

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the tracing subscriber cannot be installed (for example,
/// because another subscriber has already been set globally).
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_env_filter(config.level);
    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
    };
    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// Log level string (e.g., `warn`, `debug`).
    pub level: &'a str,
    /// Output format selection for the tracing subscriber.
    pub format: LogFormat,
}

impl LoggingConfig<'_> {
    /// Default level with the format taken from `HVMD_LOG_FORMAT`.
    #[must_use]
    pub fn from_env() -> Self {
        let format = std::env::var(LOG_FORMAT_VAR)
            .ok()
            .map_or_else(LogFormat::default, |value| LogFormat::parse(&value));
        Self {
            level: DEFAULT_LOG_LEVEL,
            format,
        }
    }
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            format: LogFormat::default(),
        }
    }
}

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line human-readable records.
    #[default]
    Compact,
    /// Multi-line human-readable records.
    Pretty,
    /// Structured JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name, falling back to [`LogFormat::Compact`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}
