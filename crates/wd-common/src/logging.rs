//! Structured Logging Configuration
//!
//! - JSON output for log aggregation (`LOG_FORMAT=json`)
//! - Human-readable output for operators (default)
//! - Level filtering through `RUST_LOG` (default: info)
//!
//! # Usage
//!
//! ```rust,ignore
//! use wd_common::logging::init_logging;
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging("wd-bootstrap")?;
//!     tracing::info!(scope_id = 7, "Organization bootstrapped");
//!     Ok(())
//! }
//! ```

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Unknown log format: {0}")]
    UnknownFormat(String),

    #[error("Failed to install global subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Output format of the global subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnknownFormat(other.to_string())),
        }
    }
}

impl LogFormat {
    /// Read the format from `LOG_FORMAT`. Unset means text.
    pub fn from_env() -> Result<Self, LoggingError> {
        std::env::var(LOG_FORMAT_ENV).unwrap_or_default().parse()
    }
}

/// Install the global subscriber for `service_name`.
///
/// Fails if a subscriber is already installed or `LOG_FORMAT` is not
/// one of `text`/`json`.
pub fn init_logging(service_name: &str) -> Result<(), LoggingError> {
    let format = LogFormat::from_env()?;
    init_logging_with(service_name, format)
}

pub fn init_logging_with(service_name: &str, format: LogFormat) -> Result<(), LoggingError> {
    let env_filter = default_filter();

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(true)
                    .flatten_event(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()?,
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .try_init()?,
    }

    tracing::debug!(service = service_name, ?format, "Logging initialized");
    Ok(())
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
