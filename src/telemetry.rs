//! Tracing bootstrap.
//!
//! Library code only emits `tracing` events; binaries and tests embedding
//! the crate call [`init_tracing`] once to install a formatting subscriber.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter '{directive}': {message}")]
    InvalidFilter {
        /// Directive that failed to parse.
        directive: String,
        /// Parser message.
        message: String,
    },

    /// A global subscriber is already installed.
    #[error("tracing subscriber already initialised: {0}")]
    AlreadyInitialised(String),
}

/// Installs a global `fmt` subscriber filtered by `directive`.
///
/// The `RUST_LOG` environment variable, when set, takes precedence over
/// `directive`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] for an unparseable directive
/// and [`TelemetryError::AlreadyInitialised`] when called twice.
pub fn init_tracing(directive: &str) -> Result<(), TelemetryError> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(from_env) if !from_env.trim().is_empty() => parse_filter(&from_env)?,
        _ => parse_filter(directive)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|err| TelemetryError::AlreadyInitialised(err.to_string()))
}

fn parse_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directive).map_err(|err| TelemetryError::InvalidFilter {
        directive: directive.to_owned(),
        message: err.to_string(),
    })
}
