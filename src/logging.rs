//! Tracing subscriber setup.

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

/// Error installing the subscriber.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoggingError {
    #[error("invalid log level `{0}`")]
    InvalidLevel(String),
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Default level after applying `-v` flags to the configured level.
pub fn effective_level(configured: &str, verbose: u8) -> Result<LevelFilter, LoggingError> {
    let base: LevelFilter = configured
        .trim()
        .to_lowercase()
        .parse()
        .map_err(|_| LoggingError::InvalidLevel(configured.to_string()))?;

    Ok(match verbose {
        0 => base,
        1 => base.max(LevelFilter::DEBUG),
        _ => LevelFilter::TRACE,
    })
}

/// Install the global subscriber. Events go to stderr so stdout stays
/// reserved for command output. `RUST_LOG` overrides the default level.
pub fn init(logging: &LoggingConfig, verbose: u8) -> Result<(), LoggingError> {
    let level = effective_level(&logging.level, verbose)?;
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => {
            fmt::layer().compact().with_target(false).with_writer(std::io::stderr).boxed()
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|err| LoggingError::Install(err.to_string()))
}
