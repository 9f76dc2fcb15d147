//! Logging setup for the scanner bridge
//!
//! The bridge and its crates only emit `tracing` events. Hosts that do not
//! install their own subscriber can use this module to get output. The
//! default filter only enables the bridge's own crates, so a host app's
//! other dependencies stay quiet unless `DATAWEDGE_LOG_LEVEL` or `RUST_LOG`
//! says otherwise.

use std::str::FromStr;

use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Crates whose events the default filter lets through
const BRIDGE_TARGETS: [&str; 3] = ["datawedge_api", "datawedge_event_manager", "datawedge_bridge"];

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggingMode {
    /// No subscriber installed; events are discarded
    #[default]
    Silent,
    /// Compact stderr output at `info`: commands sent, worker start/stop
    Development,
    /// Lifecycle transitions and decode rejections at `debug`, with the
    /// emitting thread, since scans are delivered on `datawedge-delivery`
    Debug,
}

impl LoggingMode {
    fn default_level(self) -> &'static str {
        match self {
            LoggingMode::Silent => "off",
            LoggingMode::Development => "info",
            LoggingMode::Debug => "debug",
        }
    }
}

impl FromStr for LoggingMode {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silent" | "off" => Ok(LoggingMode::Silent),
            "development" | "dev" => Ok(LoggingMode::Development),
            "debug" => Ok(LoggingMode::Debug),
            _ => Err(LoggingError::UnknownMode(s.to_string())),
        }
    }
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Unknown DATAWEDGE_LOG_MODE value: {0:?}")]
    UnknownMode(String),
}

/// Initialize logging with the specified mode
///
/// Call once, early. A second initialization fails with
/// [`LoggingError::TracingInit`].
///
/// # Environment Variables
///
/// - `DATAWEDGE_LOG_LEVEL`: filter directive replacing the bridge-only
///   default (e.g. `datawedge_event_manager=trace`)
/// - `RUST_LOG`: used when `DATAWEDGE_LOG_LEVEL` is unset
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => install(mode, fmt::layer().with_target(false).compact()),
        LoggingMode::Debug => install(
            mode,
            fmt::layer()
                .pretty()
                .with_thread_names(true)
                .with_file(true)
                .with_line_number(true),
        ),
    }
}

/// Initialize logging from `DATAWEDGE_LOG_MODE`
///
/// Unset means [`LoggingMode::Silent`]. A value that names no mode fails
/// with [`LoggingError::UnknownMode`] rather than silently dropping output.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = match std::env::var("DATAWEDGE_LOG_MODE") {
        Ok(value) => value.parse()?,
        Err(_) => LoggingMode::Silent,
    };
    init_logging(mode)
}

/// Check if a global subscriber has been installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}

fn install<L>(mode: LoggingMode, layer: L) -> Result<(), LoggingError>
where
    L: Layer<Layered<EnvFilter, Registry>> + Send + Sync + 'static,
{
    Registry::default()
        .with(env_filter(mode))
        .with(layer)
        .try_init()
        .map_err(|e| LoggingError::TracingInit(e.to_string()))
}

fn env_filter(mode: LoggingMode) -> EnvFilter {
    let directive = std::env::var("DATAWEDGE_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| bridge_directive(mode.default_level()));
    EnvFilter::new(directive)
}

/// `target=level` for each bridge crate, everything else off
fn bridge_directive(level: &str) -> String {
    BRIDGE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_silent_mode() {
        assert!(init_logging(LoggingMode::Silent).is_ok());
    }

    #[rstest]
    #[case("silent", LoggingMode::Silent)]
    #[case("off", LoggingMode::Silent)]
    #[case("development", LoggingMode::Development)]
    #[case(" Dev ", LoggingMode::Development)]
    #[case("DEBUG", LoggingMode::Debug)]
    fn test_mode_parsing(#[case] value: &str, #[case] expected: LoggingMode) {
        assert_eq!(value.parse::<LoggingMode>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = "verbose".parse::<LoggingMode>().unwrap_err();
        assert!(matches!(err, LoggingError::UnknownMode(ref value) if value == "verbose"));
    }

    #[test]
    fn test_default_directive_covers_only_bridge_crates() {
        assert_eq!(
            bridge_directive("debug"),
            "datawedge_api=debug,datawedge_event_manager=debug,datawedge_bridge=debug"
        );
    }
}
