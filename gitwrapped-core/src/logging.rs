//! Logging for gitwrapped
//!
//! Events go to a daily rolling file, `$XDG_STATE_HOME/gitwrapped/gitwrapped.log`.
//! Nothing is written to stdout, so `--export json` output stays clean.
//!
//! The pipeline reports recoverable feed oddities (duplicate dates, header
//! drift) as `warn` events. Set `RUST_LOG=gitwrapped_core=warn` in tests to
//! see them on the test writer.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{Config, LoggingConfig};
use crate::error::{Error, Result};

const LOG_FILE_PREFIX: &str = "gitwrapped.log";

/// Initialize file logging in the XDG state directory.
///
/// `RUST_LOG` takes precedence over `logging.level`.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    init_in(&Config::state_dir(), &config.level)
}

/// Initialize file logging in `log_dir`.
///
/// Fails with [`Error::Config`] when a global subscriber is already set or
/// the level directives do not parse.
pub fn init_in(log_dir: &Path, level: &str) -> Result<LoggingGuard> {
    std::fs::create_dir_all(log_dir)?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(level)?,
    };

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("failed to init logging: {e}")))?;

    tracing::info!(log_dir = %log_dir.display(), level, "Logging initialized");

    Ok(LoggingGuard { _guard: guard })
}

/// Parse `logging.level` directives (`info`, `gitwrapped_core=debug`, ...).
pub fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|e| Error::Config(format!("invalid logging.level {directives:?}: {e}")))
}

/// Route events to the test writer, filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Keeps the background log writer alive; pending lines flush on drop.
pub struct LoggingGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert!(parse_filter("info").is_ok());
        assert!(parse_filter("warn,gitwrapped_core=debug").is_ok());
        assert!(matches!(
            parse_filter("gitwrapped_core=loud"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_second_init_is_an_error() {
        init_test();
        let dir = tempfile::tempdir().unwrap();
        // The test subscriber already owns the global slot
        assert!(matches!(
            init_in(dir.path(), "info"),
            Err(Error::Config(_))
        ));
        assert!(dir.path().exists());
    }
}
