//! Logging configuration using tracing
//!
//! Logs go to a file so they never draw over the terminal UI. The level
//! defaults to `debug` in development and `warn` otherwise; `RUST_LOG`
//! overrides it.
//!
//! ```bash
//! RUST_LOG=trace clarify
//! tail -f ~/.local/state/clarify/clarify.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clarify_conductor::{default_log_path, ClarifyConfig};

/// Fallback when no state or cache directory exists
const FALLBACK_LOG_FILE: &str = "clarify.log";

/// Filter directive used when `RUST_LOG` is not set
pub fn default_directive(is_development: bool) -> &'static str {
    if is_development {
        "debug"
    } else {
        "warn"
    }
}

/// Where logs go for a configuration
pub fn log_path(config: &ClarifyConfig) -> PathBuf {
    config
        .log_file
        .clone()
        .or_else(default_log_path)
        .unwrap_or_else(|| PathBuf::from(FALLBACK_LOG_FILE))
}

/// Initialize the logging subsystem
///
/// Returns the path of the log file.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created.
pub fn init(config: &ClarifyConfig) -> anyhow::Result<PathBuf> {
    let path = log_path(config);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(FALLBACK_LOG_FILE);
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.is_development)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(
        version = %config.version,
        environment = %config.environment,
        source = %config.source(),
        "Clarify starting"
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_by_environment() {
        assert_eq!(default_directive(true), "debug");
        assert_eq!(default_directive(false), "warn");
    }

    #[test]
    fn test_log_path_prefers_config() {
        let mut config = ClarifyConfig::default();
        config.log_file = Some(PathBuf::from("/tmp/clarify-test/custom.log"));
        assert_eq!(
            log_path(&config),
            PathBuf::from("/tmp/clarify-test/custom.log")
        );
    }

    #[test]
    fn test_log_path_falls_back() {
        let path = log_path(&ClarifyConfig::default());
        assert!(path.ends_with("clarify.log"));
    }
}
