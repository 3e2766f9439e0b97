//! # Vitalog Logging Infrastructure
//!
//! Structured logging for the Vitalog service.
//! Builds a `tracing` subscriber from environment-driven configuration with
//! JSON, pretty or compact output and an optional rolling log file.

pub mod config;
pub mod macros;
pub mod request_id;

pub use config::{LogFormat, LoggingConfig};
pub use request_id::RequestId;
// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// Keeps background log writers alive.
///
/// Dropping the guard flushes and stops the file writer, so the binary holds
/// it for the whole process lifetime.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize the logging system.
///
/// # Arguments
///
/// * `level` - Log level or filter directive (debug, info, `server=debug`, ...)
/// * `format` - Output format (json, pretty, compact)
/// * `log_file` - Optional path to log file
pub fn init(
    level: &str,
    format: &str,
    log_file: Option<&str>,
) -> Result<LoggingGuard, tracing::subscriber::SetGlobalDefaultError> {
    init_with_config(LoggingConfig::from_env(level, format, log_file))
}

/// Initialize logging with a custom configuration.
pub fn init_with_config(config: LoggingConfig) -> Result<LoggingGuard, tracing::subscriber::SetGlobalDefaultError> {
    let (subscriber, file_guard) = config.build();
    tracing::subscriber::set_global_default(subscriber)?;
    info!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(LoggingGuard {
        _file: file_guard,
    })
}
