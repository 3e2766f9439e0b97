//! # Logging Configuration
//!
//! Configuration for the logging subsystem.
//! Supports environment variables and programmatic configuration.

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt as tfmt, prelude::*};

/// Boxed subscriber plus the guard of its file writer, if any.
pub type BuiltSubscriber = (Box<dyn tracing::Subscriber + Send + Sync>, Option<WorkerGuard>);

/// Output format of the console layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        };
        f.write_str(s)
    }
}

/// Logging configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Filter directive (info, debug, `server=debug,sea_orm=warn`)
    #[serde(default = "default_level")]
    pub level:    String,
    /// Console output format
    #[serde(default)]
    pub format:   LogFormat,
    /// Optional log file path, rotated daily
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_level() -> String { "info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level:    default_level(),
            format:   LogFormat::Json,
            log_file: None,
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables, falling back to the given values.
    ///
    /// `RUST_LOG` overrides the level, `VITALOG_LOG_FORMAT` the format and
    /// `VITALOG_LOG_FILE` the file path. Unknown formats fall back to JSON.
    pub fn from_env(level: &str, format: &str, log_file: Option<&str>) -> Self {
        let format = std::env::var("VITALOG_LOG_FORMAT").unwrap_or_else(|_| format.to_string());
        Self {
            level:    std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
            format:   format.parse().unwrap_or_default(),
            log_file: std::env::var("VITALOG_LOG_FILE")
                .ok()
                .or(log_file.map(|s| s.to_string())),
        }
    }

    /// Parse the level into an env filter, defaulting to `info` when invalid.
    pub fn filter(&self) -> EnvFilter { EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info")) }

    /// Build the tracing subscriber from this configuration.
    pub fn build(&self) -> BuiltSubscriber {
        let console = match self.format {
            LogFormat::Json => {
                tfmt::layer()
                    .json()
                    .with_timer(tfmt::time::UtcTime::rfc_3339())
                    .with_filter(self.filter())
                    .boxed()
            },
            LogFormat::Pretty => {
                tfmt::layer()
                    .pretty()
                    .with_timer(tfmt::time::UtcTime::rfc_3339())
                    .with_filter(self.filter())
                    .boxed()
            },
            LogFormat::Compact => {
                tfmt::layer()
                    .compact()
                    .with_timer(tfmt::time::UtcTime::rfc_3339())
                    .with_filter(self.filter())
                    .boxed()
            },
        };

        let mut layers: Vec<BoxedLayer> = vec![console];
        let mut guard = None;
        if let Some(path) = self.log_file.as_deref() {
            let (writer, file_guard) = file_writer(path);
            layers.push(
                tfmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(writer)
                    .with_filter(self.filter())
                    .boxed(),
            );
            guard = Some(file_guard);
        }

        (Box::new(Registry::default().with(layers)), guard)
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Non-blocking writer over a daily rolling appender.
fn file_writer(path: &str) -> (tracing_appender::non_blocking::NonBlocking, WorkerGuard) {
    let path = Path::new(path);
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "vitalog.log".to_string());

    let appender = tracing_appender::rolling::daily(directory, file_name);
    tracing_appender::non_blocking(appender)
}
