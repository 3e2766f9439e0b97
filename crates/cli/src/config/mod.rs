//! # Runtime Configuration
//!
//! Database, bind address and timezone settings for the CLI, read from
//! environment variables.

use std::{fmt::Write as _, net::SocketAddr};

use chrono_tz::Tz;

/// Environment variable naming the calendar timezone
pub const TIMEZONE_VAR: &str = "VITALOG_TIMEZONE";

/// Database configuration for CLI
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Database host address
    pub host:     String,
    /// Database port number
    pub port:     u16,
    /// Database name
    pub database: String,
    /// Database username
    pub username: String,
    /// Database password
    pub password: String,
    /// SSL mode
    pub ssl_mode: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("ssl_mode", &self.ssl_mode)
            .finish_non_exhaustive()
    }
}

/// Errors that can occur when reading runtime configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The port number could not be parsed as a valid number.
    #[error("Invalid port number: {value}")]
    InvalidPort {
        /// The invalid port value that was provided.
        value: String,
    },

    /// The timezone is not a known IANA name.
    #[error("Invalid timezone '{value}': {reason}")]
    InvalidTimezone { value: String, reason: String },
}

impl From<ConfigError> for error::AppError {
    fn from(err: ConfigError) -> Self { error::AppError::config(err.to_string()) }
}

impl DatabaseConfig {
    /// Creates a new DatabaseConfig from `VITALOG_DATABASE_*` environment variables.
    ///
    /// Returns `Err` if any variable has an invalid format.
    pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|name| std::env::var(name).ok()) }

    /// Same as [`DatabaseConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port_str = lookup("VITALOG_DATABASE_PORT").unwrap_or_else(|| "5432".to_owned());
        let port = port_str.parse::<u16>().map_err(|_e| {
            ConfigError::InvalidPort {
                value: port_str.clone(),
            }
        })?;

        Ok(Self {
            host: lookup("VITALOG_DATABASE_HOST").unwrap_or_else(|| "localhost".to_owned()),
            port,
            database: lookup("VITALOG_DATABASE_NAME").unwrap_or_else(|| "vitalog".to_owned()),
            username: lookup("VITALOG_DATABASE_USER").unwrap_or_else(|| "vitalog".to_owned()),
            password: lookup("VITALOG_DATABASE_PASSWORD").unwrap_or_default(),
            ssl_mode: lookup("VITALOG_DATABASE_SSL_MODE").unwrap_or_else(|| "prefer".to_owned()),
        })
    }
}

/// Builds the PostgreSQL connection URL from a [`DatabaseConfig`]
pub fn build_database_url(config: &DatabaseConfig) -> String {
    format!(
        "postgres://{}:{}@{}:{}/{}?sslmode={}",
        encode_userinfo(&config.username),
        encode_userinfo(&config.password),
        config.host,
        config.port,
        config.database,
        config.ssl_mode
    )
}

/// Percent-encodes everything outside the URI unreserved set.
fn encode_userinfo(s: &str) -> String {
    let mut result = String::with_capacity(s.len().saturating_mul(3));
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            result.push(char::from(byte));
        }
        else {
            let _ = write!(result, "%{:02X}", byte);
        }
    }
    result
}

/// Parses a host and port into a SocketAddr.
///
/// IPv6 hosts are bracketed before the port is appended.
pub fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, std::net::AddrParseError> {
    let addr_str = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    }
    else {
        format!("{}:{}", host, port)
    };
    addr_str.parse()
}

/// Resolves the calendar timezone; unset or blank means Asia/Taipei.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidTimezone`] for an unknown IANA name.
pub fn parse_timezone(value: Option<&str>) -> Result<Tz, ConfigError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(::server::DEFAULT_TIMEZONE),
        Some(name) => {
            name.parse::<Tz>().map_err(|e| {
                ConfigError::InvalidTimezone {
                    value:  name.to_owned(),
                    reason: e.to_string(),
                }
            })
        },
    }
}

/// Timezone from `VITALOG_TIMEZONE`.
pub fn timezone_from_env() -> Result<Tz, ConfigError> { parse_timezone(std::env::var(TIMEZONE_VAR).ok().as_deref()) }
