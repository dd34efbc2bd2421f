//! Server configuration loaded from the environment.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `8080`)
//! - `WORKER_THREADS`: Number of tokio worker threads (default: logical CPU count)
//! - `LOG_FORMAT`: `pretty` (default) | `json`
//!
//! Empty or whitespace-only values are treated as unset.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8080;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while reading the server configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `PORT` is not a valid port number.
    #[error("Invalid port: '{0}'. Expected a number between 0 and 65535")]
    InvalidPort(String),

    /// `WORKER_THREADS` is not a positive number.
    #[error("Invalid worker thread count: '{0}'. Expected a number greater than 0")]
    InvalidWorkerThreads(String),

    /// `LOG_FORMAT` is not recognized.
    #[error("Invalid log format: '{0}'. Expected 'pretty' or 'json'")]
    InvalidLogFormat(String),

    /// `HOST` and `PORT` do not form a socket address.
    #[error("Invalid server address: '{0}'")]
    InvalidAddress(String),
}

// =============================================================================
// Log Format
// =============================================================================

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "pretty" | "text" | "plain" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigurationError::InvalidLogFormat(value.to_string())),
        }
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Runtime settings of the HTTP server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host the listener binds to.
    pub host: String,
    /// Port the listener binds to.
    pub port: u16,
    /// Worker thread count; `None` keeps the runtime default.
    pub worker_threads: Option<usize>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            worker_threads: None,
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Creates a configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if any variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a configuration from an arbitrary key lookup.
    ///
    /// `WORKER_THREADS` above four times the available parallelism is capped.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if any variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match read("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigurationError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        let worker_threads = read("WORKER_THREADS")
            .map(|value| parse_worker_threads(&value))
            .transpose()?;

        let log_format = read("LOG_FORMAT")
            .map(|value| value.parse::<LogFormat>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            worker_threads,
            log_format,
        })
    }

    /// Returns the socket address the server binds to.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidAddress` if `host` is not an IP address.
    pub fn socket_address(&self) -> Result<SocketAddr, ConfigurationError> {
        let address = format!("{}:{}", self.host, self.port);
        address
            .parse()
            .map_err(|_| ConfigurationError::InvalidAddress(address))
    }
}

fn parse_worker_threads(value: &str) -> Result<usize, ConfigurationError> {
    match value.parse::<usize>() {
        Ok(0) | Err(_) => Err(ConfigurationError::InvalidWorkerThreads(value.to_string())),
        Ok(threads) => {
            let max_threads = std::thread::available_parallelism()
                .map(|parallelism| parallelism.get().saturating_mul(4))
                .unwrap_or(64);
            Ok(threads.min(max_threads))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
