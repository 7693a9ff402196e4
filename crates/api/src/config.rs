//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the SlotSync API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `API_PATH_PREFIX`: Optional prefix every route is mounted under (e.g. "/api")
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: Connection pool size (default: 5)
//! - `DATABASE_ACQUIRE_TIMEOUT_SECONDS`: Wait limit for a pooled connection (default: 30)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `FRONTEND_ORIGIN`: The single origin allowed by CORS (default: "http://localhost:5173")

use std::{env, str::FromStr, time::Duration};

use eyre::{Result, WrapErr, eyre};
use tracing::Level;

/// Configuration for the SlotSync API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotsync_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Prefix all routes are nested under, `None` to serve from the root
    pub path_prefix: Option<String>,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub database_max_connections: u32,

    /// How long a request waits for a pooled connection, in seconds
    pub database_acquire_timeout: u64,

    /// Log level for the application
    pub log_level: Level,

    /// Origin allowed to call the API from a browser
    pub frontend_origin: String,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - A numeric setting cannot be parsed
    /// - API_PATH_PREFIX does not start with '/'
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "API_PORT", 3000)?;
        let path_prefix = match lookup("API_PATH_PREFIX").map(|p| p.trim_end_matches('/').to_string()) {
            None => None,
            Some(prefix) if prefix.is_empty() => None,
            Some(prefix) if prefix.starts_with('/') => Some(prefix),
            Some(prefix) => return Err(eyre!("API_PATH_PREFIX must start with '/', got {prefix:?}")),
        };

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;
        let database_max_connections = parse_positive_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;
        let database_acquire_timeout =
            parse_positive_or(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECONDS", 30)?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let frontend_origin =
            lookup("FRONTEND_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        // Performance settings
        let request_timeout = parse_positive_or(&lookup, "API_REQUEST_TIMEOUT_SECONDS", 30)?;

        Ok(Self {
            host,
            port,
            path_prefix,
            database_url,
            database_max_connections,
            database_acquire_timeout,
            log_level,
            frontend_origin,
            request_timeout,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn database_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.database_acquire_timeout)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {key} value: {raw:?}")),
        None => Ok(default),
    }
}

/// Like `parse_or`, but zero is a configuration error.
fn parse_positive_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Default + PartialEq,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = parse_or(lookup, key, default)?;
    if value == T::default() {
        return Err(eyre!("{key} must be greater than zero"));
    }
    Ok(value)
}
