//! # API Configuration Module
//!
//! Loads the BeautyTON API server configuration from environment variables,
//! falling back to defaults where appropriate.
//!
//! ## Environment Variables
//!
//! Every key is first looked up with the `APP_ENV` prefix (for example
//! `PROD_API_PORT` when `APP_ENV=prod`), then without it.
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DB_MAX_CONNECTIONS`: Size of the connection pool (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `FILE_STORAGE_DIR`: Directory for uploaded files (default: "./uploads")
//! - `SLOT_ACCESS_POLICY`: `allow` or `owner` (default: "allow")

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use eyre::{eyre, Result, WrapErr};
use tracing::Level;

/// Which access policy guards schedule-slot writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAccessPolicy {
    /// Every request may modify any master's calendar.
    Allow,
    /// Only the user owning a master profile may modify its calendar.
    Owner,
}

impl FromStr for SlotAccessPolicy {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "allow" | "allow_all" => Ok(SlotAccessPolicy::Allow),
            "owner" | "master_ownership" => Ok(SlotAccessPolicy::Owner),
            other => Err(eyre!("Unknown SLOT_ACCESS_POLICY value: {}", other)),
        }
    }
}

/// Configuration for the BeautyTON API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use beautyton_api::config::ApiConfig;
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

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub db_max_connections: u32,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Root directory of the local file store
    pub file_storage_dir: PathBuf,

    /// Access policy for schedule-slot writes
    pub slot_access_policy: SlotAccessPolicy,
}

fn parse_level(raw: &str) -> Level {
    match raw.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - API_PORT or DB_MAX_CONNECTIONS cannot be parsed as numbers
    /// - SLOT_ACCESS_POLICY names an unknown policy
    pub fn from_env() -> Result<Self> {
        let prefix = env::var("APP_ENV").ok();
        Self::from_lookup(prefix.as_deref(), |key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(app_env: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| -> Option<String> {
            app_env
                .filter(|env| !env.is_empty())
                .and_then(|env| lookup(&format!("{}_{}", env.to_uppercase(), key)))
                .or_else(|| lookup(key))
        };

        // Network settings
        let host = get("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = get("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = get("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;
        let db_max_connections = get("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .wrap_err("Invalid DB_MAX_CONNECTIONS value")?;

        // Logging settings
        let log_level = parse_level(&get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()));

        // CORS settings
        let cors_origins = get("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = get("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(30);

        // Storage and access settings
        let file_storage_dir = get("FILE_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./uploads"));
        let slot_access_policy = match get("SLOT_ACCESS_POLICY") {
            Some(raw) => raw.parse()?,
            None => SlotAccessPolicy::Allow,
        };

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            log_level,
            cors_origins,
            request_timeout,
            file_storage_dir,
            slot_access_policy,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config =
            ApiConfig::from_lookup(None, lookup(&[("DATABASE_URL", "postgres://localhost/db")]))
                .unwrap();

        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.request_timeout, 30);
        assert_eq!(config.file_storage_dir, PathBuf::from("./uploads"));
        assert_eq!(config.slot_access_policy, SlotAccessPolicy::Allow);
        assert!(config.cors_origins.is_none());
    }

    #[test]
    fn prefixed_keys_win_over_plain_ones() {
        let config = ApiConfig::from_lookup(
            Some("prod"),
            lookup(&[
                ("DATABASE_URL", "postgres://localhost/dev"),
                ("PROD_DATABASE_URL", "postgres://db/prod"),
                ("API_PORT", "4000"),
                ("SLOT_ACCESS_POLICY", "owner"),
                ("API_CORS_ORIGINS", "https://a.example, https://b.example"),
            ]),
        )
        .unwrap();

        assert_eq!(config.database_url, "postgres://db/prod");
        assert_eq!(config.port, 4000);
        assert_eq!(config.slot_access_policy, SlotAccessPolicy::Owner);
        assert_eq!(
            config.cors_origins,
            Some(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
    }

    #[test]
    fn missing_database_url_is_an_error() {
        assert!(ApiConfig::from_lookup(None, lookup(&[])).is_err());
    }

    #[test]
    fn unknown_access_policy_is_an_error() {
        let result = ApiConfig::from_lookup(
            None,
            lookup(&[("DATABASE_URL", "postgres://x"), ("SLOT_ACCESS_POLICY", "nobody")]),
        );
        assert!(result.is_err());
    }
}
