//! Configuration handling for the application.
//!
//! Everything comes from environment variables with development defaults,
//! so the binary runs with no setup. `Config::from_env` does the loading
//! and the little validation there is.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Environment variable names. Public so tests can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_TAXONOMY_PATH: &str = "TAXONOMY_PATH";
pub const ENV_SCRAPE_CACHE_TTL_SECS: &str = "SCRAPE_CACHE_TTL_SECS";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_SCRAPE_CACHE_TTL_SECS: i64 = 3600;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    taxonomy_path: Option<PathBuf>,
    scrape_cache_ttl_secs: i64,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        bind_addr: impl Into<String>,
        taxonomy_path: Option<PathBuf>,
        scrape_cache_ttl_secs: i64,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            taxonomy_path,
            scrape_cache_ttl_secs,
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let taxonomy_path = env::var(ENV_TAXONOMY_PATH).ok().map(PathBuf::from);
        let scrape_cache_ttl_secs = match env::var(ENV_SCRAPE_CACHE_TTL_SECS) {
            Ok(raw) => {
                let ttl: i64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    field: ENV_SCRAPE_CACHE_TTL_SECS,
                    reason: format!("'{}' is not an integer", raw),
                })?;
                if ttl < 0 {
                    return Err(ConfigError::InvalidValue {
                        field: ENV_SCRAPE_CACHE_TTL_SECS,
                        reason: "must not be negative".to_string(),
                    });
                }
                ttl
            }
            Err(_) => DEFAULT_SCRAPE_CACHE_TTL_SECS,
        };

        Ok(Self {
            bind_addr,
            taxonomy_path,
            scrape_cache_ttl_secs,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Optional JSON file overriding the built-in tag taxonomy.
    pub fn taxonomy_path(&self) -> Option<&PathBuf> {
        self.taxonomy_path.as_ref()
    }
    /// How long a successful scrape stays cached per URL.
    pub fn scrape_cache_ttl_secs(&self) -> i64 {
        self.scrape_cache_ttl_secs
    }

    /// Development defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        Self::new(DEFAULT_BIND_ADDR, None, DEFAULT_SCRAPE_CACHE_TTL_SECS)
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
