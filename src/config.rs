//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Bind Address
//!
//! ```bash
//! export PORT="8080"             # default 8080
//! export HOST="0.0.0.0"          # default 0.0.0.0
//! # or, taking priority over both:
//! export LISTEN="127.0.0.1:9000"
//! ```
//!
//! ## Optional Variables
//!
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CACHE_ENABLED` - `false` disables caching entirely (default: `true`)
//! - `CACHE_TTL_SECONDS` - Lifetime of cached lookups (default: 86400)
//! - `CACHE_MAX_ENTRIES` - Cache capacity (default: 10000)
//! - `CACHE_SWEEP_INTERVAL_SECONDS` - Expired entry sweep period (default: 300)
//! - `NOMINATIM_BASE_URL` - Upstream base URL (default: public OSM instance)
//! - `UPSTREAM_USER_AGENT` - User-Agent sent upstream (default: `zip-coords/<version>`)
//! - `UPSTREAM_TIMEOUT_SECONDS` - Upstream request timeout (default: 10)

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECONDS};
use crate::infrastructure::geocoding::DEFAULT_BASE_URL;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When false, every lookup goes upstream.
    pub cache_enabled: bool,
    /// Lifetime of every cached lookup.
    pub cache_ttl_seconds: u64,
    /// Upper bound on cached entries, expired ones included.
    pub cache_max_entries: usize,
    /// Period of the background expired-entry sweep.
    pub cache_sweep_interval_seconds: u64,
    pub nominatim_base_url: String,
    pub upstream_user_agent: String,
    pub upstream_timeout_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unparseable numeric values fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the bind address cannot be assembled.
    pub fn from_env() -> Result<Self> {
        let listen_addr = Self::load_listen_addr().context("Failed to load bind address")?;

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let cache_enabled = env::var("CACHE_ENABLED")
            .map(|v| !(v.eq_ignore_ascii_case("false") || v == "0"))
            .unwrap_or(true);

        let cache_ttl_seconds = parse_env("CACHE_TTL_SECONDS", DEFAULT_TTL_SECONDS);
        let cache_max_entries = parse_env("CACHE_MAX_ENTRIES", DEFAULT_MAX_ENTRIES);
        let cache_sweep_interval_seconds = parse_env("CACHE_SWEEP_INTERVAL_SECONDS", 300);

        let nominatim_base_url =
            env::var("NOMINATIM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let upstream_user_agent = env::var("UPSTREAM_USER_AGENT")
            .unwrap_or_else(|_| format!("zip-coords/{}", env!("CARGO_PKG_VERSION")));
        let upstream_timeout_seconds = parse_env("UPSTREAM_TIMEOUT_SECONDS", 10);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            cache_enabled,
            cache_ttl_seconds,
            cache_max_entries,
            cache_sweep_interval_seconds,
            nominatim_base_url,
            upstream_user_agent,
            upstream_timeout_seconds,
        })
    }

    /// Loads the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. Constructed from `HOST` (default `0.0.0.0`) and `PORT` (default `8080`)
    fn load_listen_addr() -> Result<String> {
        if let Ok(listen) = env::var("LISTEN") {
            return Ok(listen);
        }

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT must be a number between 0 and 65535, got '{}'", port))?,
            Err(_) => 8080,
        };

        Ok(format!("{}:{}", host, port))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not a socket address
    /// - `log_format` is not `text` or `json`
    /// - a cache or upstream duration is zero, or the capacity is out of range
    /// - `nominatim_base_url` is not an http(s) URL
    /// - `upstream_user_agent` is empty
    pub fn validate(&self) -> Result<()> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!(
                "LISTEN must be in format 'ip:port', got '{}'",
                self.listen_addr
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.cache_ttl_seconds == 0 {
            anyhow::bail!("CACHE_TTL_SECONDS must be greater than 0");
        }

        if Self::ttl_from_secs(self.cache_ttl_seconds).is_none() {
            anyhow::bail!(
                "CACHE_TTL_SECONDS is too large, got {}",
                self.cache_ttl_seconds
            );
        }

        if self.cache_max_entries == 0 || self.cache_max_entries > 10_000_000 {
            anyhow::bail!(
                "CACHE_MAX_ENTRIES must be between 1 and 10000000, got {}",
                self.cache_max_entries
            );
        }

        if self.cache_sweep_interval_seconds == 0 {
            anyhow::bail!("CACHE_SWEEP_INTERVAL_SECONDS must be greater than 0");
        }

        if !self.nominatim_base_url.starts_with("http://")
            && !self.nominatim_base_url.starts_with("https://")
        {
            anyhow::bail!(
                "NOMINATIM_BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.nominatim_base_url
            );
        }

        url::Url::parse(&self.nominatim_base_url).with_context(|| {
            format!(
                "NOMINATIM_BASE_URL is not a valid URL: '{}'",
                self.nominatim_base_url
            )
        })?;

        if self.upstream_user_agent.trim().is_empty() {
            anyhow::bail!("UPSTREAM_USER_AGENT must not be empty");
        }

        if self.upstream_timeout_seconds == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECONDS must be greater than 0");
        }

        Ok(())
    }

    /// TTL applied to every cached lookup.
    pub fn cache_ttl(&self) -> chrono::Duration {
        Self::ttl_from_secs(self.cache_ttl_seconds).unwrap_or(chrono::Duration::MAX)
    }

    fn ttl_from_secs(secs: u64) -> Option<chrono::Duration> {
        i64::try_from(secs).ok().and_then(chrono::Duration::try_seconds)
    }

    pub fn cache_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cache_sweep_interval_seconds)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Upstream: {}", self.nominatim_base_url);
        tracing::info!("  Upstream timeout: {}s", self.upstream_timeout_seconds);

        if self.cache_enabled {
            tracing::info!(
                "  Cache: enabled (TTL: {}s, capacity: {}, sweep every {}s)",
                self.cache_ttl_seconds,
                self.cache_max_entries,
                self.cache_sweep_interval_seconds
            );
        } else {
            tracing::info!("  Cache: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            cache_enabled: true,
            cache_ttl_seconds: DEFAULT_TTL_SECONDS,
            cache_max_entries: DEFAULT_MAX_ENTRIES,
            cache_sweep_interval_seconds: 300,
            nominatim_base_url: DEFAULT_BASE_URL.to_string(),
            upstream_user_agent: format!("zip-coords/{}", env!("CARGO_PKG_VERSION")),
            upstream_timeout_seconds: 10,
        }
    }
}

fn parse_env<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if variables are malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
