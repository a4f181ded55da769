//! Gateway client configuration
//!
//! Loads configuration from environment variables (with `.env` support) or
//! builds it programmatically.

use std::env;

/// Configuration consumed by the gateway session
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bot authentication token (secret)
    pub token: String,
    /// Member-count threshold above which guilds arrive without offline
    /// members (50-250)
    pub large_threshold: u32,
    /// This connection's shard number
    pub shard_num: u32,
    /// Total number of shards
    pub shard_total: u32,
    /// Maximum consecutive reconnect attempts before giving up
    pub max_reconnect_attempts: u32,
    /// Base URL of the REST API used for gateway discovery
    pub rest_base_url: String,
}

impl GatewayConfig {
    /// Create a configuration with defaults for everything but the token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            large_threshold: default_large_threshold(),
            shard_num: 0,
            shard_total: 1,
            max_reconnect_attempts: default_max_reconnect_attempts(),
            rest_base_url: default_rest_base_url(),
        }
    }

    /// Set the large-guild threshold
    #[must_use]
    pub fn with_large_threshold(mut self, large_threshold: u32) -> Self {
        self.large_threshold = large_threshold;
        self
    }

    /// Set the shard assignment
    #[must_use]
    pub fn with_shard(mut self, shard_num: u32, shard_total: u32) -> Self {
        self.shard_num = shard_num;
        self.shard_total = shard_total;
        self
    }

    /// Set the reconnect budget
    #[must_use]
    pub fn with_max_reconnect_attempts(mut self, attempts: u32) -> Self {
        self.max_reconnect_attempts = attempts;
        self
    }

    /// Override the REST base URL (useful against test servers)
    #[must_use]
    pub fn with_rest_base_url(mut self, url: impl Into<String>) -> Self {
        self.rest_base_url = url.into();
        self
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `DISCORD_TOKEN` is missing or any value is out
    /// of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let config = Self {
            token: env::var("DISCORD_TOKEN").map_err(|_| ConfigError::MissingVar("DISCORD_TOKEN"))?,
            large_threshold: parse_var("DISCORD_LARGE_THRESHOLD", default_large_threshold())?,
            shard_num: parse_var("DISCORD_SHARD_NUM", 0)?,
            shard_total: parse_var("DISCORD_SHARD_TOTAL", 1)?,
            max_reconnect_attempts: parse_var(
                "DISCORD_MAX_RECONNECT_ATTEMPTS",
                default_max_reconnect_attempts(),
            )?,
            rest_base_url: env::var("DISCORD_REST_BASE_URL")
                .unwrap_or_else(|_| default_rest_base_url()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges
    ///
    /// # Errors
    /// Returns an error when `large_threshold` is outside 50-250, the
    /// shard total is zero, or the shard number is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingVar("DISCORD_TOKEN"));
        }
        if !(50..=250).contains(&self.large_threshold) {
            return Err(ConfigError::InvalidValue(
                "DISCORD_LARGE_THRESHOLD",
                format!("{} (must be 50-250)", self.large_threshold),
            ));
        }
        if self.shard_total == 0 {
            return Err(ConfigError::InvalidValue(
                "DISCORD_SHARD_TOTAL",
                "0 (must be at least 1)".to_string(),
            ));
        }
        if self.shard_num >= self.shard_total {
            return Err(ConfigError::InvalidValue(
                "DISCORD_SHARD_NUM",
                format!("{} (must be below shard total {})", self.shard_num, self.shard_total),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(default),
    }
}

// Default value functions
fn default_large_threshold() -> u32 {
    100
}

fn default_max_reconnect_attempts() -> u32 {
    5
}

fn default_rest_base_url() -> String {
    "https://discordapp.com/api".to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
