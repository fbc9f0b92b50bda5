//! Client configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default Tracker host
pub const DEFAULT_BASE_URL: &str = "https://www.pivotaltracker.com";

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Tracker API configuration
    pub tracker: TrackerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Tracker API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Scheme and host the versioned path prefix is appended to
    pub base_url: String,
    /// API token sent with every request (optional until `get_token`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Transport timeout in seconds; unset means no timeout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl Settings {
    /// Create a new configuration instance
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            tracker: TrackerConfig {
                base_url: get_env_or_default("PIVOTAL_BASE_URL", DEFAULT_BASE_URL),
                token: std::env::var("PIVOTAL_TOKEN").ok(),
                timeout: std::env::var("PIVOTAL_TIMEOUT")
                    .ok()
                    .map(|v| v.parse::<u64>())
                    .transpose()
                    .context("Invalid timeout value")?,
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        self.tracker.validate()?;

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        // Validate log format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

impl TrackerConfig {
    /// Validate the API section on its own
    pub fn validate(&self) -> Result<()> {
        // Validate URL format
        if !self.base_url.starts_with("http") {
            anyhow::bail!("Invalid Tracker base URL format, should start with 'http'");
        }

        if let Some(token) = &self.token {
            if token.is_empty() {
                anyhow::bail!("Tracker token cannot be empty");
            }
            if token.contains(char::is_whitespace) {
                anyhow::bail!("Tracker token cannot contain whitespace characters");
            }
        }

        if self.timeout == Some(0) {
            anyhow::bail!("Timeout value cannot be 0");
        }

        Ok(())
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            tracker: TrackerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = settings();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.tracker.base_url, "https://www.pivotaltracker.com");
        assert!(settings.tracker.timeout.is_none());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut bad_url = settings();
        bad_url.tracker.base_url = "ftp://example.com".to_string();
        assert!(bad_url.validate().is_err());

        let mut bad_token = settings();
        bad_token.tracker.token = Some("abc def".to_string());
        assert!(bad_token.validate().is_err());

        let mut bad_timeout = settings();
        bad_timeout.tracker.timeout = Some(0);
        assert!(bad_timeout.validate().is_err());

        let mut bad_level = settings();
        bad_level.logging.level = "verbose".to_string();
        assert!(bad_level.validate().is_err());
    }
}
