//! Logging utilities
//!
//! Subscriber setup and helpers that keep request and response bodies short
//! enough for debug logs

use crate::config::settings::LoggingConfig;
use anyhow::{Context, Result};
use tracing::info;

/// Longest body excerpt written to debug logs
pub const MAX_LOGGED_BODY: usize = 512;

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut cut = max_len;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}... ({} bytes truncated)", &s[..cut], s.len() - cut)
}

/// Body excerpt suitable for a debug log line
pub fn body_summary(body: &str) -> String {
    truncate_content(body.trim(), MAX_LOGGED_BODY)
}

/// Initialize the global tracing subscriber
///
/// Fails if a subscriber has already been installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        // Human readable format (development environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Logging system initialized");
    Ok(())
}
