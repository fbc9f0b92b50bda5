//! Configuration management module
//!
//! Responsible for loading client settings from environment variables and `.env` files

pub mod settings;

pub use settings::{LoggingConfig, Settings, TrackerConfig};
