//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main configuration structure for the series engine
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub store: StoreConfig,
    pub series: SeriesConfig,
    pub logging: LoggingConfig,
}

/// Document store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Collection holding event occurrence documents.
    pub events_collection: String,
    /// Collection holding user profile documents.
    pub profiles_collection: String,
}

/// Series generation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeriesConfig {
    /// Configured occurrence limit; the hard cap of 100 applies on top.
    pub max_occurrences: u32,
    /// Carry approved returning participants into new series.
    pub auto_registration: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("gatherly").required(false))
            .add_source(config::Environment::with_prefix("GATHERLY"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::GatherlyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                events_collection: "events".to_string(),
                profiles_collection: "users".to_string(),
            },
            series: SeriesConfig {
                max_occurrences: 100,
                auto_registration: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/gatherly".to_string(),
            },
        }
    }
}
