//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{GatherlyError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_store_config(&settings.store)?;
    validate_series_config(&settings.series)?;
    validate_logging_config(&settings.logging)?;
    Ok(())
}

/// Validate document store configuration
fn validate_store_config(config: &super::StoreConfig) -> Result<()> {
    if config.events_collection.is_empty() {
        return Err(GatherlyError::Config(
            "Events collection name is required".to_string(),
        ));
    }

    if config.profiles_collection.is_empty() {
        return Err(GatherlyError::Config(
            "Profiles collection name is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate series generation configuration
fn validate_series_config(config: &super::SeriesConfig) -> Result<()> {
    if config.max_occurrences == 0 {
        return Err(GatherlyError::Config(
            "Max occurrences must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(GatherlyError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(GatherlyError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
