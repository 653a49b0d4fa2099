//! Configuration module
//!
//! This module handles loading and validating the engine's settings.

pub mod settings;
pub mod validation;

pub use settings::{LoggingConfig, SeriesConfig, Settings, StoreConfig};
