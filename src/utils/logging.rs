//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! utilities for the Gatherly series engine.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "gatherly.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log series creation outcomes with structured data
pub fn log_series_created(parent_id: &str, created: usize, requested: usize, organizer_id: &str) {
    info!(
        parent_id = parent_id,
        created = created,
        requested = requested,
        organizer_id = organizer_id,
        "Series creation finished"
    );
}
