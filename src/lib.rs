//! Gatherly recurring event series engine
//!
//! The library behind series creation on a community events platform: it
//! generates occurrence dates from a recurrence rule, materializes the
//! parent and child occurrence records in the platform's document store,
//! resolves returning participants from the organizer's prior series, and
//! fans their auto-registrations out to every new occurrence. It is invoked
//! from the platform's event-creation form handler.

pub mod config;
pub mod models;
pub mod series;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{GatherlyError, Result, StoreError};

// Re-export main components for easy access
pub use models::{EventTemplate, Occurrence, RecurrenceRule};
pub use series::{SeriesCreationReport, SeriesService, MAX_SERIES_OCCURRENCES};
pub use store::{DocumentStore, InMemoryStore, ProfileLookup};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
