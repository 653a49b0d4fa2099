//! Data models
//!
//! This module contains the event, registration, recurrence and user models.

pub mod event;
pub mod recurrence;
pub mod registration;
pub mod user;

// Re-export commonly used types
pub use event::{EventMode, EventTemplate, Occurrence, StoredOccurrence};
pub use recurrence::{Frequency, RecurrenceRule, RecurrenceRuleBuilder, Terminator};
pub use registration::{
    PendingRegistration, Registration, RegistrationStatus, AUTO_REGISTRATION_REASON,
};
pub use user::UserProfile;
