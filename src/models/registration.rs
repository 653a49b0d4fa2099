//! Registration models
//!
//! Registrations are embedded in occurrence documents. Pending entries carry
//! no status; approval moves them into the main registration list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reason string attached to auto-carried-over registrations
pub const AUTO_REGISTRATION_REASON: &str =
    "Automatically registered as a returning participant of this recurring series";

/// Registration status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

/// A registration embedded in an occurrence document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub reason: String,
    pub submitted_at: DateTime<Utc>,
    pub status: RegistrationStatus,
}

impl Registration {
    /// Build an auto-carried-over registration for a returning participant
    pub fn auto(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            email: email.into(),
            reason: AUTO_REGISTRATION_REASON.to_string(),
            submitted_at,
            status: RegistrationStatus::Approved,
        }
    }
}

/// A registration awaiting organizer review (no status field)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRegistration {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub reason: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<Registration> for PendingRegistration {
    fn from(registration: Registration) -> Self {
        Self {
            user_id: registration.user_id,
            display_name: registration.display_name,
            email: registration.email,
            reason: registration.reason,
            submitted_at: registration.submitted_at,
        }
    }
}
