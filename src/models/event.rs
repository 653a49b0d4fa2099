//! Event template and occurrence models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::registration::{PendingRegistration, Registration};
use crate::utils::errors::{GatherlyError, Result};

/// Event delivery mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    Online,
    Offline,
}

/// Immutable fields shared by every occurrence of a series.
///
/// Created once by the organizer at series-creation time and never mutated
/// afterwards; per-occurrence fields (date, position) are applied on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTemplate {
    pub name: String,
    pub description: String,
    /// Venue address for offline events, meeting link for online ones.
    pub venue: String,
    pub mode: EventMode,
    pub organizer_id: String,
    pub organizer_name: String,
    pub community_id: Option<String>,
    pub image_ref: Option<String>,
    pub requires_approval: bool,
}

impl EventTemplate {
    /// Validate the template before it drives any persistence
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GatherlyError::Validation(
                "Event name is required".to_string(),
            ));
        }
        if self.organizer_id.trim().is_empty() {
            return Err(GatherlyError::Validation(
                "Organizer id is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// One persisted calendar instance of a recurring series.
///
/// The first-created occurrence is the parent; its `parent_id` is back-filled
/// to its own document id right after creation. Children reference the
/// parent's id. The document id itself lives on [`StoredOccurrence`], since
/// the store assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    #[serde(flatten)]
    pub template: EventTemplate,
    pub date: NaiveDate,
    pub is_parent: bool,
    pub parent_id: Option<String>,
    /// 1-based position in the series.
    pub occurrence_number: u32,
    /// Marks the occurrence as part of a recurring series for history queries.
    pub recurring: bool,
    pub registrations: Vec<Registration>,
    pub pending_registrations: Vec<PendingRegistration>,
}

impl Occurrence {
    /// Build a fresh occurrence from a template and its series position
    pub fn from_template(
        template: &EventTemplate,
        date: NaiveDate,
        occurrence_number: u32,
        parent_id: Option<String>,
    ) -> Self {
        Self {
            template: template.clone(),
            date,
            is_parent: occurrence_number == 1,
            parent_id,
            occurrence_number,
            recurring: true,
            registrations: Vec::new(),
            pending_registrations: Vec::new(),
        }
    }

    /// Check whether a user already appears in either registration list
    pub fn has_registration_for(&self, user_id: &str) -> bool {
        self.registrations.iter().any(|r| r.user_id == user_id)
            || self
                .pending_registrations
                .iter()
                .any(|r| r.user_id == user_id)
    }
}

/// An occurrence paired with its assigned document id
#[derive(Debug, Clone, PartialEq)]
pub struct StoredOccurrence {
    pub id: String,
    pub occurrence: Occurrence,
}
