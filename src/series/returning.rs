//! Returning-participant resolution
//!
//! Collects the users who were approved for the organizer's prior recurring
//! occurrences and prepares pre-approved registrations to carry into a new
//! series. Read-only and strictly best-effort: a failed history query or
//! profile lookup degrades the result, it never aborts series creation.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::models::registration::{Registration, RegistrationStatus};
use crate::store::{DocumentStore, OccurrenceRepository, ProfileLookup};

/// Outcome of returning-participant resolution
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub registrations: Vec<Registration>,
    /// Candidate ids dropped because their profile lookup failed or was empty.
    pub skipped_profiles: usize,
    /// True when the history query itself failed and resolution was skipped.
    pub query_failed: bool,
}

impl Resolution {
    pub fn is_degraded(&self) -> bool {
        self.query_failed || self.skipped_profiles > 0
    }

    /// Human-readable degradation warnings for the series report
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.query_failed {
            warnings.push(
                "Participant history query failed; series created without auto-registrations"
                    .to_string(),
            );
        }
        if self.skipped_profiles > 0 {
            warnings.push(format!(
                "{} returning participant(s) skipped because their profile could not be loaded",
                self.skipped_profiles
            ));
        }
        warnings
    }
}

pub struct ReturningParticipantResolver<S, P> {
    occurrences: OccurrenceRepository<S>,
    profiles: Arc<P>,
}

impl<S: DocumentStore, P: ProfileLookup> ReturningParticipantResolver<S, P> {
    pub fn new(occurrences: OccurrenceRepository<S>, profiles: Arc<P>) -> Self {
        Self {
            occurrences,
            profiles,
        }
    }

    /// Resolve the auto-registrations to carry into a new series.
    ///
    /// Distinct approved participants of the organizer's prior recurring
    /// occurrences, excluding the organizer, in deterministic id order.
    pub async fn resolve(&self, organizer_id: &str) -> Resolution {
        debug!(organizer_id = organizer_id, "Resolving returning participants");

        let history = match self
            .occurrences
            .find_recurring_by_organizer(organizer_id)
            .await
        {
            Ok(history) => history,
            Err(e) => {
                warn!(
                    organizer_id = organizer_id,
                    error = %e,
                    "Participant history query failed, continuing without auto-registrations"
                );
                return Resolution {
                    query_failed: true,
                    ..Resolution::default()
                };
            }
        };

        let mut candidate_ids = BTreeSet::new();
        for stored in &history {
            for registration in &stored.occurrence.registrations {
                if registration.status == RegistrationStatus::Approved
                    && registration.user_id != organizer_id
                {
                    candidate_ids.insert(registration.user_id.clone());
                }
            }
        }

        let resolved_at = Utc::now();
        let lookups = candidate_ids.iter().map(|user_id| async move {
            (user_id.clone(), self.profiles.profile(user_id).await)
        });

        let mut resolution = Resolution::default();
        for (user_id, result) in join_all(lookups).await {
            match result {
                Ok(Some(profile)) => resolution.registrations.push(Registration::auto(
                    user_id,
                    profile.display_name,
                    profile.email,
                    resolved_at,
                )),
                Ok(None) => {
                    warn!(user_id = %user_id, "Profile missing, skipping returning participant");
                    resolution.skipped_profiles += 1;
                }
                Err(e) => {
                    warn!(
                        user_id = %user_id,
                        error = %e,
                        "Profile lookup failed, skipping returning participant"
                    );
                    resolution.skipped_profiles += 1;
                }
            }
        }

        info!(
            organizer_id = organizer_id,
            resolved = resolution.registrations.len(),
            skipped = resolution.skipped_profiles,
            "Returning participants resolved"
        );
        resolution
    }
}
