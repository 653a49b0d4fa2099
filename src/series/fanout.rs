//! Registration fan-out
//!
//! Applies resolved auto-registrations to the parent and every child of a
//! newly created series. Each occurrence is routed by its own approval
//! setting: with approval required, entries go to the pending list and are
//! re-subjected to organizer review even though they arrive pre-approved;
//! without it, they land directly in the approved registration list.
//! Writes are deduplicated by user id, so re-applying the same set is a
//! no-op.

use std::collections::BTreeSet;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::models::registration::{PendingRegistration, Registration};
use crate::store::{DocumentId, DocumentStore, OccurrenceRepository};
use crate::utils::errors::StoreResult;

/// A registration write that failed for one occurrence
#[derive(Debug, Clone)]
pub struct FanoutFailure {
    pub occurrence_id: DocumentId,
    pub error: String,
}

/// Result of fanning registrations out across a series
#[derive(Debug, Clone, Default)]
pub struct FanoutOutcome {
    /// Occurrences that now carry the auto-registrations.
    pub applied: usize,
    pub failures: Vec<FanoutFailure>,
}

pub struct RegistrationFanoutWriter<S> {
    occurrences: OccurrenceRepository<S>,
}

impl<S: DocumentStore> RegistrationFanoutWriter<S> {
    pub fn new(occurrences: OccurrenceRepository<S>) -> Self {
        Self { occurrences }
    }

    /// Apply the auto-registrations to every listed occurrence.
    ///
    /// Failures are collected per occurrence and never abort the batch or
    /// roll the occurrence back.
    pub async fn apply(
        &self,
        occurrence_ids: &[DocumentId],
        auto_registrations: &[Registration],
    ) -> FanoutOutcome {
        if auto_registrations.is_empty() {
            return FanoutOutcome::default();
        }

        debug!(
            occurrences = occurrence_ids.len(),
            registrations = auto_registrations.len(),
            "Fanning out auto-registrations"
        );

        let writes = occurrence_ids.iter().map(|occurrence_id| async move {
            self.apply_to_occurrence(occurrence_id, auto_registrations)
                .await
                .map_err(|e| FanoutFailure {
                    occurrence_id: occurrence_id.clone(),
                    error: e.to_string(),
                })
        });

        let mut outcome = FanoutOutcome::default();
        for result in join_all(writes).await {
            match result {
                Ok(()) => outcome.applied += 1,
                Err(failure) => {
                    warn!(
                        occurrence_id = %failure.occurrence_id,
                        error = %failure.error,
                        "Registration fan-out failed for occurrence"
                    );
                    outcome.failures.push(failure);
                }
            }
        }

        info!(
            applied = outcome.applied,
            failed = outcome.failures.len(),
            "Registration fan-out finished"
        );
        outcome
    }

    async fn apply_to_occurrence(
        &self,
        occurrence_id: &str,
        auto_registrations: &[Registration],
    ) -> StoreResult<()> {
        let stored = self.occurrences.find_by_id(occurrence_id).await?;
        let occurrence = stored.occurrence;

        // Dedupe by user id against both existing lists and within the batch.
        let mut seen = BTreeSet::new();
        let fresh: Vec<&Registration> = auto_registrations
            .iter()
            .filter(|r| {
                seen.insert(r.user_id.clone()) && !occurrence.has_registration_for(&r.user_id)
            })
            .collect();

        if fresh.is_empty() {
            debug!(
                occurrence_id = occurrence_id,
                "All auto-registrations already present, nothing to write"
            );
            return Ok(());
        }

        if occurrence.template.requires_approval {
            let mut pending = occurrence.pending_registrations;
            pending.extend(
                fresh
                    .into_iter()
                    .map(|r| PendingRegistration::from(r.clone())),
            );
            self.occurrences
                .replace_pending_registrations(occurrence_id, &pending)
                .await
        } else {
            let mut registrations = occurrence.registrations;
            registrations.extend(fresh.into_iter().cloned());
            self.occurrences
                .replace_registrations(occurrence_id, &registrations)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{EventMode, EventTemplate, Occurrence};
    use crate::models::registration::RegistrationStatus;
    use crate::store::InMemoryStore;
    use chrono::{NaiveDate, Utc};
    use std::sync::Arc;

    fn template(requires_approval: bool) -> EventTemplate {
        EventTemplate {
            name: "Run Club".to_string(),
            description: "Weekly 5k".to_string(),
            venue: "Lakefront Trail".to_string(),
            mode: EventMode::Offline,
            organizer_id: "org-1".to_string(),
            organizer_name: "Kim".to_string(),
            community_id: None,
            image_ref: None,
            requires_approval,
        }
    }

    async fn seed_occurrence(
        repo: &OccurrenceRepository<InMemoryStore>,
        requires_approval: bool,
    ) -> String {
        let date = NaiveDate::from_ymd_opt(2025, 7, 5).unwrap();
        let occurrence = Occurrence::from_template(&template(requires_approval), date, 1, None);
        repo.create(&occurrence).await.unwrap()
    }

    fn auto(user_id: &str) -> Registration {
        Registration::auto(user_id, user_id, format!("{}@example.org", user_id), Utc::now())
    }

    #[tokio::test]
    async fn without_approval_registrations_land_approved() {
        let repo = OccurrenceRepository::new(Arc::new(InMemoryStore::new()), "events");
        let writer = RegistrationFanoutWriter::new(repo.clone());
        let id = seed_occurrence(&repo, false).await;

        let outcome = writer.apply(&[id.clone()], &[auto("u1"), auto("u2")]).await;
        assert_eq!(outcome.applied, 1);
        assert!(outcome.failures.is_empty());

        let stored = repo.find_by_id(&id).await.unwrap();
        assert_eq!(stored.occurrence.registrations.len(), 2);
        assert!(stored.occurrence.pending_registrations.is_empty());
        assert!(stored
            .occurrence
            .registrations
            .iter()
            .all(|r| r.status == RegistrationStatus::Approved));
    }

    #[tokio::test]
    async fn with_approval_registrations_land_pending() {
        let repo = OccurrenceRepository::new(Arc::new(InMemoryStore::new()), "events");
        let writer = RegistrationFanoutWriter::new(repo.clone());
        let id = seed_occurrence(&repo, true).await;

        writer.apply(&[id.clone()], &[auto("u1")]).await;

        let stored = repo.find_by_id(&id).await.unwrap();
        assert!(stored.occurrence.registrations.is_empty());
        assert_eq!(stored.occurrence.pending_registrations.len(), 1);
        assert_eq!(stored.occurrence.pending_registrations[0].user_id, "u1");
    }

    #[tokio::test]
    async fn reapplying_the_same_set_creates_no_duplicates() {
        let repo = OccurrenceRepository::new(Arc::new(InMemoryStore::new()), "events");
        let writer = RegistrationFanoutWriter::new(repo.clone());
        let id = seed_occurrence(&repo, false).await;

        let registrations = [auto("u1"), auto("u2")];
        writer.apply(&[id.clone()], &registrations).await;
        writer.apply(&[id.clone()], &registrations).await;

        let stored = repo.find_by_id(&id).await.unwrap();
        assert_eq!(stored.occurrence.registrations.len(), 2);
    }

    #[tokio::test]
    async fn manual_registration_is_not_duplicated_by_auto() {
        let repo = OccurrenceRepository::new(Arc::new(InMemoryStore::new()), "events");
        let writer = RegistrationFanoutWriter::new(repo.clone());

        let date = NaiveDate::from_ymd_opt(2025, 7, 5).unwrap();
        let mut occurrence = Occurrence::from_template(&template(false), date, 1, None);
        occurrence.registrations.push(Registration {
            user_id: "u1".to_string(),
            display_name: "Uma".to_string(),
            email: "u1@example.org".to_string(),
            reason: "Signed up manually".to_string(),
            submitted_at: Utc::now(),
            status: RegistrationStatus::Approved,
        });
        let id = repo.create(&occurrence).await.unwrap();

        writer.apply(&[id.clone()], &[auto("u1"), auto("u2")]).await;

        let stored = repo.find_by_id(&id).await.unwrap();
        assert_eq!(stored.occurrence.registrations.len(), 2);
        let manual = stored
            .occurrence
            .registrations
            .iter()
            .find(|r| r.user_id == "u1")
            .unwrap();
        assert_eq!(manual.reason, "Signed up manually");
    }

    #[tokio::test]
    async fn missing_occurrence_is_reported_not_fatal() {
        let repo = OccurrenceRepository::new(Arc::new(InMemoryStore::new()), "events");
        let writer = RegistrationFanoutWriter::new(repo.clone());
        let good = seed_occurrence(&repo, false).await;

        let outcome = writer
            .apply(&[good.clone(), "gone".to_string()], &[auto("u1")])
            .await;
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].occurrence_id, "gone");
    }
}
