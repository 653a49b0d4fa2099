//! Occurrence materializer
//!
//! Turns a template plus a date sequence into persisted occurrence records.
//! The parent is created first in two phases (create, then back-fill its
//! self-referencing parent id, since the id is only known after the first
//! write); children are created concurrently and reference the parent.
//! There is no rollback: a failed child leaves its siblings in place and is
//! reported per occurrence.

use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::models::event::{EventTemplate, Occurrence};
use crate::store::{DocumentId, DocumentStore, OccurrenceRepository};
use crate::utils::errors::Result;

/// Outcome of the two-phase parent create
#[derive(Debug, Clone)]
pub struct ParentCreation {
    pub id: DocumentId,
    /// False when the self-reference back-fill failed after the create.
    pub linked: bool,
}

/// A successfully created child occurrence
#[derive(Debug, Clone)]
pub struct CreatedChild {
    pub id: DocumentId,
    pub occurrence_number: u32,
}

/// A child occurrence whose creation failed
#[derive(Debug, Clone)]
pub struct FailedChild {
    pub occurrence_number: u32,
    pub date: NaiveDate,
    pub error: String,
}

/// Result of the concurrent child creates
#[derive(Debug, Clone, Default)]
pub struct ChildCreation {
    pub created: Vec<CreatedChild>,
    pub failed: Vec<FailedChild>,
}

pub struct SeriesMaterializer<S> {
    occurrences: OccurrenceRepository<S>,
}

impl<S: DocumentStore> SeriesMaterializer<S> {
    pub fn new(occurrences: OccurrenceRepository<S>) -> Self {
        Self { occurrences }
    }

    /// Create the parent occurrence and back-fill its self-reference.
    ///
    /// A failed create is a hard error (nothing was persisted yet); a failed
    /// back-fill is recorded as `linked = false` and the flow continues,
    /// since children only need the parent's id.
    pub async fn create_parent(
        &self,
        template: &EventTemplate,
        date: NaiveDate,
    ) -> Result<ParentCreation> {
        debug!(organizer_id = %template.organizer_id, date = %date, "Creating parent occurrence");

        let occurrence = Occurrence::from_template(template, date, 1, None);
        let id = self.occurrences.create(&occurrence).await?;

        let linked = match self.occurrences.set_parent_reference(&id, &id).await {
            Ok(()) => true,
            Err(e) => {
                warn!(parent_id = %id, error = %e, "Failed to back-fill parent self-reference");
                false
            }
        };

        info!(parent_id = %id, date = %date, "Parent occurrence created");
        Ok(ParentCreation { id, linked })
    }

    /// Create the remaining occurrences concurrently.
    ///
    /// `dates` are the series dates after the first one; occurrence numbers
    /// continue from the parent's position 1.
    pub async fn create_children(
        &self,
        template: &EventTemplate,
        parent_id: &str,
        dates: &[NaiveDate],
    ) -> ChildCreation {
        debug!(parent_id = parent_id, count = dates.len(), "Creating child occurrences");

        let creates = dates.iter().enumerate().map(|(index, &date)| async move {
            let occurrence_number = (index + 2) as u32;
            let occurrence = Occurrence::from_template(
                template,
                date,
                occurrence_number,
                Some(parent_id.to_string()),
            );
            self.occurrences
                .create(&occurrence)
                .await
                .map(|id| CreatedChild {
                    id,
                    occurrence_number,
                })
                .map_err(|e| FailedChild {
                    occurrence_number,
                    date,
                    error: e.to_string(),
                })
        });

        let mut outcome = ChildCreation::default();
        for result in join_all(creates).await {
            match result {
                Ok(child) => outcome.created.push(child),
                Err(failed) => {
                    warn!(
                        parent_id = parent_id,
                        occurrence_number = failed.occurrence_number,
                        error = %failed.error,
                        "Child occurrence creation failed"
                    );
                    outcome.failed.push(failed);
                }
            }
        }

        info!(
            parent_id = parent_id,
            created = outcome.created.len(),
            failed = outcome.failed.len(),
            "Child occurrence creation finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventMode;
    use crate::store::InMemoryStore;
    use std::sync::Arc;

    fn template() -> EventTemplate {
        EventTemplate {
            name: "Yoga in the Park".to_string(),
            description: "Weekly outdoor yoga".to_string(),
            venue: "Central Green".to_string(),
            mode: EventMode::Offline,
            organizer_id: "org-1".to_string(),
            organizer_name: "Priya".to_string(),
            community_id: None,
            image_ref: None,
            requires_approval: false,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn parent_references_itself_after_creation() {
        let store = Arc::new(InMemoryStore::new());
        let repo = OccurrenceRepository::new(Arc::clone(&store), "events");
        let materializer = SeriesMaterializer::new(repo.clone());

        let parent = materializer
            .create_parent(&template(), date(2025, 4, 7))
            .await
            .unwrap();
        assert!(parent.linked);

        let stored = repo.find_by_id(&parent.id).await.unwrap();
        assert!(stored.occurrence.is_parent);
        assert_eq!(stored.occurrence.occurrence_number, 1);
        assert_eq!(
            stored.occurrence.parent_id.as_deref(),
            Some(parent.id.as_str())
        );
    }

    #[tokio::test]
    async fn children_are_numbered_from_two_and_reference_parent() {
        let store = Arc::new(InMemoryStore::new());
        let repo = OccurrenceRepository::new(Arc::clone(&store), "events");
        let materializer = SeriesMaterializer::new(repo.clone());

        let parent = materializer
            .create_parent(&template(), date(2025, 4, 7))
            .await
            .unwrap();
        let outcome = materializer
            .create_children(
                &template(),
                &parent.id,
                &[date(2025, 4, 14), date(2025, 4, 21)],
            )
            .await;

        assert_eq!(outcome.created.len(), 2);
        assert!(outcome.failed.is_empty());

        for (child, expected_number) in outcome.created.iter().zip([2u32, 3u32]) {
            assert_eq!(child.occurrence_number, expected_number);
            let stored = repo.find_by_id(&child.id).await.unwrap();
            assert!(!stored.occurrence.is_parent);
            assert_eq!(
                stored.occurrence.parent_id.as_deref(),
                Some(parent.id.as_str())
            );
            assert_eq!(stored.occurrence.occurrence_number, expected_number);
        }
    }
}
