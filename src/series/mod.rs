//! Recurring series creation pipeline
//!
//! This module contains the core components of the engine and the service
//! that wires them together: date generation, occurrence materialization,
//! returning-participant resolution and registration fan-out.
//!
//! The pipeline is deliberately non-transactional: the parent occurrence is
//! durably created before any child, children and profile lookups run
//! concurrently, and every downstream failure is collected into the
//! creation report instead of aborting the flow. Only validation failures
//! stop the operation before side effects.

pub mod dates;
pub mod fanout;
pub mod materializer;
pub mod returning;

pub use dates::{OccurrenceDates, MAX_SERIES_OCCURRENCES};
pub use fanout::{FanoutFailure, FanoutOutcome, RegistrationFanoutWriter};
pub use materializer::{
    ChildCreation, CreatedChild, FailedChild, ParentCreation, SeriesMaterializer,
};
pub use returning::{Resolution, ReturningParticipantResolver};

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Settings;
use crate::models::event::EventTemplate;
use crate::models::recurrence::RecurrenceRule;
use crate::store::{DocumentId, DocumentStore, OccurrenceRepository, ProfileLookup};
use crate::utils::errors::{GatherlyError, Result};
use crate::utils::logging;

/// Structured outcome of a series creation.
///
/// The organizer is always told how many occurrences were actually created,
/// even on partial failure, so they can decide whether to retry or clean up.
#[derive(Debug, Clone)]
pub struct SeriesCreationReport {
    pub parent_id: DocumentId,
    /// False when the parent's self-reference back-fill failed.
    pub parent_linked: bool,
    /// Occurrences the rule asked for (after capping).
    pub requested_occurrences: usize,
    /// Occurrences actually created, parent included.
    pub created_occurrences: usize,
    pub child_ids: Vec<DocumentId>,
    pub failed_children: Vec<FailedChild>,
    /// Auto-registrations carried into the series.
    pub auto_registrations: usize,
    /// Degradation warnings (resolution, parent linking).
    pub warnings: Vec<String>,
    pub fanout_failures: Vec<FanoutFailure>,
}

impl SeriesCreationReport {
    /// True when every step of the pipeline fully succeeded
    pub fn is_complete(&self) -> bool {
        self.parent_linked
            && self.failed_children.is_empty()
            && self.fanout_failures.is_empty()
            && self.warnings.is_empty()
    }

    /// Ids of every created occurrence, parent first
    pub fn occurrence_ids(&self) -> Vec<DocumentId> {
        let mut ids = Vec::with_capacity(1 + self.child_ids.len());
        ids.push(self.parent_id.clone());
        ids.extend(self.child_ids.iter().cloned());
        ids
    }
}

/// Series creation service orchestrating the full pipeline
pub struct SeriesService<S, P> {
    materializer: SeriesMaterializer<S>,
    resolver: ReturningParticipantResolver<S, P>,
    fanout: RegistrationFanoutWriter<S>,
    settings: Settings,
}

impl<S: DocumentStore, P: ProfileLookup> SeriesService<S, P> {
    /// Create a new SeriesService over a document store and profile lookup
    pub fn new(store: Arc<S>, profiles: Arc<P>, settings: Settings) -> Self {
        let occurrences =
            OccurrenceRepository::new(store, settings.store.events_collection.clone());
        Self {
            materializer: SeriesMaterializer::new(occurrences.clone()),
            resolver: ReturningParticipantResolver::new(occurrences.clone(), profiles),
            fanout: RegistrationFanoutWriter::new(occurrences),
            settings,
        }
    }

    /// Create a recurring series from a template and a frozen rule.
    ///
    /// Validation failures return an error before anything is persisted.
    /// After the parent is committed, the flow continues as far as possible
    /// and reports partial failures in the returned structure.
    pub async fn create_series(
        &self,
        template: &EventTemplate,
        rule: &RecurrenceRule,
    ) -> Result<SeriesCreationReport> {
        template.validate()?;
        rule.validate()?;

        let cap = (self.settings.series.max_occurrences as usize).min(MAX_SERIES_OCCURRENCES);
        let dates: Vec<_> = rule.dates().take(cap).collect();
        let Some((&first_date, remaining_dates)) = dates.split_first() else {
            return Err(GatherlyError::Validation(
                "Recurrence rule generates no occurrences".to_string(),
            ));
        };

        debug!(
            organizer_id = %template.organizer_id,
            occurrences = dates.len(),
            "Starting series creation"
        );

        let parent = self.materializer.create_parent(template, first_date).await?;

        // History resolution only reads prior series; it can run alongside
        // the child creates.
        let (resolution, children) = if self.settings.series.auto_registration {
            tokio::join!(
                self.resolver.resolve(&template.organizer_id),
                self.materializer
                    .create_children(template, &parent.id, remaining_dates)
            )
        } else {
            (
                Resolution::default(),
                self.materializer
                    .create_children(template, &parent.id, remaining_dates)
                    .await,
            )
        };

        let mut occurrence_ids = vec![parent.id.clone()];
        occurrence_ids.extend(children.created.iter().map(|child| child.id.clone()));

        let fanout = self
            .fanout
            .apply(&occurrence_ids, &resolution.registrations)
            .await;

        let mut warnings = resolution.warnings();
        if !parent.linked {
            warnings.push(
                "Parent occurrence created but its self-reference could not be set".to_string(),
            );
        }

        let report = SeriesCreationReport {
            parent_id: parent.id,
            parent_linked: parent.linked,
            requested_occurrences: dates.len(),
            created_occurrences: 1 + children.created.len(),
            child_ids: children.created.iter().map(|child| child.id.clone()).collect(),
            failed_children: children.failed,
            auto_registrations: resolution.registrations.len(),
            warnings,
            fanout_failures: fanout.failures,
        };

        logging::log_series_created(
            &report.parent_id,
            report.created_occurrences,
            report.requested_occurrences,
            &template.organizer_id,
        );
        if !report.is_complete() {
            info!(
                parent_id = %report.parent_id,
                failed_children = report.failed_children.len(),
                fanout_failures = report.fanout_failures.len(),
                warnings = report.warnings.len(),
                "Series created with partial results"
            );
        }

        Ok(report)
    }
}
