//! Occurrence repository implementation
//!
//! Typed access to the occurrence collection on top of the generic
//! document-store port.

use std::sync::Arc;

use serde_json::Value;

use crate::models::event::{Occurrence, StoredOccurrence};
use crate::models::registration::{PendingRegistration, Registration};
use crate::store::{Document, DocumentId, DocumentStore, FieldMap, Filter};
use crate::utils::errors::{StoreError, StoreResult};

pub struct OccurrenceRepository<S> {
    store: Arc<S>,
    collection: String,
}

impl<S> Clone for OccurrenceRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            collection: self.collection.clone(),
        }
    }
}

impl<S: DocumentStore> OccurrenceRepository<S> {
    pub fn new(store: Arc<S>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Persist a new occurrence and return its assigned id
    pub async fn create(&self, occurrence: &Occurrence) -> StoreResult<DocumentId> {
        let fields = occurrence_fields(occurrence)?;
        self.store.create_document(&self.collection, fields).await
    }

    /// Back-fill an occurrence's parent reference
    pub async fn set_parent_reference(
        &self,
        document_id: &str,
        parent_id: &str,
    ) -> StoreResult<()> {
        let mut fields = FieldMap::new();
        fields.insert("parentId".to_string(), Value::String(parent_id.to_string()));
        self.store
            .update_document(&self.collection, document_id, fields)
            .await
    }

    /// Fetch an occurrence by id
    pub async fn find_by_id(&self, document_id: &str) -> StoreResult<StoredOccurrence> {
        let document = self
            .store
            .get_document(&self.collection, document_id)
            .await?;
        occurrence_from_document(document)
    }

    /// Replace an occurrence's approved registration list
    pub async fn replace_registrations(
        &self,
        document_id: &str,
        registrations: &[Registration],
    ) -> StoreResult<()> {
        let mut fields = FieldMap::new();
        fields.insert(
            "registrations".to_string(),
            serde_json::to_value(registrations)?,
        );
        self.store
            .update_document(&self.collection, document_id, fields)
            .await
    }

    /// Replace an occurrence's pending registration list
    pub async fn replace_pending_registrations(
        &self,
        document_id: &str,
        pending: &[PendingRegistration],
    ) -> StoreResult<()> {
        let mut fields = FieldMap::new();
        fields.insert(
            "pendingRegistrations".to_string(),
            serde_json::to_value(pending)?,
        );
        self.store
            .update_document(&self.collection, document_id, fields)
            .await
    }

    /// List all recurring occurrences created by an organizer
    pub async fn find_recurring_by_organizer(
        &self,
        organizer_id: &str,
    ) -> StoreResult<Vec<StoredOccurrence>> {
        let documents = self
            .store
            .query_documents(
                &self.collection,
                &[
                    Filter::eq("organizerId", organizer_id),
                    Filter::eq("recurring", true),
                ],
            )
            .await?;
        documents.into_iter().map(occurrence_from_document).collect()
    }
}

fn occurrence_fields(occurrence: &Occurrence) -> StoreResult<FieldMap> {
    match serde_json::to_value(occurrence)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::Backend(format!(
            "occurrence serialized to non-object value: {}",
            other
        ))),
    }
}

fn occurrence_from_document(document: Document) -> StoreResult<StoredOccurrence> {
    let occurrence: Occurrence = serde_json::from_value(Value::Object(document.fields))?;
    Ok(StoredOccurrence {
        id: document.id,
        occurrence,
    })
}
