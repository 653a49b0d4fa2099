//! In-memory document store
//!
//! Backs tests and local development with the same semantics the engine
//! expects from the managed backend: store-assigned ids, partial-field
//! merges, equality queries over insertion-ordered collections.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{Document, DocumentId, DocumentStore, FieldMap, Filter};
use crate::utils::errors::{StoreError, StoreResult};

/// In-memory `DocumentStore` implementation
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection
    pub async fn collection_len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }
}

fn matches(document: &Document, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|filter| document.fields.get(&filter.field) == Some(&filter.value))
}

impl DocumentStore for InMemoryStore {
    async fn create_document(
        &self,
        collection: &str,
        fields: FieldMap,
    ) -> StoreResult<DocumentId> {
        let id = Uuid::new_v4().to_string();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });
        Ok(id)
    }

    async fn update_document(
        &self,
        collection: &str,
        document_id: &str,
        fields: FieldMap,
    ) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == document_id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                document_id: document_id.to_string(),
            })?;
        for (key, value) in fields {
            document.fields.insert(key, value);
        }
        Ok(())
    }

    async fn get_document(&self, collection: &str, document_id: &str) -> StoreResult<Document> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == document_id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                document_id: document_id.to_string(),
            })
    }

    async fn query_documents(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
