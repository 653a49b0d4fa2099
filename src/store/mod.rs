//! Persistence ports
//!
//! The series engine talks to its backend-as-a-service through a generic
//! document store: collections of schemaless documents with store-assigned
//! ids. The trait here is the only seam the core components depend on; the
//! in-memory implementation backs tests and local development.

pub mod memory;
pub mod occurrences;
pub mod profiles;

use serde_json::{Map, Value};

use crate::utils::errors::StoreResult;

pub use memory::InMemoryStore;
pub use occurrences::OccurrenceRepository;
pub use profiles::{ProfileLookup, StaticProfiles, StoreProfiles};

/// Store-assigned document identifier
pub type DocumentId = String;

/// Raw document fields as stored by the backend
pub type FieldMap = Map<String, Value>;

/// A document together with its assigned id
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: FieldMap,
}

/// Field equality predicate for document queries
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    /// Match documents whose `field` equals `value`
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Generic key-collection document store.
///
/// All methods are plain request/response operations against independent
/// documents; the store gives no ordering or transactional guarantees across
/// calls.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Create a document and return its assigned id
    async fn create_document(&self, collection: &str, fields: FieldMap)
        -> StoreResult<DocumentId>;

    /// Merge partial fields into an existing document
    async fn update_document(
        &self,
        collection: &str,
        document_id: &str,
        fields: FieldMap,
    ) -> StoreResult<()>;

    /// Fetch a document by id
    async fn get_document(&self, collection: &str, document_id: &str) -> StoreResult<Document>;

    /// List documents matching every filter
    async fn query_documents(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> StoreResult<Vec<Document>>;
}
