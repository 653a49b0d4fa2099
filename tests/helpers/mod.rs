//! Shared test infrastructure
//!
//! Fixtures and fault-injecting store wrappers used by the integration
//! tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

use gatherly::models::{EventMode, EventTemplate};
use gatherly::store::{Document, DocumentId, DocumentStore, FieldMap, Filter, InMemoryStore};
use gatherly::utils::errors::{StoreError, StoreResult};
use gatherly::ProfileLookup;

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

/// A standard event template for tests
pub fn template(organizer_id: &str, requires_approval: bool) -> EventTemplate {
    EventTemplate {
        name: "Neighborhood Cleanup".to_string(),
        description: "Monthly park cleanup".to_string(),
        venue: "Harbor Park".to_string(),
        mode: EventMode::Offline,
        organizer_id: organizer_id.to_string(),
        organizer_name: "Jordan".to_string(),
        community_id: Some("community-1".to_string()),
        image_ref: None,
        requires_approval,
    }
}

/// Document store wrapper that injects failures into selected operations
pub struct FlakyStore {
    inner: InMemoryStore,
    /// Creates allowed before every further create fails; `None` disables.
    fail_creates_after: Option<usize>,
    creates: AtomicUsize,
    fail_queries: bool,
}

impl FlakyStore {
    pub fn reliable() -> Self {
        Self {
            inner: InMemoryStore::new(),
            fail_creates_after: None,
            creates: AtomicUsize::new(0),
            fail_queries: false,
        }
    }

    pub fn failing_creates_after(limit: usize) -> Self {
        Self {
            fail_creates_after: Some(limit),
            ..Self::reliable()
        }
    }

    pub fn failing_queries() -> Self {
        Self {
            fail_queries: true,
            ..Self::reliable()
        }
    }

    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }
}

impl DocumentStore for FlakyStore {
    async fn create_document(
        &self,
        collection: &str,
        fields: FieldMap,
    ) -> StoreResult<DocumentId> {
        let n = self.creates.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_creates_after {
            if n >= limit {
                return Err(StoreError::Backend("simulated create failure".to_string()));
            }
        }
        self.inner.create_document(collection, fields).await
    }

    async fn update_document(
        &self,
        collection: &str,
        document_id: &str,
        fields: FieldMap,
    ) -> StoreResult<()> {
        self.inner
            .update_document(collection, document_id, fields)
            .await
    }

    async fn get_document(&self, collection: &str, document_id: &str) -> StoreResult<Document> {
        self.inner.get_document(collection, document_id).await
    }

    async fn query_documents(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> StoreResult<Vec<Document>> {
        if self.fail_queries {
            return Err(StoreError::Backend("simulated query failure".to_string()));
        }
        self.inner.query_documents(collection, filters).await
    }
}

/// Profile lookup whose every call fails
pub struct FailingProfiles;

impl ProfileLookup for FailingProfiles {
    async fn profile(&self, _user_id: &str) -> StoreResult<Option<gatherly::models::UserProfile>> {
        Err(StoreError::Backend("simulated profile outage".to_string()))
    }
}
