//! User profile lookup port
//!
//! Profiles live with the external identity collaborator; the series engine
//! only ever reads them, and treats every lookup as best-effort.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::models::user::UserProfile;
use crate::store::{DocumentStore, Filter};
use crate::utils::errors::StoreResult;

/// Read-only access to user profiles
#[allow(async_fn_in_trait)]
pub trait ProfileLookup {
    /// Fetch a profile by user id; `None` when the user has no profile
    async fn profile(&self, user_id: &str) -> StoreResult<Option<UserProfile>>;
}

/// Fixed profile directory for tests and local development
#[derive(Debug, Clone, Default)]
pub struct StaticProfiles {
    profiles: HashMap<String, UserProfile>,
}

impl StaticProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile to the directory
    pub fn with_profile(
        mut self,
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.profiles.insert(
            user_id.into(),
            UserProfile {
                display_name: display_name.into(),
                email: email.into(),
            },
        );
        self
    }
}

impl ProfileLookup for StaticProfiles {
    async fn profile(&self, user_id: &str) -> StoreResult<Option<UserProfile>> {
        Ok(self.profiles.get(user_id).cloned())
    }
}

/// Profile lookup backed by the document store's profile collection.
///
/// Profile documents carry a `userId` field; a missing document resolves to
/// `None` rather than an error.
pub struct StoreProfiles<S> {
    store: Arc<S>,
    collection: String,
}

impl<S> StoreProfiles<S> {
    pub fn new(store: Arc<S>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }
}

impl<S: DocumentStore> ProfileLookup for StoreProfiles<S> {
    async fn profile(&self, user_id: &str) -> StoreResult<Option<UserProfile>> {
        let documents = self
            .store
            .query_documents(&self.collection, &[Filter::eq("userId", user_id)])
            .await?;
        match documents.into_iter().next() {
            Some(document) => {
                let profile = serde_json::from_value(Value::Object(document.fields))?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }
}
