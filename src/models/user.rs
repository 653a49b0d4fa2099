//! User profile model
//!
//! Profiles come from the external user-profile collaborator; only the
//! fields the series engine needs are modeled here.

use serde::{Deserialize, Serialize};

/// A user profile as returned by the profile lookup collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub display_name: String,
    pub email: String,
}
