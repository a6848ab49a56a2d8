//! User profile collaborator port.
//!
//! Thin CRUD boundary; the core only defines the seam. Profile screens
//! call it directly without controller-level state machinery.

use super::FetchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The authenticated user's profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub display_name: String,
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Partial profile update; unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Port for the profile collaborator.
#[async_trait]
pub trait ProfilePort: Send + Sync {
    /// Fetch the authenticated user's profile.
    async fn get_profile(&self) -> Result<UserProfile, FetchError>;

    /// Apply a partial update and return the merged profile.
    async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile, FetchError>;
}
