//! Fixture-backed profile adapter.

use crate::fixtures;
use async_trait::async_trait;
use modelmart_core::ports::{FetchError, ProfilePort, ProfileUpdate, UserProfile};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;

/// Profile collaborator for the demo identity.
pub struct MockProfile {
    profile: Mutex<UserProfile>,
    latency: Duration,
}

impl MockProfile {
    /// Adapter with UI-visible latency.
    #[must_use]
    pub fn new() -> Self {
        Self::with_latency(Duration::from_millis(500))
    }

    /// Adapter with no simulated latency.
    #[must_use]
    pub fn instant() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    fn with_latency(latency: Duration) -> Self {
        Self {
            profile: Mutex::new(UserProfile {
                id: fixtures::DEMO_UID.to_string(),
                email: fixtures::DEMO_EMAIL.to_string(),
                display_name: "Demo User".to_string(),
                photo_url: Some(fixtures::DEMO_AVATAR.to_string()),
            }),
            latency,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, UserProfile>, FetchError> {
        self.profile
            .lock()
            .map_err(|_| FetchError::Server("profile store poisoned".to_string()))
    }
}

impl Default for MockProfile {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfilePort for MockProfile {
    async fn get_profile(&self) -> Result<UserProfile, FetchError> {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        Ok(self.lock()?.clone())
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile, FetchError> {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        let mut profile = self.lock()?;
        if let Some(display_name) = update.display_name {
            profile.display_name = display_name;
        }
        if let Some(photo_url) = update.photo_url {
            profile.photo_url = Some(photo_url);
        }
        Ok(profile.clone())
    }
}
