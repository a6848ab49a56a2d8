//! Fixture-backed authoring adapter.

use async_trait::async_trait;
use chrono::Utc;
use modelmart_core::domain::{Model, Version};
use modelmart_core::ports::{AuthoringPort, FetchError, NewModelSubmission};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;
use uuid::Uuid;

/// Authoring collaborator over the demo identity's models.
///
/// `list_mine` starts from the owned subset of the seed catalog; models
/// created through `create` are appended and reported by later fetches,
/// so the controller's overlay retires as it would against a real
/// backend.
pub struct MockAuthoring {
    mine: Mutex<Vec<Model>>,
    latency: Duration,
}

impl MockAuthoring {
    /// Adapter with UI-visible latency.
    #[must_use]
    pub fn new() -> Self {
        Self::with_latency(Duration::from_millis(600))
    }

    /// Adapter with no simulated latency.
    #[must_use]
    pub fn instant() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    fn with_latency(latency: Duration) -> Self {
        let mine = crate::fixtures::catalog()
            .into_iter()
            .filter(|m| crate::fixtures::OWNED_MODEL_IDS.contains(&m.id.as_str()))
            .collect();
        Self {
            mine: Mutex::new(mine),
            latency,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Model>>, FetchError> {
        self.mine
            .lock()
            .map_err(|_| FetchError::Server("authoring store poisoned".to_string()))
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
    }
}

impl Default for MockAuthoring {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthoringPort for MockAuthoring {
    async fn list_mine(&self) -> Result<Vec<Model>, FetchError> {
        self.simulate_latency().await;
        Ok(self.lock()?.clone())
    }

    async fn create(&self, submission: NewModelSubmission) -> Result<Model, FetchError> {
        self.simulate_latency().await;
        let now = Utc::now();
        let model = Model {
            id: Uuid::new_v4().to_string(),
            title: submission.title,
            description: submission.description,
            provider: submission.provider,
            tags: submission.tags,
            price: 0.0,
            image_url: None,
            features: vec![],
            input_type: submission.input_type,
            output_type: submission.output_type,
            versions: submission
                .versions
                .into_iter()
                .map(|v| Version {
                    id: Uuid::new_v4().to_string(),
                    name: v.name,
                    script: v.script,
                    created_at: now,
                })
                .collect(),
            rating: None,
            review_count: None,
            comments: vec![],
        };
        info!(id = %model.id, title = %model.title, "model created");
        self.lock()?.push(model.clone());
        Ok(model)
    }
}
