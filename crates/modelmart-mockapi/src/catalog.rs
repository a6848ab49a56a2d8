//! Fixture-backed catalog adapter.

use async_trait::async_trait;
use chrono::Utc;
use modelmart_core::domain::{Comment, Model};
use modelmart_core::ports::{
    CatalogError, CatalogPage, CatalogPort, FetchError, InferenceReply, ListQuery, NewReview,
};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;
use uuid::Uuid;

/// In-memory catalog over the seed fixtures.
///
/// Reviews mutate the shared store, so a model re-fetched after
/// `add_review` carries the updated aggregate. Latency is simulated per
/// call to exercise loading states; construct with [`MockCatalog::instant`]
/// in tests that drive virtual time themselves.
pub struct MockCatalog {
    models: Mutex<Vec<Model>>,
    latency: Duration,
}

impl MockCatalog {
    /// Catalog over the seed fixtures with UI-visible latency.
    #[must_use]
    pub fn new() -> Self {
        Self::with_latency(Duration::from_millis(800))
    }

    /// Catalog with no simulated latency.
    #[must_use]
    pub fn instant() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// Catalog with the given per-call latency.
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            models: Mutex::new(crate::fixtures::catalog()),
            latency,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Model>>, FetchError> {
        self.models
            .lock()
            .map_err(|_| FetchError::Server("catalog store poisoned".to_string()))
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogPort for MockCatalog {
    async fn list(&self, query: &ListQuery) -> Result<CatalogPage, FetchError> {
        self.simulate_latency().await;
        let models = self.lock()?;
        let matched: Vec<&Model> = models
            .iter()
            .filter(|m| {
                query.search_term.as_ref().is_none_or(|term| {
                    let term = term.to_lowercase();
                    m.title.to_lowercase().contains(&term)
                        || m.description.to_lowercase().contains(&term)
                })
            })
            .collect();
        let total = matched.len() as u64;
        let start = query.page.saturating_sub(1) as usize * query.page_size as usize;
        let items = matched
            .into_iter()
            .skip(start)
            .take(query.page_size as usize)
            .cloned()
            .collect();
        debug!(page = query.page, total, "catalog page served");
        Ok(CatalogPage { items, total })
    }

    async fn get_by_id(&self, id: &str) -> Result<Model, CatalogError> {
        self.simulate_latency().await;
        let models = self.lock().map_err(CatalogError::Fetch)?;
        models
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    async fn run_inference(&self, id: &str, prompt: &str) -> Result<InferenceReply, FetchError> {
        self.simulate_latency().await;
        if self.lock()?.iter().all(|m| m.id != id) {
            return Err(FetchError::Server(format!("unknown model: {id}")));
        }
        Ok(InferenceReply {
            answer: format!(
                "[Mock Inference Output for {id}]\n\nBased on your prompt: \
                 \"{prompt}\"\n\nThis is a simulated response generated by the \
                 fixture catalog. A real deployment would return the model's \
                 actual output here."
            ),
            usage: None,
        })
    }

    async fn add_review(&self, id: &str, review: NewReview) -> Result<Comment, FetchError> {
        self.simulate_latency().await;
        let mut models = self.lock()?;
        let model = models
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| FetchError::Server(format!("unknown model: {id}")))?;
        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            user_id: review.user_id,
            user_name: review.user_name,
            user_avatar: review.user_avatar,
            content: review.content,
            rating: review.rating,
            created_at: Utc::now(),
        };
        model.apply_review(comment.clone());
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_matches_title_and_description_case_insensitive() {
        let catalog = MockCatalog::instant();
        let page = catalog
            .list(&ListQuery {
                search_term: Some("legal".to_string()),
                page: 1,
                page_size: 6,
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "LegalSummarizer Pro");

        // "transformer" appears only in descriptions.
        let page = catalog
            .list(&ListQuery {
                search_term: Some("TRANSFORMER".to_string()),
                page: 1,
                page_size: 6,
            })
            .await
            .unwrap();
        assert!(page.total >= 1);
    }

    #[tokio::test]
    async fn pagination_slices_and_reports_full_total() {
        let catalog = MockCatalog::instant();
        let first = catalog.list(&ListQuery::first_page(6)).await.unwrap();
        assert_eq!(first.total, 12);
        assert_eq!(first.items.len(), 6);
        assert_eq!(first.items[0].id, "1");

        let second = catalog
            .list(&ListQuery {
                search_term: None,
                page: 2,
                page_size: 6,
            })
            .await
            .unwrap();
        assert_eq!(second.total, 12);
        assert_eq!(second.items[0].id, "7");

        let past_end = catalog
            .list(&ListQuery {
                search_term: None,
                page: 5,
                page_size: 6,
            })
            .await
            .unwrap();
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total, 12);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let catalog = MockCatalog::instant();
        let err = catalog.get_by_id("999").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(id) if id == "999"));
    }

    #[tokio::test]
    async fn review_persists_across_fetches() {
        let catalog = MockCatalog::instant();
        let review = NewReview {
            user_id: "u-1".to_string(),
            user_name: "Demo User".to_string(),
            user_avatar: String::new(),
            content: "Excellent summaries".to_string(),
            rating: 5,
        };
        catalog.add_review("1", review).await.unwrap();

        let model = catalog.get_by_id("1").await.unwrap();
        assert_eq!(model.review_count, Some(1));
        assert_eq!(model.rating, Some(5.0));
        assert_eq!(model.comments[0].content, "Excellent summaries");
    }

    #[tokio::test]
    async fn inference_echoes_the_prompt() {
        let catalog = MockCatalog::instant();
        let reply = catalog.run_inference("3", "optimize my loop").await.unwrap();
        assert!(reply.answer.contains("optimize my loop"));
        assert!(reply.answer.contains("Mock Inference Output for 3"));
    }
}
