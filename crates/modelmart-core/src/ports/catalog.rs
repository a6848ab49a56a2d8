//! Catalog collaborator port and its DTOs.

use super::FetchError;
use crate::domain::{Comment, Model};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameters for one catalog page fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    /// Substring matched against title and description, case-insensitive.
    /// `None` lists the whole catalog.
    pub search_term: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl ListQuery {
    /// First page with the given page size and no search term.
    #[must_use]
    pub const fn first_page(page_size: u32) -> Self {
        Self {
            search_term: None,
            page: 1,
            page_size,
        }
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Models on this page. At most `page_size` entries.
    pub items: Vec<Model>,
    /// Total number of matches across all pages.
    pub total: u64,
}

/// A review to submit for a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub content: String,
    /// Star rating, 1 through 5.
    pub rating: u8,
}

/// Answer produced by an inference run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceReply {
    /// Generated answer text.
    pub answer: String,
    /// Billing metadata, when the collaborator reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<InferenceUsage>,
}

/// Token and cost accounting for one inference run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceUsage {
    pub tokens: u64,
    pub cost: f64,
}

/// Errors for single-entity catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No model with the requested id exists.
    #[error("model not found: {0}")]
    NotFound(String),

    /// The lookup failed in transit.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Port for the catalog collaborator.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Fetch one page of models matching the query.
    ///
    /// The returned `total` is the full match count; `items` holds at
    /// most `query.page_size` entries.
    async fn list(&self, query: &ListQuery) -> Result<CatalogPage, FetchError>;

    /// Fetch a single model by id.
    async fn get_by_id(&self, id: &str) -> Result<Model, CatalogError>;

    /// Run the model against a prompt and return the answer.
    async fn run_inference(&self, id: &str, prompt: &str) -> Result<InferenceReply, FetchError>;

    /// Attach a review to a model. Returns the stored comment.
    async fn add_review(&self, id: &str, review: NewReview) -> Result<Comment, FetchError>;
}
