//! Marketplace model domain types.
//!
//! These types represent catalog entries as the client sees them,
//! independent of any transport or storage concerns. Field names
//! serialize in camelCase to match the marketplace wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published model in the marketplace catalog.
///
/// Invariant: when `comments` is non-empty, `review_count` equals its
/// length and `rating` is the running average of all comment ratings.
/// The invariant is maintained incrementally by [`Model::apply_review`],
/// never recomputed from scratch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Catalog identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Long-form description shown on the detail page.
    pub description: String,
    /// Publishing organization or author.
    pub provider: String,
    /// Ordered tag list for filtering and display.
    pub tags: Vec<String>,
    /// Price per request in USD.
    pub price: f64,
    /// Cover image, if the publisher supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Marketing feature bullets.
    #[serde(default)]
    pub features: Vec<String>,
    /// Accepted input formats (free text, e.g. "PDF, TXT, DOCX").
    pub input_type: String,
    /// Produced output formats.
    pub output_type: String,
    /// Published versions, oldest first. Never empty for a valid model;
    /// the first element is the default selection.
    pub versions: Vec<Version>,
    /// Aggregate rating in `[0, 5]`, absent until the first review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of reviews backing `rating`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    /// Reviews, newest first.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A single published version of a model. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    /// Version identifier, unique within the model.
    pub id: String,
    /// Human-readable version name (e.g. "v1.2.0-stable").
    pub name: String,
    /// Inference script body.
    pub script: String,
    /// Publication timestamp.
    pub created_at: DateTime<Utc>,
}

/// A user review attached to a model. Append-only from the client's view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Review identifier.
    pub id: String,
    /// Authoring user id.
    pub user_id: String,
    /// Display name at submission time.
    pub user_name: String,
    /// Avatar URL at submission time.
    pub user_avatar: String,
    /// Review text.
    pub content: String,
    /// Star rating, 1 through 5.
    pub rating: u8,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

impl Model {
    /// The version shown when the user has not picked one.
    #[must_use]
    pub fn default_version(&self) -> Option<&Version> {
        self.versions.first()
    }

    /// Look up a version by id.
    #[must_use]
    pub fn version(&self, version_id: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.id == version_id)
    }

    /// Fold a new review into the aggregate as a single state change.
    ///
    /// Prepends the comment, bumps `review_count`, and updates `rating`
    /// with the running-average formula
    /// `(old_rating * old_count + rating) / (old_count + 1)`. There is
    /// no intermediate state where count and rating disagree.
    pub fn apply_review(&mut self, comment: Comment) {
        let old_count = self.review_count.unwrap_or(0);
        let old_rating = self.rating.unwrap_or(0.0);
        let submitted = f64::from(comment.rating);

        self.rating =
            Some((old_rating * f64::from(old_count) + submitted) / f64::from(old_count + 1));
        self.review_count = Some(old_count + 1);
        self.comments.insert(0, comment);
    }
}
