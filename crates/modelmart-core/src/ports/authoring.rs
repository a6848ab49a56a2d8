//! Authoring collaborator port.

use super::FetchError;
use crate::domain::{DraftError, FieldError, Model, ModelDraft};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validated model submission ready for the collaborator.
///
/// Unlike [`ModelDraft`], tags are already parsed and every version
/// carries its weights file reference. Build one with
/// [`NewModelSubmission::from_draft`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewModelSubmission {
    pub title: String,
    pub description: String,
    pub provider: String,
    pub tags: Vec<String>,
    pub input_type: String,
    pub output_type: String,
    pub versions: Vec<NewVersionSubmission>,
}

/// One version in a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVersionSubmission {
    pub name: String,
    pub script: String,
    pub weights_file: String,
}

impl NewModelSubmission {
    /// Convert a draft into a submission, trimming fields and parsing
    /// tags.
    ///
    /// Fails if any version lacks a weights file, so an unvalidated
    /// draft can never silently lose versions on the way to the
    /// collaborator. A draft that passed [`ModelDraft::validate`]
    /// always converts.
    pub fn from_draft(draft: &ModelDraft) -> Result<Self, DraftError> {
        let mut errors = Vec::new();
        let mut versions = Vec::with_capacity(draft.versions.len());
        for (i, version) in draft.versions.iter().enumerate() {
            let file = version
                .weights_file
                .as_deref()
                .map(str::trim)
                .filter(|f| !f.is_empty());
            match file {
                Some(file) => versions.push(NewVersionSubmission {
                    name: version.name.trim().to_string(),
                    script: version.script.clone(),
                    weights_file: file.to_string(),
                }),
                None => errors.push(FieldError {
                    field: format!("versions[{i}].weightsFile"),
                    message: "Weights file is required".to_string(),
                }),
            }
        }
        if !errors.is_empty() {
            return Err(DraftError { errors });
        }
        Ok(Self {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            provider: draft.provider.trim().to_string(),
            tags: draft.parsed_tags(),
            input_type: draft.input_type.trim().to_string(),
            output_type: draft.output_type.trim().to_string(),
            versions,
        })
    }
}

/// Errors while deploying a new model.
#[derive(Debug, Clone, Error)]
pub enum AuthoringError {
    /// The draft failed local constraints; nothing was sent.
    #[error(transparent)]
    Validation(#[from] DraftError),

    /// The deploy call failed in transit.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Port for the authoring collaborator.
#[async_trait]
pub trait AuthoringPort: Send + Sync {
    /// List models owned by the authenticated user.
    async fn list_mine(&self) -> Result<Vec<Model>, FetchError>;

    /// Deploy a new model. Returns the created record.
    async fn create(&self, submission: NewModelSubmission) -> Result<Model, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VersionDraft;
    use std::sync::Arc;

    // Verify the trait is object-safe
    fn _assert_object_safe(_: Arc<dyn AuthoringPort>) {}

    #[test]
    fn from_draft_parses_tags_and_trims() {
        let draft = ModelDraft {
            title: " SentimentAnalyze ".to_string(),
            description: "Real-time sentiment monitoring.".to_string(),
            provider: "DataSense".to_string(),
            tags: "Social Media, Analytics , NLP".to_string(),
            input_type: "Text".to_string(),
            output_type: "JSON Report".to_string(),
            versions: vec![VersionDraft {
                name: "v1.0.0".to_string(),
                script: "def analyze(text): ...".to_string(),
                weights_file: Some("weights.bin".to_string()),
            }],
        };
        let submission = NewModelSubmission::from_draft(&draft).unwrap();
        assert_eq!(submission.title, "SentimentAnalyze");
        assert_eq!(submission.tags, vec!["Social Media", "Analytics", "NLP"]);
        assert_eq!(submission.versions.len(), 1);
        assert_eq!(submission.versions[0].weights_file, "weights.bin");
    }

    #[test]
    fn from_draft_rejects_missing_weights_file() {
        let draft = ModelDraft {
            title: "SentimentAnalyze".to_string(),
            description: "Real-time sentiment monitoring.".to_string(),
            provider: "DataSense".to_string(),
            tags: "Analytics".to_string(),
            input_type: "Text".to_string(),
            output_type: "JSON Report".to_string(),
            versions: vec![
                VersionDraft {
                    name: "v1.0.0".to_string(),
                    script: "def analyze(text): ...".to_string(),
                    weights_file: Some("weights.bin".to_string()),
                },
                VersionDraft {
                    name: "v1.1.0".to_string(),
                    script: "def analyze_v2(text): ...".to_string(),
                    weights_file: Some("   ".to_string()),
                },
            ],
        };
        let err = NewModelSubmission::from_draft(&draft).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "versions[1].weightsFile");
    }
}
