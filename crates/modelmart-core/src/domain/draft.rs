//! Authoring drafts and local validation.
//!
//! Validation failures are resolved locally and surfaced per-field;
//! a draft that fails validation is never sent to a collaborator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum length for a model title.
const MIN_TITLE_LEN: usize = 2;
/// Minimum length for a model description.
const MIN_DESCRIPTION_LEN: usize = 10;
/// Minimum length for a provider name.
const MIN_PROVIDER_LEN: usize = 2;
/// Minimum length for a version name.
const MIN_VERSION_NAME_LEN: usize = 2;

/// A model draft as entered in the deploy form.
///
/// `tags` is the raw comma-separated field; [`ModelDraft::parsed_tags`]
/// yields the trimmed, non-empty entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDraft {
    pub title: String,
    pub description: String,
    pub provider: String,
    /// Comma-separated tag field, e.g. "NLP, Healthcare, Python".
    pub tags: String,
    pub input_type: String,
    pub output_type: String,
    pub versions: Vec<VersionDraft>,
}

/// One version entry in a draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDraft {
    /// Version name, e.g. "v1.0.0".
    pub name: String,
    /// Inference script body.
    pub script: String,
    /// Reference to the uploaded weights file.
    pub weights_file: Option<String>,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path of the failing field, e.g. "title" or "versions[1].script".
    pub field: String,
    /// User-presentable message.
    pub message: String,
}

/// Validation failure for a whole draft.
#[derive(Debug, Clone, Error)]
#[error("draft validation failed with {} error(s)", errors.len())]
pub struct DraftError {
    /// All field failures, in form order.
    pub errors: Vec<FieldError>,
}

impl ModelDraft {
    /// Trimmed, non-empty tags parsed from the comma-separated field.
    #[must_use]
    pub fn parsed_tags(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// Validate the draft against the authoring constraints.
    ///
    /// Collects every failure rather than stopping at the first, so the
    /// form can annotate all offending fields at once.
    pub fn validate(&self) -> Result<(), DraftError> {
        let mut errors = Vec::new();
        let mut fail = |field: &str, message: &str| {
            errors.push(FieldError {
                field: field.to_string(),
                message: message.to_string(),
            });
        };

        if self.title.trim().len() < MIN_TITLE_LEN {
            fail("title", "Title must be at least 2 characters");
        }
        if self.description.trim().len() < MIN_DESCRIPTION_LEN {
            fail("description", "Description must be at least 10 characters");
        }
        if self.provider.trim().len() < MIN_PROVIDER_LEN {
            fail("provider", "Provider must be at least 2 characters");
        }
        if self.parsed_tags().is_empty() {
            fail("tags", "At least one tag is required");
        }
        if self.input_type.trim().is_empty() {
            fail("inputType", "Input type is required");
        }
        if self.output_type.trim().is_empty() {
            fail("outputType", "Output type is required");
        }

        if self.versions.is_empty() {
            fail("versions", "At least one version is required");
        }
        for (i, version) in self.versions.iter().enumerate() {
            if version.name.trim().len() < MIN_VERSION_NAME_LEN {
                fail(
                    &format!("versions[{i}].name"),
                    "Version name is required (e.g. v1.0.0)",
                );
            }
            if version.script.trim().is_empty() {
                fail(
                    &format!("versions[{i}].script"),
                    "Inference script is required",
                );
            }
            if version
                .weights_file
                .as_deref()
                .is_none_or(|f| f.trim().is_empty())
            {
                fail(&format!("versions[{i}].weightsFile"), "Weights file is required");
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DraftError { errors })
        }
    }
}
