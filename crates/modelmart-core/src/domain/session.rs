//! Authenticated identity types.

use serde::{Deserialize, Serialize};

/// The authenticated identity for the current client context.
///
/// Exactly one authoritative copy exists process-wide, held by the
/// session store. Absence means "unauthenticated". Mutation is
/// replace-only; there is no partial patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Stable user id.
    pub uid: String,
    /// Account email, if the provider shared one.
    pub email: Option<String>,
    /// Display name, if set.
    pub display_name: Option<String>,
    /// Avatar URL, if set.
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

impl Session {
    /// Display name with a neutral fallback for UI labels.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or("User")
    }
}
