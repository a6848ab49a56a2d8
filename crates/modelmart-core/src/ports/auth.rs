//! Authentication collaborator port.

use crate::domain::Session;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Supported identity providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Google,
    Github,
    Facebook,
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Google => "google",
            Self::Github => "github",
            Self::Facebook => "facebook",
        };
        f.write_str(name)
    }
}

/// Errors during login or logout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The provider rejected the sign-in attempt.
    #[error("{0} rejected the sign-in")]
    Rejected(AuthProvider),

    /// Network failure during login or logout.
    #[error("network error: {0}")]
    Network(String),

    /// The session slot could not be written after a successful login.
    #[error("session storage error: {0}")]
    Storage(String),
}

/// Port for the authentication collaborator.
///
/// Implementations perform the provider handshake; persisting the
/// resulting session is the session store's job, not the port's.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Sign in with the given provider and return the resulting session.
    async fn login_with(&self, provider: AuthProvider) -> Result<Session, AuthError>;

    /// Sign out on the collaborator side.
    async fn logout(&self) -> Result<(), AuthError>;
}
