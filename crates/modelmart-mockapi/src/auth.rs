//! Fixture-backed auth adapter.
//!
//! Every provider signs in the same demo account; only the display name
//! varies, mirroring how the provider would report it.

use crate::fixtures;
use async_trait::async_trait;
use modelmart_core::domain::Session;
use modelmart_core::ports::{AuthError, AuthPort, AuthProvider};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Auth collaborator that always accepts.
pub struct MockAuth {
    latency: Duration,
}

impl MockAuth {
    /// Adapter with UI-visible latency on login.
    #[must_use]
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(800),
        }
    }

    /// Adapter with no simulated latency.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }
}

impl Default for MockAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthPort for MockAuth {
    async fn login_with(&self, provider: AuthProvider) -> Result<Session, AuthError> {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        let display_name = match provider {
            AuthProvider::Google => "Demo User",
            AuthProvider::Github => "Github User",
            AuthProvider::Facebook => "Facebook User",
        };
        debug!(%provider, "issuing demo session");
        Ok(fixtures::demo_session(display_name))
    }

    async fn logout(&self) -> Result<(), AuthError> {
        if !self.latency.is_zero() {
            sleep(self.latency / 2).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn providers_share_the_account_but_not_the_name() {
        let auth = MockAuth::instant();
        let google = auth.login_with(AuthProvider::Google).await.unwrap();
        let github = auth.login_with(AuthProvider::Github).await.unwrap();

        assert_eq!(google.uid, github.uid);
        assert_eq!(google.display_name.as_deref(), Some("Demo User"));
        assert_eq!(github.display_name.as_deref(), Some("Github User"));
        assert_eq!(google.email.as_deref(), Some(fixtures::DEMO_EMAIL));
    }
}
