//! Login/logout orchestration.

use super::store::SessionStore;
use crate::domain::Session;
use crate::ports::{AuthError, AuthPort, AuthProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Bound on a single auth collaborator call.
const AUTH_TIMEOUT: Duration = Duration::from_secs(15);

/// Wires the auth collaborator to the session store.
///
/// Login persists the provider-issued session and broadcasts; logout
/// clears the slot and broadcasts. Navigation to the saved or default
/// path afterwards is the caller's job (see [`super::gate`]).
pub struct AuthFlow {
    port: Arc<dyn AuthPort>,
    store: Arc<SessionStore>,
}

impl AuthFlow {
    /// Create a flow over the given collaborator and store.
    pub fn new(port: Arc<dyn AuthPort>, store: Arc<SessionStore>) -> Self {
        Self { port, store }
    }

    /// Sign in with a provider and make the session authoritative.
    pub async fn login(&self, provider: AuthProvider) -> Result<Session, AuthError> {
        let session = tokio::time::timeout(AUTH_TIMEOUT, self.port.login_with(provider))
            .await
            .map_err(|_| AuthError::Network("login timed out".to_string()))??;
        self.store
            .set(session.clone())
            .map_err(|err| AuthError::Storage(err.to_string()))?;
        info!(%provider, uid = %session.uid, "signed in");
        Ok(session)
    }

    /// Sign out and clear the session store.
    ///
    /// The store is cleared even if the collaborator call fails: a
    /// failed logout must not leave the client believing it is still
    /// signed in.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let result = tokio::time::timeout(AUTH_TIMEOUT, self.port.logout())
            .await
            .unwrap_or_else(|_| Err(AuthError::Network("logout timed out".to_string())));
        self.store.force_clear();
        info!("signed out");
        result
    }
}
