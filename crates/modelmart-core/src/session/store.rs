//! Process-wide session store.
//!
//! The store owns the single authoritative copy of the authenticated
//! identity. All writes are full replacements, serialized by the caller's
//! event loop, and every write is followed by a broadcast so all
//! subscribers observe a consistent value.

use crate::domain::Session;
use crate::ports::{SessionStorage, StorageError};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Holds the current session, persists it to the storage slot, and
/// notifies subscribers on every change.
///
/// [`SessionStore::open`] performs exactly one synchronous load before
/// returning, so a constructed store is always "ready": consumers never
/// observe a flash of incorrect auth state.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    tx: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// Open the store, loading the persisted slot once.
    pub fn open(storage: Arc<dyn SessionStorage>) -> Result<Self, StorageError> {
        let initial = storage.load()?;
        let (tx, _rx) = watch::channel(initial);
        Ok(Self { storage, tx })
    }

    /// Current session, if authenticated.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// True when a session is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Replace the session: persist, then broadcast.
    pub fn set(&self, session: Session) -> Result<(), StorageError> {
        self.storage.store(&session)?;
        debug!(uid = %session.uid, "session replaced");
        self.tx.send_replace(Some(session));
        Ok(())
    }

    /// Remove the session: clear the slot, then broadcast.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.clear()?;
        debug!("session cleared");
        self.tx.send_replace(None);
        Ok(())
    }

    /// Clear after a 401-class response.
    ///
    /// The in-memory session and the broadcast must happen even if the
    /// slot write fails, so the auth gate redirects on next navigation.
    pub fn force_clear(&self) {
        if let Err(err) = self.storage.clear() {
            warn!(%err, "session slot clear failed during forced sign-out");
        }
        self.tx.send_replace(None);
    }

    /// Re-read the slot and broadcast if it changed.
    ///
    /// This is the best-effort cross-instance signal entry point: another
    /// open instance that rewrote the slot is picked up here.
    pub fn refresh(&self) -> Result<(), StorageError> {
        let loaded = self.storage.load()?;
        self.tx.send_if_modified(|current| {
            if *current == loaded {
                false
            } else {
                *current = loaded;
                true
            }
        });
        Ok(())
    }

    /// Subscribe to session changes.
    ///
    /// Each receiver is independent; dropping it unsubscribes. The
    /// receiver starts with the current value already marked seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}
