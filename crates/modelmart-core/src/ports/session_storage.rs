//! Persisted session slot.
//!
//! The session store keeps exactly one storage slot holding the
//! serialized [`Session`], or nothing when unauthenticated. The slot is
//! synchronous by contract (a localStorage analogue); adapters that
//! need real I/O keep it cheap and local.

use crate::domain::Session;
use std::sync::Mutex;
use thiserror::Error;

/// Errors from the session slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The slot could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// The slot contents could not be deserialized.
    #[error("corrupt session slot: {0}")]
    Corrupt(String),
}

/// Single-slot persistence for the session.
pub trait SessionStorage: Send + Sync {
    /// Read the slot. `Ok(None)` means unauthenticated.
    fn load(&self) -> Result<Option<Session>, StorageError>;

    /// Replace the slot contents.
    fn store(&self, session: &Session) -> Result<(), StorageError>;

    /// Empty the slot.
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory slot for tests and contexts without persistence.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStorage {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-populated with a session.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl MemorySessionStorage {
    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>, StorageError> {
        self.slot
            .lock()
            .map_err(|_| StorageError::Io("session slot lock poisoned".to_string()))
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<Session>, StorageError> {
        Ok(self.slot()?.clone())
    }

    fn store(&self, session: &Session) -> Result<(), StorageError> {
        *self.slot()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot()? = None;
        Ok(())
    }
}
