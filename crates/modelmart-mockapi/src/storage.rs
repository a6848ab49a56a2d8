//! JSON-file session slot.
//!
//! Persists the session as a single JSON document, the desktop analogue
//! of a browser's single-key local storage. Reads and writes are small
//! and synchronous by the port's contract.

use modelmart_core::domain::Session;
use modelmart_core::ports::{SessionStorage, StorageError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed session slot.
pub struct JsonFileSessionStorage {
    path: PathBuf,
}

impl JsonFileSessionStorage {
    /// Slot at the given file path. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for JsonFileSessionStorage {
    fn load(&self) -> Result<Option<Session>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::Io(err.to_string())),
        };
        let session = serde_json::from_str(&contents)
            .map_err(|err| StorageError::Corrupt(err.to_string()))?;
        Ok(Some(session))
    }

    fn store(&self, session: &Session) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(session)
            .map_err(|err| StorageError::Io(err.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StorageError::Io(err.to_string()))?;
        }
        fs::write(&self.path, json).map_err(|err| StorageError::Io(err.to_string()))?;
        debug!(path = %self.path.display(), "session slot written");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err.to_string())),
        }
    }
}
