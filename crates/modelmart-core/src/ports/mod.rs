//! Port definitions (trait abstractions) for external collaborators.
//!
//! Ports define the interfaces the client core expects from the data
//! service layer. They contain no implementation details and use only
//! domain types; concrete adapters (HTTP client, mock fixtures) live in
//! sibling crates.
//!
//! # Design Rules
//!
//! - No HTTP client types in any signature
//! - Core-owned DTOs, never backend API types
//! - A 401-class failure surfaces as [`FetchError::Unauthorized`] so
//!   callers can force-clear the session store

pub mod auth;
pub mod authoring;
pub mod catalog;
pub mod profile;
pub mod session_storage;

use thiserror::Error;

pub use auth::{AuthError, AuthPort, AuthProvider};
pub use authoring::{AuthoringError, AuthoringPort, NewModelSubmission, NewVersionSubmission};
pub use catalog::{
    CatalogError, CatalogPage, CatalogPort, InferenceReply, InferenceUsage, ListQuery, NewReview,
};
pub use profile::{ProfilePort, ProfileUpdate, UserProfile};
pub use session_storage::{MemorySessionStorage, SessionStorage, StorageError};

/// A collaborator call failed before producing a usable result.
///
/// This is the transport-level error taxonomy shared by all ports.
/// Entity-level failures (not found, validation) are modeled per-port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The collaborator rejected the credentials (401 class).
    ///
    /// Receivers must force-clear the session store; the auth gate then
    /// redirects on the next navigation.
    #[error("unauthorized")]
    Unauthorized,

    /// The bounded request timeout expired.
    #[error("request timed out")]
    Timeout,

    /// The request never reached the collaborator.
    #[error("network error: {0}")]
    Network(String),

    /// The collaborator answered with a failure.
    #[error("server error: {0}")]
    Server(String),
}

impl FetchError {
    /// True for the 401 class that must clear the session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
