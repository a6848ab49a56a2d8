//! Client core for the model marketplace.
//!
//! This crate holds the data and session orchestration layer of the
//! marketplace client: domain types, collaborator ports, the session
//! store with its auth gate, and the view controllers. It contains no
//! rendering and no transport; adapters plug in behind the ports.

pub mod controllers;
pub mod domain;
pub mod ports;
pub mod session;

// Re-export commonly used types for convenience
pub use controllers::{
    AuthoringController, AuthoringState, CatalogConfig, CatalogController, CatalogState,
    DetailConfig, DetailController, DetailLoad, DetailState, FallbackPolicy,
};
pub use domain::{
    AsyncOp, Comment, DraftError, FieldError, Model, ModelDraft, Session, Version, VersionDraft,
};
pub use ports::{
    AuthError, AuthPort, AuthProvider, AuthoringError, AuthoringPort, CatalogError, CatalogPage,
    CatalogPort, FetchError, InferenceReply, InferenceUsage, ListQuery, MemorySessionStorage,
    NewModelSubmission, NewReview, NewVersionSubmission, ProfilePort, ProfileUpdate,
    SessionStorage, StorageError, UserProfile,
};
pub use session::{
    AuthFlow, DEFAULT_LANDING_PATH, GateDecision, LOGIN_PATH, SessionPhase, SessionStore,
};
