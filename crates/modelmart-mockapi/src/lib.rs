//! Fixture-backed collaborator adapters for the marketplace client.
//!
//! Implements every port from `modelmart-core` against in-memory seed
//! data plus a JSON-file session slot, so the full client can run with
//! no backend. Adapters simulate latency by default; the `instant`
//! constructors remove it for tests that drive virtual time.

pub mod auth;
pub mod authoring;
pub mod catalog;
pub mod fixtures;
pub mod profile;
pub mod storage;

pub use auth::MockAuth;
pub use authoring::MockAuthoring;
pub use catalog::MockCatalog;
pub use profile::MockProfile;
pub use storage::JsonFileSessionStorage;
