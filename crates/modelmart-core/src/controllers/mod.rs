//! View controllers.
//!
//! Each controller owns the state for one view, publishes it through a
//! `watch` channel, and talks to collaborators only through ports. The
//! UI layer subscribes, renders snapshots, and calls controller methods
//! in response to user input.

pub mod authoring;
pub mod catalog;
pub mod detail;

pub use authoring::{AuthoringController, AuthoringState};
pub use catalog::{CatalogConfig, CatalogController, CatalogState};
pub use detail::{DetailConfig, DetailController, DetailLoad, DetailState, FallbackPolicy};
