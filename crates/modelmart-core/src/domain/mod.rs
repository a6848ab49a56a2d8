//! Domain types, independent of transport and storage concerns.

mod draft;
mod model;
mod op;
mod session;

pub use draft::{DraftError, FieldError, ModelDraft, VersionDraft};
pub use model::{Comment, Model, Version};
pub use op::AsyncOp;
pub use session::Session;
