//! Session store, auth gate, and login/logout orchestration.

mod auth;
pub mod gate;
mod store;

pub use auth::AuthFlow;
pub use gate::{
    DEFAULT_LANDING_PATH, GateDecision, LOGIN_PATH, SessionPhase, decide, post_login_destination,
};
pub use store::SessionStore;
