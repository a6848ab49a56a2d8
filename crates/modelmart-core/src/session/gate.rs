//! Route guard decisions.
//!
//! The gate is a pure function of `(session phase, requested path)`.
//! It performs no I/O; the router acts on the decision.

use crate::domain::Session;

/// Path of the login screen.
pub const LOGIN_PATH: &str = "/login";

/// Landing path after a login with no saved destination.
pub const DEFAULT_LANDING_PATH: &str = "/dashboard";

/// Session readiness as seen by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// The store has not finished its initial load. The gate must not
    /// guess; render a neutral loading state.
    Loading,
    /// The store is ready; `None` means unauthenticated.
    Ready(Option<Session>),
}

/// What the router should do with a protected navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the requested view.
    Allow,
    /// Suspend rendering until the session phase is known.
    Wait,
    /// Send the user to the login screen, remembering where they were
    /// headed so a successful login can replay it.
    RedirectToLogin {
        /// The originally requested path.
        saved_path: String,
    },
}

/// Decide whether a protected path may render.
#[must_use]
pub fn decide(phase: &SessionPhase, requested_path: &str) -> GateDecision {
    match phase {
        SessionPhase::Loading => GateDecision::Wait,
        SessionPhase::Ready(Some(_)) => GateDecision::Allow,
        SessionPhase::Ready(None) => GateDecision::RedirectToLogin {
            saved_path: requested_path.to_string(),
        },
    }
}

/// Where to navigate after a successful login.
#[must_use]
pub fn post_login_destination(saved_path: Option<&str>) -> &str {
    saved_path.unwrap_or(DEFAULT_LANDING_PATH)
}
