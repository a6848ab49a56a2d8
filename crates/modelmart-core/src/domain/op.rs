//! Async operation lifecycle tracking.
//!
//! Every independent asynchronous action a controller owns (list fetch,
//! detail fetch, inference run, review submission, deploy) carries its
//! own [`AsyncOp`] so dependent UI can render loading, error, and empty
//! states distinctly.

use serde::{Deserialize, Serialize};

/// Lifecycle of one asynchronous action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AsyncOp<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight. Controllers use this state to serialize
    /// actions that must not run concurrently.
    Pending,
    /// The last request completed with a payload.
    Succeeded {
        /// Result payload.
        payload: T,
    },
    /// The last request failed. The reason is user-presentable.
    Failed {
        /// Human-readable failure description.
        reason: String,
    },
}

impl<T> AsyncOp<T> {
    /// True while a request is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// True once a request has completed successfully.
    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// True after a failed request.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The success payload, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&T> {
        match self {
            Self::Succeeded { payload } => Some(payload),
            _ => None,
        }
    }

    /// The failure reason, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}
