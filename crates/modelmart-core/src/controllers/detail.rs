//! Model detail controller.
//!
//! Drives the detail view: one model, version selection, inference runs,
//! and review submission. Each async action has its own [`AsyncOp`]
//! lifecycle so the view can render spinners and errors independently.

use crate::domain::{AsyncOp, Model, Session};
use crate::ports::{CatalogError, CatalogPort, FetchError, InferenceReply, NewReview};
use crate::session::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Default bound on a single collaborator call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// What the view shows when the model cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Surface the failure; render an error view. The default.
    #[default]
    FailClosed,
    /// Substitute a clearly-labelled placeholder model so the layout
    /// still renders. Interactions against a placeholder are rejected.
    Placeholder,
}

/// Tuning knobs for [`DetailController`].
#[derive(Debug, Clone)]
pub struct DetailConfig {
    /// Bound on each collaborator call.
    pub request_timeout: Duration,
    /// Behavior when the model fetch fails.
    pub fallback: FallbackPolicy,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            fallback: FallbackPolicy::default(),
        }
    }
}

/// Load lifecycle of the detail view's model.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailLoad {
    /// Fetch in flight; render a skeleton.
    Loading,
    /// Model available (possibly a placeholder under
    /// [`FallbackPolicy::Placeholder`]).
    Loaded(Model),
    /// The id does not exist.
    NotFound,
    /// The fetch failed in transit.
    Failed {
        reason: String,
    },
}

/// Observable detail-view state.
#[derive(Debug, Clone)]
pub struct DetailState {
    pub load: DetailLoad,
    /// Id of the version shown in the code/weights panel.
    pub selected_version_id: Option<String>,
    /// True when [`DetailLoad::Loaded`] holds a substituted placeholder.
    pub placeholder: bool,
    /// Lifecycle of the current inference run.
    pub inference: AsyncOp<InferenceReply>,
    /// Lifecycle of the current review submission.
    pub review: AsyncOp<()>,
}

impl DetailState {
    fn initial() -> Self {
        Self {
            load: DetailLoad::Loading,
            selected_version_id: None,
            placeholder: false,
            inference: AsyncOp::Idle,
            review: AsyncOp::Idle,
        }
    }

    /// The loaded model, if any.
    #[must_use]
    pub const fn model(&self) -> Option<&Model> {
        match &self.load {
            DetailLoad::Loaded(model) => Some(model),
            _ => None,
        }
    }
}

/// Controller for the model detail view.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct DetailController {
    catalog: Arc<dyn CatalogPort>,
    session: Arc<SessionStore>,
    config: DetailConfig,
    state_tx: Arc<watch::Sender<DetailState>>,
}

impl DetailController {
    /// Create a controller over the catalog collaborator.
    pub fn new(
        catalog: Arc<dyn CatalogPort>,
        session: Arc<SessionStore>,
        config: DetailConfig,
    ) -> Self {
        let (state_tx, _rx) = watch::channel(DetailState::initial());
        Self {
            catalog,
            session,
            config,
            state_tx: Arc::new(state_tx),
        }
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state_tx.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> DetailState {
        self.state_tx.borrow().clone()
    }

    /// Fetch the model and reset the interaction lifecycles.
    pub async fn load(&self, id: &str) {
        self.state_tx.send_replace(DetailState::initial());

        let outcome = tokio::time::timeout(
            self.config.request_timeout,
            self.catalog.get_by_id(id),
        )
        .await
        .unwrap_or(Err(CatalogError::Fetch(FetchError::Timeout)));

        match outcome {
            Ok(model) => {
                let selected = model.default_version().map(|v| v.id.clone());
                self.state_tx.send_modify(|state| {
                    state.load = DetailLoad::Loaded(model);
                    state.selected_version_id = selected;
                });
            }
            Err(CatalogError::NotFound(id)) => {
                debug!(%id, "model not found");
                self.apply_load_failure(&id, DetailLoad::NotFound);
            }
            Err(CatalogError::Fetch(err)) => {
                if err.is_unauthorized() {
                    self.session.force_clear();
                }
                warn!(%err, %id, "model fetch failed");
                self.apply_load_failure(
                    id,
                    DetailLoad::Failed {
                        reason: err.to_string(),
                    },
                );
            }
        }
    }

    fn apply_load_failure(&self, id: &str, load: DetailLoad) {
        match self.config.fallback {
            FallbackPolicy::FailClosed => {
                self.state_tx.send_modify(|state| state.load = load);
            }
            FallbackPolicy::Placeholder => {
                let model = placeholder_model(id);
                let selected = model.default_version().map(|v| v.id.clone());
                self.state_tx.send_modify(|state| {
                    state.load = DetailLoad::Loaded(model);
                    state.selected_version_id = selected;
                    state.placeholder = true;
                });
            }
        }
    }

    /// Show a different version in the code/weights panel.
    ///
    /// Unknown ids are ignored; the selection never points at a version
    /// the model does not have.
    pub fn select_version(&self, version_id: &str) {
        self.state_tx.send_if_modified(|state| {
            let known = state
                .model()
                .is_some_and(|m| m.version(version_id).is_some());
            if known && state.selected_version_id.as_deref() != Some(version_id) {
                state.selected_version_id = Some(version_id.to_string());
                true
            } else {
                false
            }
        });
    }

    /// Run the model against a prompt.
    ///
    /// Blank prompts are ignored, and runs are serialized: a second call
    /// while one is pending is dropped rather than queued. The answer
    /// shown always comes from the collaborator; a failed run produces an
    /// error state, never a substitute answer.
    pub async fn run_inference(&self, prompt: &str) {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return;
        }
        let model_id = {
            let state = self.state_tx.borrow();
            if state.inference.is_pending() || state.placeholder {
                return;
            }
            match state.model() {
                Some(model) => model.id.clone(),
                None => return,
            }
        };

        self.state_tx
            .send_modify(|state| state.inference = AsyncOp::Pending);

        let outcome = tokio::time::timeout(
            self.config.request_timeout,
            self.catalog.run_inference(&model_id, prompt),
        )
        .await
        .unwrap_or(Err(FetchError::Timeout));

        match outcome {
            Ok(reply) => {
                self.state_tx.send_modify(|state| {
                    state.inference = AsyncOp::Succeeded { payload: reply };
                });
            }
            Err(err) => {
                if err.is_unauthorized() {
                    self.session.force_clear();
                }
                warn!(%err, model = %model_id, "inference run failed");
                self.state_tx.send_modify(|state| {
                    state.inference = AsyncOp::Failed {
                        reason: err.to_string(),
                    };
                });
            }
        }
    }

    /// Submit a review for the loaded model.
    ///
    /// Requires an authenticated session and non-empty text. On success
    /// the loaded model's rating, review count, and comment list update
    /// in a single state transition.
    pub async fn submit_review(&self, content: &str, rating: u8) {
        let content = content.trim();
        if content.is_empty() {
            self.fail_review("review text is required");
            return;
        }
        if !(1..=5).contains(&rating) {
            self.fail_review("rating must be between 1 and 5");
            return;
        }
        let Some(session) = self.session.session() else {
            self.fail_review("sign in to leave a review");
            return;
        };
        let model_id = {
            let state = self.state_tx.borrow();
            if state.review.is_pending() || state.placeholder {
                return;
            }
            match state.model() {
                Some(model) => model.id.clone(),
                None => return,
            }
        };

        self.state_tx
            .send_modify(|state| state.review = AsyncOp::Pending);

        let review = new_review(&session, content, rating);
        let outcome = tokio::time::timeout(
            self.config.request_timeout,
            self.catalog.add_review(&model_id, review),
        )
        .await
        .unwrap_or(Err(FetchError::Timeout));

        match outcome {
            Ok(comment) => {
                self.state_tx.send_modify(|state| {
                    if let DetailLoad::Loaded(model) = &mut state.load {
                        model.apply_review(comment);
                    }
                    state.review = AsyncOp::Succeeded { payload: () };
                });
            }
            Err(err) => {
                if err.is_unauthorized() {
                    self.session.force_clear();
                }
                warn!(%err, model = %model_id, "review submission failed");
                self.state_tx.send_modify(|state| {
                    state.review = AsyncOp::Failed {
                        reason: err.to_string(),
                    };
                });
            }
        }
    }

    fn fail_review(&self, reason: &str) {
        self.state_tx.send_modify(|state| {
            state.review = AsyncOp::Failed {
                reason: reason.to_string(),
            };
        });
    }
}

fn new_review(session: &Session, content: &str, rating: u8) -> NewReview {
    NewReview {
        user_id: session.uid.clone(),
        user_name: session.label().to_string(),
        user_avatar: session.photo_url.clone().unwrap_or_default(),
        content: content.to_string(),
        rating,
    }
}

/// Stand-in model used under [`FallbackPolicy::Placeholder`].
fn placeholder_model(id: &str) -> Model {
    Model {
        id: id.to_string(),
        title: "Model unavailable".to_string(),
        description: "Details for this model could not be loaded.".to_string(),
        provider: "Unknown".to_string(),
        tags: vec![],
        price: 0.0,
        image_url: None,
        features: vec![],
        input_type: "Text".to_string(),
        output_type: "Text".to_string(),
        versions: vec![],
        rating: None,
        review_count: None,
        comments: vec![],
    }
}
