//! Model authoring controller.
//!
//! Drives the "my models" dashboard: the confirmed list fetched from the
//! authoring collaborator, plus a local overlay of models deployed during
//! this view's lifetime. The overlay keeps a just-deployed model visible
//! immediately, before the next confirmed fetch would include it.

use crate::domain::{AsyncOp, Model, ModelDraft};
use crate::ports::{AuthoringError, AuthoringPort, FetchError, NewModelSubmission};
use crate::session::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

/// Default bound on a single collaborator call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Observable authoring state.
#[derive(Debug, Clone, Default)]
pub struct AuthoringState {
    /// Models the collaborator confirmed as ours, in its order.
    pub confirmed: Vec<Model>,
    /// Models deployed from this view, newest first, not yet present in
    /// a confirmed fetch.
    pub deployed: Vec<Model>,
    /// Lifecycle of the list fetch.
    pub fetch: AsyncOp<()>,
    /// Lifecycle of the in-flight deploy, carrying the created record.
    pub deploy: AsyncOp<Model>,
}

impl AuthoringState {
    /// The list the dashboard renders: local overlay first, then the
    /// confirmed list with overlay duplicates removed.
    #[must_use]
    pub fn models(&self) -> Vec<Model> {
        let mut merged = self.deployed.clone();
        merged.extend(
            self.confirmed
                .iter()
                .filter(|model| self.deployed.iter().all(|d| d.id != model.id))
                .cloned(),
        );
        merged
    }
}

/// Controller for the authoring dashboard.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct AuthoringController {
    authoring: Arc<dyn AuthoringPort>,
    session: Arc<SessionStore>,
    request_timeout: Duration,
    state_tx: Arc<watch::Sender<AuthoringState>>,
}

impl AuthoringController {
    /// Create a controller over the authoring collaborator.
    pub fn new(authoring: Arc<dyn AuthoringPort>, session: Arc<SessionStore>) -> Self {
        let (state_tx, _rx) = watch::channel(AuthoringState::default());
        Self {
            authoring,
            session,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            state_tx: Arc::new(state_tx),
        }
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthoringState> {
        self.state_tx.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthoringState {
        self.state_tx.borrow().clone()
    }

    /// Fetch the confirmed list of our models.
    ///
    /// Overlay entries that now appear in the confirmed list are retired
    /// from the overlay; the rest stay visible.
    pub async fn load_mine(&self) {
        self.state_tx
            .send_modify(|state| state.fetch = AsyncOp::Pending);

        let outcome = tokio::time::timeout(self.request_timeout, self.authoring.list_mine())
            .await
            .unwrap_or(Err(FetchError::Timeout));

        match outcome {
            Ok(confirmed) => {
                self.state_tx.send_modify(|state| {
                    state
                        .deployed
                        .retain(|d| confirmed.iter().all(|m| m.id != d.id));
                    state.confirmed = confirmed;
                    state.fetch = AsyncOp::Succeeded { payload: () };
                });
            }
            Err(err) => {
                if err.is_unauthorized() {
                    self.session.force_clear();
                }
                warn!(%err, "my-models fetch failed");
                self.state_tx.send_modify(|state| {
                    state.fetch = AsyncOp::Failed {
                        reason: err.to_string(),
                    };
                });
            }
        }
    }

    /// Validate a draft and deploy it.
    ///
    /// Validation runs locally first and reports every failing field at
    /// once; nothing reaches the collaborator until the draft is clean.
    /// On success the created record lands at the front of the overlay.
    pub async fn deploy(&self, draft: &ModelDraft) -> Result<Model, AuthoringError> {
        draft.validate()?;
        let submission = NewModelSubmission::from_draft(draft)?;

        if self.state_tx.borrow().deploy.is_pending() {
            return Err(AuthoringError::Fetch(FetchError::Network(
                "a deploy is already in flight".to_string(),
            )));
        }
        self.state_tx
            .send_modify(|state| state.deploy = AsyncOp::Pending);

        let outcome = tokio::time::timeout(
            self.request_timeout,
            self.authoring.create(submission),
        )
        .await
        .unwrap_or(Err(FetchError::Timeout));

        match outcome {
            Ok(model) => {
                info!(id = %model.id, title = %model.title, "model deployed");
                self.state_tx.send_modify(|state| {
                    state.deployed.insert(0, model.clone());
                    state.deploy = AsyncOp::Succeeded {
                        payload: model.clone(),
                    };
                });
                Ok(model)
            }
            Err(err) => {
                if err.is_unauthorized() {
                    self.session.force_clear();
                }
                warn!(%err, "deploy failed");
                self.state_tx.send_modify(|state| {
                    state.deploy = AsyncOp::Failed {
                        reason: err.to_string(),
                    };
                });
                Err(err.into())
            }
        }
    }

    /// Reset the deploy lifecycle after the view has shown the outcome.
    pub fn acknowledge_deploy(&self) {
        self.state_tx
            .send_modify(|state| state.deploy = AsyncOp::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DraftError, Version, VersionDraft};
    use crate::ports::MemorySessionStorage;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn owned_model(id: &str, title: &str) -> Model {
        Model {
            id: id.to_string(),
            title: title.to_string(),
            description: "A model we own".to_string(),
            provider: "Demo User".to_string(),
            tags: vec!["Custom".to_string()],
            price: 0.0,
            image_url: None,
            features: vec![],
            input_type: "Text".to_string(),
            output_type: "Text".to_string(),
            versions: vec![Version {
                id: format!("{id}-v1"),
                name: "v1.0.0".to_string(),
                script: "def run(): ...".to_string(),
                created_at: Utc::now(),
            }],
            rating: None,
            review_count: None,
            comments: vec![],
        }
    }

    fn valid_draft() -> ModelDraft {
        ModelDraft {
            title: "SentimentAnalyze".to_string(),
            description: "Real-time sentiment monitoring for social feeds.".to_string(),
            provider: "DataSense".to_string(),
            tags: "Analytics, NLP".to_string(),
            input_type: "Text".to_string(),
            output_type: "JSON Report".to_string(),
            versions: vec![VersionDraft {
                name: "v1.0.0".to_string(),
                script: "def analyze(text): ...".to_string(),
                weights_file: Some("weights.bin".to_string()),
            }],
        }
    }

    struct FakeAuthoring {
        mine: Mutex<Vec<Model>>,
        created: AtomicU32,
        fail_list: Mutex<Option<FetchError>>,
        fail_create: Mutex<Option<FetchError>>,
    }

    impl FakeAuthoring {
        fn with_mine(mine: Vec<Model>) -> Self {
            Self {
                mine: Mutex::new(mine),
                created: AtomicU32::new(0),
                fail_list: Mutex::new(None),
                fail_create: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl AuthoringPort for FakeAuthoring {
        async fn list_mine(&self) -> Result<Vec<Model>, FetchError> {
            if let Some(err) = self.fail_list.lock().unwrap().take() {
                return Err(err);
            }
            Ok(self.mine.lock().unwrap().clone())
        }

        async fn create(&self, submission: NewModelSubmission) -> Result<Model, FetchError> {
            if let Some(err) = self.fail_create.lock().unwrap().take() {
                return Err(err);
            }
            let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
            let mut model = owned_model(&format!("new-{n}"), &submission.title);
            model.description = submission.description;
            model.provider = submission.provider;
            model.tags = submission.tags;
            Ok(model)
        }
    }

    fn store() -> Arc<SessionStore> {
        Arc::new(SessionStore::open(Arc::new(MemorySessionStorage::new())).unwrap())
    }

    #[tokio::test]
    async fn load_mine_fills_confirmed_list() {
        let port = Arc::new(FakeAuthoring::with_mine(vec![
            owned_model("m-1", "First"),
            owned_model("m-2", "Second"),
        ]));
        let ctl = AuthoringController::new(Arc::clone(&port) as Arc<dyn AuthoringPort>, store());

        ctl.load_mine().await;
        let state = ctl.state();
        assert!(state.fetch.is_succeeded());
        assert_eq!(state.models().len(), 2);
    }

    #[tokio::test]
    async fn deploy_prepends_to_overlay() {
        let port = Arc::new(FakeAuthoring::with_mine(vec![owned_model("m-1", "First")]));
        let ctl = AuthoringController::new(Arc::clone(&port) as Arc<dyn AuthoringPort>, store());
        ctl.load_mine().await;

        let created = ctl.deploy(&valid_draft()).await.unwrap();
        assert_eq!(created.title, "SentimentAnalyze");

        let state = ctl.state();
        let models = state.models();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].title, "SentimentAnalyze", "newest first");
        assert_eq!(models[1].id, "m-1");
        assert_eq!(state.deploy.payload().unwrap().id, created.id);
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_collaborator() {
        let port = Arc::new(FakeAuthoring::with_mine(vec![]));
        let ctl = AuthoringController::new(Arc::clone(&port) as Arc<dyn AuthoringPort>, store());

        let mut draft = valid_draft();
        draft.title = "X".to_string();
        draft.versions[0].weights_file = None;

        let err = ctl.deploy(&draft).await.unwrap_err();
        let AuthoringError::Validation(DraftError { errors }) = err else {
            panic!("expected validation failure");
        };
        // Every failing field is reported at once.
        assert!(errors.iter().any(|f| f.field == "title"));
        assert!(errors.iter().any(|f| f.field == "versions[0].weightsFile"));
        assert_eq!(port.created.load(Ordering::SeqCst), 0);
        assert!(matches!(ctl.state().deploy, AsyncOp::Idle));
    }

    #[tokio::test]
    async fn overlay_retires_once_confirmed() {
        let port = Arc::new(FakeAuthoring::with_mine(vec![]));
        let ctl = AuthoringController::new(Arc::clone(&port) as Arc<dyn AuthoringPort>, store());

        let created = ctl.deploy(&valid_draft()).await.unwrap();
        assert_eq!(ctl.state().deployed.len(), 1);

        // The collaborator now includes the new model.
        port.mine.lock().unwrap().push(created.clone());
        ctl.load_mine().await;

        let state = ctl.state();
        assert!(state.deployed.is_empty(), "overlay entry retired");
        let models = state.models();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, created.id);
    }

    #[tokio::test]
    async fn failed_deploy_keeps_lists_intact() {
        let port = Arc::new(FakeAuthoring::with_mine(vec![owned_model("m-1", "First")]));
        *port.fail_create.lock().unwrap() = Some(FetchError::Server("quota".to_string()));
        let ctl = AuthoringController::new(Arc::clone(&port) as Arc<dyn AuthoringPort>, store());
        ctl.load_mine().await;

        let err = ctl.deploy(&valid_draft()).await.unwrap_err();
        assert!(matches!(err, AuthoringError::Fetch(FetchError::Server(_))));
        let state = ctl.state();
        assert_eq!(state.models().len(), 1);
        assert_eq!(state.deploy.failure(), Some("server error: quota"));

        ctl.acknowledge_deploy();
        assert!(matches!(ctl.state().deploy, AsyncOp::Idle));
    }

    #[tokio::test]
    async fn unauthorized_list_clears_session() {
        let port = Arc::new(FakeAuthoring::with_mine(vec![]));
        *port.fail_list.lock().unwrap() = Some(FetchError::Unauthorized);
        let store = store();
        store
            .set(crate::domain::Session {
                uid: "u-1".to_string(),
                email: None,
                display_name: None,
                photo_url: None,
            })
            .unwrap();
        let ctl = AuthoringController::new(
            Arc::clone(&port) as Arc<dyn AuthoringPort>,
            Arc::clone(&store),
        );

        ctl.load_mine().await;
        assert!(!store.is_authenticated());
        assert!(ctl.state().fetch.is_failed());
    }
}
