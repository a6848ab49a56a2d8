//! Catalog browsing controller.
//!
//! Owns the search term, pagination, and the list-fetch lifecycle.
//! State is published through a `watch` channel; the UI renders from
//! snapshots and never touches the collaborator directly.
//!
//! # Ordering
//!
//! Search input is debounced with an explicit timer-based coalescing
//! policy: every keystroke bumps a fetch generation, and a scheduled
//! fetch only runs (and only applies its result) while its generation is
//! still current. This gives last-intent-wins by request ordering: a
//! slower stale response can never overwrite a newer result.

use crate::domain::{AsyncOp, Model};
use crate::ports::{CatalogPort, FetchError, ListQuery};
use crate::session::SessionStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Default number of catalog items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// Default quiescence window after the last keystroke.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Default bound on a single collaborator call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Tuning knobs for [`CatalogController`].
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Items per page.
    pub page_size: u32,
    /// Quiescence window for search input.
    pub debounce: Duration,
    /// Bound on each list fetch; expiry becomes a `Failed` state.
    pub request_timeout: Duration,
    /// Drop the visible items when a fetch fails.
    ///
    /// Off by default: a transient failure keeps the last good list on
    /// screen next to the error state instead of blanking the page.
    pub clear_items_on_error: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            clear_items_on_error: false,
        }
    }
}

/// Observable catalog state.
#[derive(Debug, Clone)]
pub struct CatalogState {
    /// Current search input, echoed immediately for controlled inputs.
    pub search_term: String,
    /// 1-based page, always within `[1, max(1, total_pages)]`.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Total matches reported by the last successful fetch.
    pub total: u64,
    /// Visible items; never more than `page_size`.
    pub items: Vec<Model>,
    /// Lifecycle of the list fetch.
    pub fetch: AsyncOp<()>,
}

impl CatalogState {
    fn new(page_size: u32) -> Self {
        Self {
            search_term: String::new(),
            page: 1,
            page_size,
            total: 0,
            items: Vec::new(),
            fetch: AsyncOp::Idle,
        }
    }

    /// Number of pages for the current total, at least 1.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(self.page_size as u64);
        if pages == 0 {
            return 1;
        }
        if pages > u32::MAX as u64 {
            return u32::MAX;
        }
        pages as u32
    }

    /// Clamp a requested page into the valid range.
    #[must_use]
    pub const fn clamp_page(&self, requested: u32) -> u32 {
        let max = self.total_pages();
        if requested < 1 {
            1
        } else if requested > max {
            max
        } else {
            requested
        }
    }
}

struct Inner {
    catalog: Arc<dyn CatalogPort>,
    session: Arc<SessionStore>,
    config: CatalogConfig,
    state_tx: watch::Sender<CatalogState>,
    /// Monotonic fetch intent counter; see module docs.
    generation: AtomicU64,
    cancel: CancellationToken,
}

/// Controller for the catalog browsing view.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct CatalogController {
    inner: Arc<Inner>,
}

impl CatalogController {
    /// Create a controller over the catalog collaborator.
    pub fn new(
        catalog: Arc<dyn CatalogPort>,
        session: Arc<SessionStore>,
        config: CatalogConfig,
    ) -> Self {
        let (state_tx, _rx) = watch::channel(CatalogState::new(config.page_size));
        Self {
            inner: Arc::new(Inner {
                catalog,
                session,
                config,
                state_tx,
                generation: AtomicU64::new(0),
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.inner.state_tx.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> CatalogState {
        self.inner.state_tx.borrow().clone()
    }

    /// Fetch the current page immediately (view mount, retry affordance).
    pub fn load(&self) {
        let generation = self.bump_generation();
        self.inner
            .state_tx
            .send_modify(|state| state.fetch = AsyncOp::Pending);
        self.spawn_fetch(generation, Duration::ZERO);
    }

    /// Update the search term.
    ///
    /// The term is echoed into state immediately and the page resets
    /// to 1, but the fetch waits out the quiescence window; only the
    /// last keystroke inside the window reaches the collaborator.
    ///
    /// The echo, the page reset, and the pending lifecycle land in one
    /// broadcast: no snapshot shows the new term next to a terminal
    /// fetch state describing the old query.
    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        let generation = self.bump_generation();
        self.inner.state_tx.send_modify(|state| {
            state.search_term = term;
            state.page = 1;
            state.fetch = AsyncOp::Pending;
        });
        self.spawn_fetch(generation, self.inner.config.debounce);
    }

    /// Navigate to a page, clamped into `[1, max(1, total_pages)]`.
    ///
    /// Triggers an immediate, non-debounced fetch of the clamped page.
    pub fn set_page(&self, requested: u32) {
        let generation = self.bump_generation();
        self.inner.state_tx.send_modify(|state| {
            state.page = state.clamp_page(requested);
            state.fetch = AsyncOp::Pending;
        });
        self.spawn_fetch(generation, Duration::ZERO);
    }

    /// Cancel all scheduled and in-flight work (view unmount).
    ///
    /// Results arriving afterwards are ignored; no state updates reach a
    /// defunct view context.
    pub fn close(&self) {
        self.inner.cancel.cancel();
    }

    fn bump_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn spawn_fetch(&self, generation: u64, delay: Duration) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::select! {
                    () = inner.cancel.cancelled() => return,
                    () = tokio::time::sleep(delay) => {}
                }
                if inner.generation.load(Ordering::SeqCst) != generation {
                    debug!(generation, "keystroke superseded inside debounce window");
                    return;
                }
            }
            Inner::run_fetch(&inner, generation).await;
        });
    }
}

impl Inner {
    async fn run_fetch(inner: &Arc<Self>, generation: u64) {
        let query = {
            let state = inner.state_tx.borrow();
            let term = state.search_term.trim();
            ListQuery {
                search_term: if term.is_empty() {
                    None
                } else {
                    Some(term.to_string())
                },
                page: state.page,
                page_size: state.page_size,
            }
        };

        // The scheduling entry point already published `Pending`
        // together with the query change.
        let outcome = tokio::select! {
            () = inner.cancel.cancelled() => return,
            result = tokio::time::timeout(
                inner.config.request_timeout,
                inner.catalog.list(&query),
            ) => result.unwrap_or(Err(FetchError::Timeout)),
        };

        // Apply-time staleness check: a newer intent wins even when its
        // response arrived first.
        if inner.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding stale catalog response");
            return;
        }

        match outcome {
            Ok(page) => {
                inner.state_tx.send_modify(|state| {
                    state.total = page.total;
                    state.items = page.items;
                    state.items.truncate(state.page_size as usize);
                    // The match count may have shrunk under us.
                    state.page = state.clamp_page(state.page);
                    state.fetch = AsyncOp::Succeeded { payload: () };
                });
            }
            Err(err) => {
                if err.is_unauthorized() {
                    inner.session.force_clear();
                }
                warn!(%err, page = query.page, "catalog fetch failed");
                inner.state_tx.send_modify(|state| {
                    if inner.config.clear_items_on_error {
                        state.items.clear();
                        state.total = 0;
                    }
                    state.fetch = AsyncOp::Failed {
                        reason: err.to_string(),
                    };
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Comment, Session, Version};
    use crate::ports::{
        CatalogError, CatalogPage, InferenceReply, MemorySessionStorage, NewReview,
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn model(id: &str, title: &str) -> Model {
        Model {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{title} description"),
            provider: "Acme AI".to_string(),
            tags: vec!["NLP".to_string()],
            price: 0.05,
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

    /// Scripted catalog collaborator: per-term response delay, optional
    /// forced failure, call recording.
    struct ScriptedCatalog {
        models: Vec<Model>,
        calls: Mutex<Vec<ListQuery>>,
        delays: HashMap<String, Duration>,
        fail_with: Mutex<Option<FetchError>>,
    }

    impl ScriptedCatalog {
        fn with_models(models: Vec<Model>) -> Self {
            Self {
                models,
                calls: Mutex::new(vec![]),
                delays: HashMap::new(),
                fail_with: Mutex::new(None),
            }
        }

        fn sized(n: usize) -> Self {
            Self::with_models((0..n).map(|i| model(&i.to_string(), &format!("Model {i}"))).collect())
        }

        fn delay(mut self, term: &str, delay: Duration) -> Self {
            self.delays.insert(term.to_string(), delay);
            self
        }

        fn fail_next(&self, err: FetchError) {
            *self.fail_with.lock().unwrap() = Some(err);
        }

        fn recorded(&self) -> Vec<ListQuery> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogPort for ScriptedCatalog {
        async fn list(&self, query: &ListQuery) -> Result<CatalogPage, FetchError> {
            self.calls.lock().unwrap().push(query.clone());
            if let Some(term) = &query.search_term {
                if let Some(delay) = self.delays.get(term.as_str()) {
                    tokio::time::sleep(*delay).await;
                }
            }
            if let Some(err) = self.fail_with.lock().unwrap().take() {
                return Err(err);
            }
            let matched: Vec<Model> = self
                .models
                .iter()
                .filter(|m| {
                    query.search_term.as_ref().is_none_or(|t| {
                        let t = t.to_lowercase();
                        m.title.to_lowercase().contains(&t)
                            || m.description.to_lowercase().contains(&t)
                    })
                })
                .cloned()
                .collect();
            let total = matched.len() as u64;
            let start = ((query.page - 1) * query.page_size) as usize;
            let items = matched
                .into_iter()
                .skip(start)
                .take(query.page_size as usize)
                .collect();
            Ok(CatalogPage { items, total })
        }

        async fn get_by_id(&self, id: &str) -> Result<Model, CatalogError> {
            self.models
                .iter()
                .find(|m| m.id == id)
                .cloned()
                .ok_or_else(|| CatalogError::NotFound(id.to_string()))
        }

        async fn run_inference(
            &self,
            _id: &str,
            _prompt: &str,
        ) -> Result<InferenceReply, FetchError> {
            unimplemented!("not exercised by catalog tests")
        }

        async fn add_review(&self, _id: &str, _review: NewReview) -> Result<Comment, FetchError> {
            unimplemented!("not exercised by catalog tests")
        }
    }

    fn session_store() -> Arc<SessionStore> {
        Arc::new(SessionStore::open(Arc::new(MemorySessionStorage::new())).unwrap())
    }

    fn controller(catalog: Arc<ScriptedCatalog>) -> CatalogController {
        CatalogController::new(catalog, session_store(), CatalogConfig::default())
    }

    async fn settle(rx: &mut watch::Receiver<CatalogState>) -> CatalogState {
        loop {
            rx.changed().await.unwrap();
            let state = rx.borrow().clone();
            if state.fetch.is_succeeded() || state.fetch.is_failed() {
                return state;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_coalesces_rapid_keystrokes() {
        let catalog = Arc::new(ScriptedCatalog::sized(12));
        let controller = controller(Arc::clone(&catalog));
        let mut rx = controller.subscribe();

        controller.set_search_term("M");
        controller.set_search_term("Mo");
        controller.set_search_term("Model 1");
        // The echo is immediate even though no fetch has run yet.
        assert_eq!(controller.state().search_term, "Model 1");
        assert_eq!(controller.state().page, 1);

        let state = settle(&mut rx).await;
        let calls = catalog.recorded();
        assert_eq!(calls.len(), 1, "only the last keystroke may fetch");
        assert_eq!(calls[0].search_term.as_deref(), Some("Model 1"));
        assert!(state.fetch.is_succeeded());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_never_overwrites_newer_result() {
        let catalog = Arc::new(
            ScriptedCatalog::sized(12)
                .delay("Model 1", Duration::from_secs(5))
                .delay("Model 2", Duration::from_millis(10)),
        );
        let controller = controller(Arc::clone(&catalog));
        let mut rx = controller.subscribe();

        controller.set_search_term("Model 1");
        tokio::time::sleep(Duration::from_millis(600)).await; // request A departs
        controller.set_search_term("Model 2");

        let state = settle(&mut rx).await; // B applies first
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].title, "Model 2");

        // Let A's slow response arrive; it must be discarded.
        tokio::time::sleep(Duration::from_secs(10)).await;
        let state = controller.state();
        assert_eq!(state.items[0].title, "Model 2");
        assert_eq!(catalog.recorded().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn query_change_and_pending_publish_in_one_snapshot() {
        let catalog = Arc::new(ScriptedCatalog::sized(12));
        let controller = controller(Arc::clone(&catalog));
        let mut rx = controller.subscribe();

        controller.load();
        settle(&mut rx).await;

        // The first snapshot after set_page already carries both the
        // new page and the pending lifecycle; no observer can read
        // page 2 next to page 1's terminal fetch state.
        controller.set_page(2);
        rx.changed().await.unwrap();
        let state = rx.borrow().clone();
        assert_eq!(state.page, 2);
        assert!(state.fetch.is_pending());

        controller.set_search_term("Model 1");
        rx.changed().await.unwrap();
        let state = rx.borrow().clone();
        assert_eq!(state.search_term, "Model 1");
        assert_eq!(state.page, 1);
        assert!(state.fetch.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn set_page_clamps_and_fetches() {
        let catalog = Arc::new(ScriptedCatalog::sized(12));
        let controller = controller(Arc::clone(&catalog));
        let mut rx = controller.subscribe();

        controller.load();
        let state = settle(&mut rx).await;
        assert_eq!(state.total, 12);
        assert_eq!(state.total_pages(), 2);
        assert_eq!(state.items.len(), 6);

        controller.set_page(99);
        let state = settle(&mut rx).await;
        assert_eq!(state.page, 2);

        controller.set_page(0);
        let state = settle(&mut rx).await;
        assert_eq!(state.page, 1);

        let pages: Vec<u32> = catalog.recorded().iter().map(|q| q.page).collect();
        assert_eq!(pages, vec![1, 2, 1], "only clamped pages reach the port");
    }

    #[tokio::test(start_paused = true)]
    async fn search_resets_page_and_reports_true_total() {
        let mut models: Vec<Model> = (0..12)
            .map(|i| model(&format!("l{i}"), &format!("Legal Tool {i}")))
            .collect();
        models.extend((0..5).map(|i| model(&format!("o{i}"), &format!("Other {i}"))));
        let catalog = Arc::new(ScriptedCatalog::with_models(models));
        let controller = controller(Arc::clone(&catalog));
        let mut rx = controller.subscribe();

        controller.load();
        settle(&mut rx).await;
        controller.set_page(2);
        settle(&mut rx).await;

        controller.set_search_term("Legal");
        let state = settle(&mut rx).await;
        assert_eq!(state.page, 1, "new search starts from page 1");
        assert_eq!(state.total, 12);
        assert!(state.items.len() <= state.page_size as usize);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_preserves_last_good_items() {
        let catalog = Arc::new(ScriptedCatalog::sized(12));
        let controller = controller(Arc::clone(&catalog));
        let mut rx = controller.subscribe();

        controller.load();
        let state = settle(&mut rx).await;
        assert_eq!(state.items.len(), 6);

        catalog.fail_next(FetchError::Network("connection reset".to_string()));
        controller.set_page(2);
        let state = settle(&mut rx).await;
        assert!(state.fetch.is_failed());
        assert_eq!(state.items.len(), 6, "stale-but-good items survive");
    }

    #[tokio::test(start_paused = true)]
    async fn clear_on_error_flag_restores_destructive_behavior() {
        let catalog = Arc::new(ScriptedCatalog::sized(12));
        let controller = CatalogController::new(
            Arc::clone(&catalog) as Arc<dyn CatalogPort>,
            session_store(),
            CatalogConfig {
                clear_items_on_error: true,
                ..CatalogConfig::default()
            },
        );
        let mut rx = controller.subscribe();

        controller.load();
        settle(&mut rx).await;
        catalog.fail_next(FetchError::Network("boom".to_string()));
        controller.load();
        let state = settle(&mut rx).await;
        assert!(state.items.is_empty());
        assert_eq!(state.total, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_becomes_failed_state() {
        let catalog =
            Arc::new(ScriptedCatalog::sized(3).delay("slow", Duration::from_secs(60)));
        let controller = controller(Arc::clone(&catalog));
        let mut rx = controller.subscribe();

        controller.set_search_term("slow");
        let state = settle(&mut rx).await;
        assert_eq!(state.fetch.failure(), Some("request timed out"));
    }

    #[tokio::test(start_paused = true)]
    async fn unauthorized_response_force_clears_session() {
        let catalog = Arc::new(ScriptedCatalog::sized(3));
        let store = session_store();
        store
            .set(Session {
                uid: "u-1".to_string(),
                email: None,
                display_name: None,
                photo_url: None,
            })
            .unwrap();
        let controller = CatalogController::new(
            Arc::clone(&catalog) as Arc<dyn CatalogPort>,
            Arc::clone(&store),
            CatalogConfig::default(),
        );
        let mut rx = controller.subscribe();

        catalog.fail_next(FetchError::Unauthorized);
        controller.load();
        settle(&mut rx).await;
        assert!(!store.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn close_ignores_inflight_results() {
        let catalog =
            Arc::new(ScriptedCatalog::sized(6).delay("slow", Duration::from_secs(2)));
        let controller = controller(Arc::clone(&catalog));

        controller.set_search_term("slow");
        tokio::time::sleep(Duration::from_millis(600)).await; // fetch departs
        controller.close();
        tokio::time::sleep(Duration::from_secs(5)).await;

        let state = controller.state();
        assert!(state.items.is_empty(), "no update reaches a closed view");
        assert!(state.fetch.is_pending(), "state frozen as of close()");
    }
}
