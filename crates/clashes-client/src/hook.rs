//! Client-side holder of the clash list.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use clashes_shared::constants::GENERIC_ERROR_MESSAGE;

use crate::source::ClashSource;
use crate::state::ClashesState;

/// Owns the clash list state for one session and reloads it on demand.
///
/// State is published on a `watch` channel. Every reload takes a new
/// generation number and only the newest generation may write its result,
/// so a slow response to an older term can never overwrite a newer one.
#[derive(Clone)]
pub struct ClashesHook {
    inner: Arc<HookInner>,
}

struct HookInner {
    source: Arc<dyn ClashSource>,
    state: watch::Sender<ClashesState>,
    generation: AtomicU64,
    initialized: AtomicBool,
}

impl ClashesHook {
    pub fn new(source: Arc<dyn ClashSource>) -> Self {
        let (state, _) = watch::channel(ClashesState::new());
        Self {
            inner: Arc::new(HookInner {
                source,
                state,
                generation: AtomicU64::new(0),
                initialized: AtomicBool::new(false),
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ClashesState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> ClashesState {
        self.inner.state.borrow().clone()
    }

    /// Run the initial unfiltered load. Only the first call does anything;
    /// it returns `false` afterwards.
    pub async fn initialize(&self) -> bool {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.reload("").await;
        true
    }

    /// Load the list for `term` and publish the result.
    pub async fn reload(&self, term: &str) {
        let guard = self.begin();
        self.complete(guard, term).await;
    }

    /// Reload with the empty term, as offered by the error view.
    pub async fn retry(&self) {
        self.reload("").await;
    }

    /// Run [`reload`](Self::reload) on a background task.
    ///
    /// `loading` is already set when this returns.
    pub fn spawn_reload(&self, term: String) -> JoinHandle<()> {
        let guard = self.begin();
        let hook = self.clone();
        tokio::spawn(async move { hook.complete(guard, &term).await })
    }

    /// Take a new generation and mark the list as loading.
    fn begin(&self) -> ReloadGuard {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.inner.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        ReloadGuard {
            inner: self.inner.clone(),
            generation,
            armed: true,
        }
    }

    async fn complete(&self, mut guard: ReloadGuard, term: &str) {
        let generation = guard.generation;
        let result = self.inner.source.load(term).await;

        let applied = self.inner.state.send_if_modified(|state| {
            if !self.inner.is_current(generation) {
                return false;
            }
            match result {
                Ok(clashes) => {
                    state.clashes = clashes;
                    state.error = None;
                }
                Err(e) => {
                    warn!(error = %e, term, "Failed to load clashes");
                    let message = e.to_string();
                    state.error = Some(if message.is_empty() {
                        GENERIC_ERROR_MESSAGE.to_string()
                    } else {
                        message
                    });
                    state.clashes = Vec::new();
                }
            }
            state.term = term.to_string();
            state.loading = false;
            true
        });
        guard.armed = false;

        if !applied {
            debug!(generation, term, "Dropped response superseded by a newer reload");
        }
    }
}

impl HookInner {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

/// Clears `loading` when a reload ends without publishing a result: the
/// future was dropped (timeout, task abort) or the source panicked.
struct ReloadGuard {
    inner: Arc<HookInner>,
    generation: u64,
    armed: bool,
}

impl Drop for ReloadGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let generation = self.generation;
        let inner = &self.inner;
        let reset = inner.state.send_if_modified(|state| {
            if !inner.is_current(generation) {
                return false;
            }
            state.clashes = Vec::new();
            state.error = Some(GENERIC_ERROR_MESSAGE.to_string());
            state.loading = false;
            true
        });
        if reset {
            warn!(generation, "Reload abandoned before completing");
        }
    }
}
