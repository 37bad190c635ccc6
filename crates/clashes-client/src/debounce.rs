//! Trailing-edge debouncer with explicit cancellation.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

type Callback = Arc<dyn Fn(String) + Send + Sync>;

/// Holds at most one scheduled callback.
///
/// Each [`schedule`](Debouncer::schedule) replaces the pending call, so only
/// the last term within a quiet period fires. Dropping the debouncer cancels
/// whatever is still pending.
///
/// Must be used from within a tokio runtime.
pub struct Debouncer {
    delay: Duration,
    on_fire: Callback,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration, on_fire: impl Fn(String) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            on_fire: Arc::new(on_fire),
            pending: None,
        }
    }

    /// Fire `on_fire(term)` after the quiet period unless replaced or
    /// cancelled first.
    pub fn schedule(&mut self, term: String) {
        self.cancel();

        let on_fire = self.on_fire.clone();
        let delay = self.delay;
        trace!(term = %term, ?delay, "Scheduling debounced call");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire(term);
        }));
    }

    /// Cancel the pending call. Returns `true` if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    /// Cancel anything pending and fire immediately.
    pub fn fire_now(&mut self, term: String) {
        self.cancel();
        (self.on_fire)(term);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
