//! Debounced search input.

use std::time::Duration;

use tracing::debug;

use crate::debounce::Debouncer;

/// Text box that reports its contents through `on_filter` once typing
/// pauses.
///
/// Keystrokes are debounced. `clear` empties the box and fires `""` at
/// once. While disabled (a load is in flight) input is ignored.
pub struct SearchInput {
    search_term: String,
    enabled: bool,
    debouncer: Debouncer,
}

impl SearchInput {
    pub fn new(delay: Duration, on_filter: impl Fn(String) + Send + Sync + 'static) -> Self {
        Self {
            search_term: String::new(),
            enabled: true,
            debouncer: Debouncer::new(delay, on_filter),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Replace the box contents as if typed. Returns `false` when ignored.
    pub fn on_input(&mut self, value: impl Into<String>) -> bool {
        if !self.enabled {
            debug!("Search input disabled, ignoring keystroke");
            return false;
        }
        self.search_term = value.into();
        self.debouncer.schedule(self.search_term.clone());
        true
    }

    /// Empty the box and fire `""` without waiting.
    pub fn clear(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.search_term.clear();
        self.debouncer.fire_now(String::new());
        true
    }

    /// Show `term` without firing, e.g. after history navigation already
    /// triggered the reload. Any pending call is dropped.
    pub fn replace_term(&mut self, term: impl Into<String>) {
        self.debouncer.cancel();
        self.search_term = term.into();
    }

    pub fn has_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    fn input() -> (SearchInput, Arc<Mutex<Vec<String>>>) {
        let fired: Arc<Mutex<Vec<String>>> = Arc::default();
        let sink = fired.clone();
        let input = SearchInput::new(Duration::from_millis(300), move |term| {
            sink.lock().unwrap().push(term);
        });
        (input, fired)
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_is_debounced() {
        let (mut input, fired) = input();
        input.on_input("b");
        input.on_input("bo");
        input.on_input("bow");
        assert_eq!(input.search_term(), "bow");
        assert!(fired.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["bow".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_fires_immediately_and_cancels_pending() {
        let (mut input, fired) = input();
        input.on_input("bowling");
        assert!(input.clear());
        assert_eq!(input.search_term(), "");
        assert_eq!(*fired.lock().unwrap(), vec![String::new()]);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(fired.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_input_ignores_keystrokes() {
        let (mut input, fired) = input();
        input.set_enabled(false);
        assert!(!input.on_input("x"));
        assert!(!input.clear());
        assert_eq!(input.search_term(), "");

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_term_does_not_fire() {
        let (mut input, fired) = input();
        input.on_input("old");
        input.replace_term("restored");
        assert!(!input.has_pending());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(fired.lock().unwrap().is_empty());
        assert_eq!(input.search_term(), "restored");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_input_cancels_pending_call() {
        let (mut input, fired) = input();
        input.on_input("unmounting");
        drop(input);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(fired.lock().unwrap().is_empty());
    }
}
