//! One interactive search session: the search box, its `?q=` history and the
//! hook it drives.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use crate::history::QueryHistory;
use crate::hook::ClashesHook;
use crate::search::SearchInput;
use crate::view::ListView;

pub const BUSY_NOTICE: &str = "(busy, try again)";
pub const NO_HISTORY_NOTICE: &str = "(no further history)";

/// A line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Clear,
    Retry,
    Back,
    Forward,
    /// Anything else replaces the search box contents.
    Search(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":quit" => Command::Quit,
            ":clear" => Command::Clear,
            ":retry" => Command::Retry,
            ":back" => Command::Back,
            ":forward" => Command::Forward,
            _ => Command::Search(line.to_string()),
        }
    }
}

pub struct Session {
    hook: ClashesHook,
    input: SearchInput,
    history: Arc<Mutex<QueryHistory>>,
}

impl Session {
    /// Wire a debounced search box to `hook`. Every term the box fires is
    /// recorded in the history and reloaded.
    pub fn new(hook: ClashesHook, debounce: Duration) -> Self {
        let history = Arc::new(Mutex::new(QueryHistory::new()));

        let on_filter = {
            let hook = hook.clone();
            let history = history.clone();
            move |term: String| {
                lock(&history).push(&term);
                hook.spawn_reload(term);
            }
        };

        Self {
            hook,
            input: SearchInput::new(debounce, on_filter),
            history,
        }
    }

    pub fn hook(&self) -> &ClashesHook {
        &self.hook
    }

    pub fn search_term(&self) -> &str {
        self.input.search_term()
    }

    /// Shareable location of the current history entry.
    pub fn location(&self) -> String {
        lock(&self.history).location()
    }

    /// Apply one command. Returns a notice for the user when the command
    /// had no visible effect. `Quit` is left to the caller.
    pub fn handle(&mut self, command: Command) -> Option<String> {
        self.input
            .set_enabled(ListView::from_state(&self.hook.snapshot()).filter_enabled());

        match command {
            Command::Quit => None,
            Command::Clear => (!self.input.clear()).then(|| BUSY_NOTICE.to_string()),
            Command::Retry => {
                self.navigate(String::new(), true);
                None
            }
            Command::Back | Command::Forward => {
                let term = {
                    let mut history = lock(&self.history);
                    let term = if command == Command::Back {
                        history.back()
                    } else {
                        history.forward()
                    };
                    term.map(str::to_string)
                };
                match term {
                    Some(term) => {
                        self.navigate(term, false);
                        None
                    }
                    None => Some(NO_HISTORY_NOTICE.to_string()),
                }
            }
            Command::Search(line) => {
                (!self.input.on_input(line)).then(|| BUSY_NOTICE.to_string())
            }
        }
    }

    /// Show `term` in the box and reload it now, skipping the debounce.
    fn navigate(&mut self, term: String, record: bool) {
        debug!(%term, record, "Navigating search session");
        self.input.replace_term(term.clone());
        if record {
            lock(&self.history).push(&term);
        }
        self.hook.spawn_reload(term);
    }
}

fn lock(history: &Mutex<QueryHistory>) -> MutexGuard<'_, QueryHistory> {
    history.lock().unwrap_or_else(PoisonError::into_inner)
}
