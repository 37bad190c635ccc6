//! # clashes-client
//!
//! Client side of the clash search pipeline:
//!
//! search input → [`debounce::Debouncer`] → [`hook::ClashesHook::reload`] →
//! [`source::ClashSource`] → state published on a `watch` channel →
//! [`view::ListView`].
//!
//! Nothing here depends on a UI framework. The owning session constructs a
//! hook, calls [`hook::ClashesHook::initialize`] once, and wires the search
//! input's callback to `reload`. [`session::Session`] does that wiring for
//! the terminal client.

pub mod config;
pub mod debounce;
pub mod history;
pub mod hook;
pub mod search;
pub mod session;
pub mod source;
pub mod state;
pub mod view;

mod error;

pub use config::ClientConfig;
pub use error::ClientError;
pub use hook::ClashesHook;
pub use state::ClashesState;
