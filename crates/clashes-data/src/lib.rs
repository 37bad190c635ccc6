//! # clashes-data
//!
//! Data access for Clashes. The GraphQL service sits behind the
//! [`ClashBackend`] trait so callers receive an explicitly constructed
//! backend instead of reaching for a global client. Actions built on top of
//! it implement list filtering and the create-clash submission flow.

pub mod actions;
pub mod backend;
pub mod fake;
pub mod graphql;

mod error;

pub use actions::{create_clash, fetch_clash, filter_clashes, CreateOutcome, SubmissionPhase};
pub use backend::ClashBackend;
pub use error::BackendError;
pub use fake::FakeBackend;
pub use graphql::GraphqlClient;
