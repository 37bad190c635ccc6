//! # clashes-shared
//!
//! Types and pure logic shared by the Clashes server and client: the clash
//! read model, the title/description search filter, create-input
//! validation, the JSON envelope returned by the REST accessor, and the
//! error taxonomy.

pub mod constants;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod input;
pub mod types;

pub use envelope::Envelope;
pub use error::{ClashError, FieldErrors};
pub use filter::{filter_clashes, normalize_term};
pub use input::{CreateClashForm, CreateClashInput};
pub use types::{Clash, ClashId, CreatedClash, PeerRef};
