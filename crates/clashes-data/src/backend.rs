use async_trait::async_trait;

use clashes_shared::{Clash, CreateClashInput, CreatedClash};

use crate::error::Result;

/// Source of clash records and sink for create mutations.
#[async_trait]
pub trait ClashBackend: Send + Sync {
    /// Short label used in log lines.
    fn backend_tag(&self) -> &'static str;

    /// Complete, unfiltered list in backend order. Never served from a cache.
    async fn fetch_clashes(&self) -> Result<Vec<Clash>>;

    /// A single clash, `None` when the id is unknown.
    async fn fetch_clash(&self, id: &str) -> Result<Option<Clash>>;

    async fn create_clash(&self, input: &CreateClashInput) -> Result<CreatedClash>;
}
