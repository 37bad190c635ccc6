//! In-memory [`ClashBackend`] for tests and local development.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use clashes_shared::{Clash, CreateClashInput, CreatedClash, PeerRef};

use crate::backend::ClashBackend;
use crate::error::{BackendError, Result};

pub struct FakeBackend {
    pub clashes: Mutex<Vec<Clash>>,
    pub created: Mutex<Vec<CreateClashInput>>,
    pub fetch_calls: AtomicU64,
    pub create_calls: AtomicU64,
    pub fail_reads: AtomicBool,
    pub fail_creates: AtomicBool,
    /// When set, `create_clash` answers without an id.
    pub omit_created_id: AtomicBool,
    pub read_delay: Option<Duration>,
    /// Id handed to the next created clash instead of a random one.
    pub assign_id: Option<String>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            clashes: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            fetch_calls: AtomicU64::new(0),
            create_calls: AtomicU64::new(0),
            fail_reads: AtomicBool::new(false),
            fail_creates: AtomicBool::new(false),
            omit_created_id: AtomicBool::new(false),
            read_delay: None,
            assign_id: None,
        }
    }
}

impl FakeBackend {
    pub fn with_clashes(clashes: Vec<Clash>) -> Self {
        Self {
            clashes: Mutex::new(clashes),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> u64 {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> u64 {
        self.create_calls.load(Ordering::SeqCst)
    }

    async fn before_read(&self) -> Result<()> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("read failure injected".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ClashBackend for FakeBackend {
    fn backend_tag(&self) -> &'static str {
        "fake"
    }

    async fn fetch_clashes(&self) -> Result<Vec<Clash>> {
        self.before_read().await?;
        Ok(self.clashes.lock().await.clone())
    }

    async fn fetch_clash(&self, id: &str) -> Result<Option<Clash>> {
        self.before_read().await?;
        let clashes = self.clashes.lock().await;
        Ok(clashes.iter().find(|c| c.id == id).cloned())
    }

    async fn create_clash(&self, input: &CreateClashInput) -> Result<CreatedClash> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("create failure injected".into()));
        }
        self.created.lock().await.push(input.clone());

        if self.omit_created_id.load(Ordering::SeqCst) {
            return Ok(CreatedClash {
                id: None,
                title: Some(input.title.clone()),
            });
        }

        let id = self
            .assign_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let creator = PeerRef {
            id: input.created_by_peer_id.clone(),
            name: String::new(),
        };
        let participants = input
            .participant_ids
            .iter()
            .map(|id| PeerRef {
                id: id.clone(),
                name: String::new(),
            })
            .collect();

        self.clashes.lock().await.push(Clash {
            id: id.clone(),
            title: Some(input.title.clone()),
            description: Some(input.description.clone()),
            location: input.location.clone(),
            address: input.address.clone(),
            date: input.date.clone(),
            picture_url: input.picture_url.clone(),
            created_by_peer: Some(creator),
            participants,
        });

        Ok(CreatedClash {
            id: Some(id),
            title: Some(input.title.clone()),
        })
    }
}
