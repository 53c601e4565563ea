use crate::core::snapshot::DashboardDocument;
use crate::store::StateStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory document store. Used in tests and as the fallback when the
/// on-disk store cannot be opened.
pub struct MemoryStore {
    inner: Arc<Mutex<Option<DashboardDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get_document(&self) -> Option<DashboardDocument> {
        let doc = self.inner.lock().await.clone();
        if doc.is_some() {
            debug!("State HIT in memory store");
        } else {
            debug!("State MISS in memory store");
        }
        doc
    }

    async fn put_document(&self, doc: &DashboardDocument) {
        debug!("State PUT in memory store");
        *self.inner.lock().await = Some(doc.clone());
    }

    async fn clear(&self) {
        debug!("State CLEAR in memory store");
        *self.inner.lock().await = None;
    }
}
