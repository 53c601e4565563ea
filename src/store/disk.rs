use crate::core::snapshot::{DOCUMENT_VERSION, DashboardDocument};
use crate::store::StateStore;
use anyhow::Result;
use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle};
use std::path::Path;
use tracing::{debug, warn};

const STATE_KEY: &str = "dashboard";

/// Fjall-backed document store. The whole dashboard document lives as one
/// JSON value under a single key.
pub struct DiskStore {
    partition: PartitionHandle,
    _keyspace: Keyspace,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;
        let keyspace = Config::new(path).open()?;
        let partition = keyspace.open_partition("state", PartitionCreateOptions::default())?;
        Ok(Self {
            partition,
            _keyspace: keyspace,
        })
    }
}

#[async_trait]
impl StateStore for DiskStore {
    async fn get_document(&self) -> Option<DashboardDocument> {
        let res: Result<Option<DashboardDocument>> = (|| {
            let Some(bytes) = self.partition.get(STATE_KEY)? else {
                debug!("State MISS on disk");
                return Ok(None);
            };
            let doc: DashboardDocument = serde_json::from_slice(&bytes)?;
            if doc.version != DOCUMENT_VERSION {
                warn!(
                    version = doc.version,
                    "Discarding persisted state with unsupported version"
                );
                return Ok(None);
            }
            debug!("State HIT on disk");
            Ok(Some(doc))
        })();

        match res {
            Ok(doc) => doc,
            Err(e) => {
                // Unparseable state is recovered from, never fatal.
                warn!(error = %e, "Discarding unreadable persisted state");
                None
            }
        }
    }

    async fn put_document(&self, doc: &DashboardDocument) {
        let res: Result<()> = (|| {
            let bytes = serde_json::to_vec(doc)?;
            self.partition.insert(STATE_KEY, bytes)?;
            debug!("State PUT on disk");
            Ok(())
        })();
        if let Err(e) = res {
            warn!(error = %e, "Failed to persist dashboard state; keeping in-memory snapshot");
        }
    }

    async fn clear(&self) {
        if let Err(e) = self.partition.remove(STATE_KEY) {
            warn!(error = %e, "Failed to clear persisted state");
        }
    }
}
