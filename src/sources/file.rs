use crate::core::transaction::{Transaction, TransactionSource};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads the transaction log from a JSON array file.
///
/// A missing file means no transactions have been recorded yet, which is
/// missing input rather than an error. An unparseable file is logged and
/// treated the same way.
pub struct FileTransactionSource {
    path: PathBuf,
}

impl FileTransactionSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl TransactionSource for FileTransactionSource {
    async fn list_all(&self) -> Result<Vec<Transaction>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Transaction file missing; treating as empty log");
            return Ok(Vec::new());
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| {
                format!("Failed to read transaction file: {}", self.path.display())
            })?;

        match serde_json::from_str(&raw) {
            Ok(transactions) => Ok(transactions),
            Err(e) => {
                warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Unreadable transaction log; treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }
}
