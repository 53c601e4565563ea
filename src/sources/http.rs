use crate::core::transaction::{Transaction, TransactionSource};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

/// Fetches the transaction log from a backend endpoint returning a JSON
/// array at `GET {base_url}/transactions`.
///
/// Network failures propagate as errors; the metrics store treats them the
/// same as an empty log.
pub struct HttpTransactionSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransactionSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TransactionSource for HttpTransactionSource {
    async fn list_all(&self) -> Result<Vec<Transaction>> {
        let url = format!("{}/transactions", self.base_url);
        debug!(%url, "Fetching transaction log");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach transaction backend at {url}"))?
            .error_for_status()
            .context("Transaction backend returned an error status")?;

        let transactions: Vec<Transaction> = response
            .json()
            .await
            .context("Failed to parse transaction response")?;
        debug!(count = transactions.len(), "Fetched transaction log");
        Ok(transactions)
    }
}
