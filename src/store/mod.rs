pub mod disk;
pub mod memory;
pub mod metrics;

use crate::core::snapshot::DashboardDocument;
use async_trait::async_trait;

/// Persistence boundary for the dashboard document.
///
/// Implementations never surface storage failures: reads degrade to `None`
/// and writes are logged and swallowed, so the in-memory snapshot stays
/// authoritative for the rest of the session.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Loads the persisted document, or `None` when nothing usable is stored.
    async fn get_document(&self) -> Option<DashboardDocument>;

    /// Persists the document.
    async fn put_document(&self, doc: &DashboardDocument);

    /// Discards the persisted document.
    async fn clear(&self);
}
