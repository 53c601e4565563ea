//! Core business logic abstractions

pub mod config;
pub mod kpi;
pub mod log;
pub mod profile;
pub mod scores;
pub mod snapshot;
pub mod transaction;

// Re-export main types for cleaner imports
pub use kpi::KpiSnapshot;
pub use profile::{BusinessProfile, ProfileSource};
pub use scores::{GrowthPotential, ProfileScores};
pub use snapshot::{DashboardDocument, DashboardSettings, DataOrigin};
pub use transaction::{Transaction, TransactionSource};
