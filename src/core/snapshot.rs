//! The persisted dashboard document and its built-in defaults.

use crate::core::kpi::KpiSnapshot;
use crate::core::scores::ProfileScores;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current document schema version. Documents with any other version are
/// treated as corrupt and reinitialized.
pub const DOCUMENT_VERSION: u32 = 1;

/// Display settings owned by this engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSettings {
    pub currency: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            currency: "GHS".to_string(),
        }
    }
}

/// The single JSON document held under one storage key.
///
/// This engine owns and evolves `kpis`, `profile`, and `settings`. The
/// `assessment` and `bootcamp` sub-documents belong to other parts of the
/// app and are carried through updates verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDocument {
    pub version: u32,
    pub kpis: KpiSnapshot,
    pub profile: ProfileScores,
    #[serde(default)]
    pub assessment: serde_json::Value,
    #[serde(default)]
    pub bootcamp: serde_json::Value,
    #[serde(default)]
    pub settings: DashboardSettings,
}

impl DashboardDocument {
    /// The fixed built-in default document, with the zeroed monthly series
    /// anchored at `now`.
    pub fn default_at(now: DateTime<Utc>) -> Self {
        DashboardDocument {
            version: DOCUMENT_VERSION,
            kpis: KpiSnapshot::default_at(now),
            profile: ProfileScores::default(),
            assessment: serde_json::Value::Null,
            bootcamp: serde_json::Value::Null,
            settings: DashboardSettings::default(),
        }
    }
}

/// Where a returned snapshot came from. Presentation may inspect this flag;
/// degraded data quality is otherwise silent by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Computed from live sources in this pass.
    Real,
    /// Served from the persisted snapshot because live sources were empty.
    Cached,
    /// The built-in default; nothing live or persisted was available.
    Default,
}
