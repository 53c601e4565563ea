pub mod cli;
pub mod core;
pub mod sources;
pub mod store;

use crate::core::config::{AppConfig, TransactionsConfig};
use crate::core::profile::ProfileSource;
use crate::core::snapshot::DashboardSettings;
use crate::core::transaction::TransactionSource;
use crate::sources::config_profile::ConfigProfileSource;
use crate::sources::file::FileTransactionSource;
use crate::sources::http::HttpTransactionSource;
use crate::store::StateStore;
use crate::store::disk::DiskStore;
use crate::store::memory::MemoryStore;
use crate::store::metrics::{ExportFormat, MetricsStore};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Commands the application can run after configuration is loaded.
pub enum AppCommand {
    Dashboard,
    Profile,
    Settings { currency: String },
    Reset,
    Export(ExportFormat),
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Business dashboard starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = build_store(&config)?;

    match command {
        AppCommand::Dashboard => cli::dashboard::run(&store).await,
        AppCommand::Profile => cli::profile::run(&store).await,
        AppCommand::Settings { currency } => {
            store.update_settings(DashboardSettings { currency }).await;
            println!("Settings updated.");
            Ok(())
        }
        AppCommand::Reset => {
            store.reset_to_defaults().await;
            println!("Dashboard data reset to defaults.");
            Ok(())
        }
        AppCommand::Export(format) => {
            let exported = store.export_data(format).await?;
            println!("{exported}");
            Ok(())
        }
    }
}

/// Wires the configured sources and persistence into a metrics store.
fn build_store(config: &AppConfig) -> Result<MetricsStore> {
    let transactions: Arc<dyn TransactionSource> = match &config.transactions {
        Some(TransactionsConfig::Http(http)) => Arc::new(HttpTransactionSource::new(&http.base_url)),
        Some(TransactionsConfig::File(file)) => Arc::new(FileTransactionSource::new(&file.path)),
        None => Arc::new(FileTransactionSource::new("transactions.json")),
    };
    let profile: Arc<dyn ProfileSource> = Arc::new(ConfigProfileSource::new(config.profile.clone()));

    let state_path = config.default_data_path()?.join("state");
    let state: Arc<dyn StateStore> = match DiskStore::open(&state_path) {
        Ok(disk) => Arc::new(disk),
        Err(e) => {
            warn!(error = %e, "Persistent store unavailable; state will not survive this session");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(MetricsStore::new(transactions, profile, state))
}
