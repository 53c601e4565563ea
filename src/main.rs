use anyhow::Result;
use bizpulse::core::log::init_logging;
use bizpulse::store::metrics::ExportFormat;
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for bizpulse::AppCommand {
    fn from(cmd: Commands) -> bizpulse::AppCommand {
        match cmd {
            Commands::Dashboard => bizpulse::AppCommand::Dashboard,
            Commands::Profile => bizpulse::AppCommand::Profile,
            Commands::Settings { currency } => bizpulse::AppCommand::Settings { currency },
            Commands::Reset => bizpulse::AppCommand::Reset,
            Commands::Export { format } => bizpulse::AppCommand::Export(format),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the KPI dashboard
    Dashboard,
    /// Display profile scores
    Profile,
    /// Update display settings
    Settings {
        /// Currency code shown next to revenue figures
        #[arg(long)]
        currency: String,
    },
    /// Reset dashboard data to defaults
    Reset,
    /// Export the persisted dashboard document
    Export {
        /// Output format (json or csv)
        #[arg(long, default_value = "json")]
        format: ExportFormat,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => bizpulse::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = bizpulse::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
profile:
  business_name: ""
  business_type: ""
  location: ""
  region: ""
  description: ""

transactions:
  path: "transactions.json"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
