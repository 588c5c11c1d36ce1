//! Field Journal server.
//!
//! Main entry point that wires the crates together and starts the dashboard
//! and ingest listeners.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use journal_api::{AppState, build_dashboard_app, build_ingest_app, serve};
use journal_core::config::AppConfig;
use journal_service::{IngestService, ReportService};
use journal_storage::LocalReportStore;

/// Field Journal: field work report upload and dashboard server
#[derive(Debug, Parser)]
#[command(name = "journal-server", version, about, long_about = None)]
struct Cli {
    /// Configuration environment; loads `config/<env>.toml` over the defaults
    #[arg(long, env = "JOURNAL_ENV", default_value = "development")]
    config_env: String,

    /// Dashboard listener port
    #[arg(long, env = "JOURNAL_PORT")]
    port: Option<u16>,

    /// Upload listener port
    #[arg(long)]
    upload_port: Option<u16>,

    /// Directory holding the report folders
    #[arg(long)]
    reports_root: Option<String>,

    /// Which listeners to run (default: both)
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// Run the dashboard and upload listeners in one process
    Serve,
    /// Run only the dashboard listener
    Dashboard,
    /// Run only the upload listener
    Ingest,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config_env).context("Failed to load configuration")?;
    apply_overrides(&mut config, &cli);

    init_logging(&config);

    run(config, cli.command.unwrap_or(Command::Serve)).await
}

/// Command-line flags win over every configuration source.
fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(port) = cli.upload_port {
        config.ingest.port = port;
    }
    if let Some(ref root) = cli.reports_root {
        config.storage.reports_root = root.clone();
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig, command: Command) -> anyhow::Result<()> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        reports_root = %config.storage.reports_root,
        "Starting Field Journal"
    );

    let store = Arc::new(
        LocalReportStore::new(&config.storage)
            .await
            .context("Failed to open reports root")?,
    );
    tracing::info!(root = %store.root().display(), "Report store ready");

    let dashboard_addr = (config.server.host.clone(), config.server.port);
    let ingest_addr = (config.ingest.host.clone(), config.ingest.port);

    let state = AppState::new(
        config,
        ReportService::new(store.clone()),
        IngestService::new(store),
    );

    let dashboard = async {
        let app = build_dashboard_app(state.clone());
        serve("dashboard", app, &dashboard_addr.0, dashboard_addr.1).await
    };
    let ingest = async {
        let app = build_ingest_app(state.clone());
        serve("ingest", app, &ingest_addr.0, ingest_addr.1).await
    };

    match command {
        Command::Serve => {
            tokio::try_join!(dashboard, ingest)?;
        }
        Command::Dashboard => dashboard.await?,
        Command::Ingest => ingest.await?,
    }

    tracing::info!("Field Journal stopped");
    Ok(())
}
