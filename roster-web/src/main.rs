//! roster-web - Member roster service
//!
//! Fetches members and group photos from the content API at startup and
//! serves the year-by-year roster page.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use roster_common::config::RosterConfig;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_web::api::buildinfo::BuildInfo;
use roster_web::source::ContentApiClient;
use roster_web::{build_router, spawn_initial_load, AppState};

/// Command-line arguments for roster-web
#[derive(Parser, Debug)]
#[command(name = "roster-web")]
#[command(about = "Member roster service")]
#[command(version)]
struct Args {
    /// Config file (overrides ROSTER_CONFIG and the platform default)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "ROSTER_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "ROSTER_BIND_ADDRESS")]
    bind_address: Option<String>,

    /// Content API project id
    #[arg(long, env = "ROSTER_PROJECT_ID")]
    project_id: Option<String>,

    /// Content API dataset
    #[arg(long, env = "ROSTER_DATASET")]
    dataset: Option<String>,
}

impl Args {
    /// Command-line and environment values win over the config file
    fn apply(self, mut config: RosterConfig) -> Result<RosterConfig> {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(bind_address) = self.bind_address {
            config.bind_address = bind_address;
        }
        if let Some(project_id) = self.project_id {
            config.project_id = project_id;
        }
        if let Some(dataset) = self.dataset {
            config.dataset = dataset;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let file_config =
        RosterConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let config = args.apply(file_config).context("Invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=info", config.logging.level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before any network delay
    info!("Starting {}", BuildInfo::current());

    let source = ContentApiClient::from_config(&config).context("Failed to create content API client")?;
    info!("Content API: {}", source.endpoint());
    info!(
        floor_year = config.floor_year,
        default_year = config.default_year,
        visibility_policy = ?config.visibility_policy,
        "Roster policy"
    );

    let state = AppState::from_config(&config);
    spawn_initial_load(state.clone(), Arc::new(source));

    let app = build_router(state);

    let address = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("roster-web listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
