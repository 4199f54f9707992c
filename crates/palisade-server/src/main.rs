//! CLI entry point for the palisade-server daemon.

use clap::Parser;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::{fmt, EnvFilter};

use palisade_ingest::FeedScheduler;
use palisade_store::MemoryStore;

use palisade_server::sweep::Sweeper;
use palisade_server::{config, notify, routes, AppState};

#[derive(Parser)]
#[command(name = "palisade-server")]
#[command(about = "EDL publishing daemon for the Palisade block lists")]
struct Cli {
    /// Config file prefix (default: palisade).
    #[arg(short, long, default_value = "palisade")]
    config: String,

    /// Override the listen address from config.
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();
    let mut server_config = config::load(&cli.config)?;
    if let Some(listen) = cli.listen {
        server_config.listen_addr = listen;
    }

    // Store + notification channel.
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let store = MemoryStore::new().with_events(events_tx);
    let holding = config::seed_store(&store, &server_config)?;
    tracing::info!(holding = %holding.name, "Store seeded");

    tokio::spawn(notify::run(events_rx));

    // Expiry sweep with graceful shutdown.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = Sweeper::new(store.clone(), server_config.sweep_interval_secs);
    tokio::spawn(async move { sweeper.run(shutdown_rx).await });

    // Feed pulls.
    if !server_config.feeds.is_empty() {
        let scheduler = FeedScheduler::new(store.clone(), holding.id, server_config.feeds.clone());
        tokio::spawn(async move { scheduler.run().await });
    }

    let app = routes::build_router(AppState { store });
    let listener = tokio::net::TcpListener::bind(&server_config.listen_addr).await?;
    tracing::info!(addr = %server_config.listen_addr, "HTTP listener started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await?;

    Ok(())
}

/// Wait for ctrl-c, then flip the shutdown signal so the sweeper can
/// finish its in-flight pass before the process exits.
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown handler");
        return;
    }
    tracing::info!("Shutdown signal received");
    let _ = shutdown_tx.send(true);
}
