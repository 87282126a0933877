use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use leadgen::api::create_router;
use leadgen::config::{Config, load_env_file};
use leadgen::orchestrator::LeadFinder;

#[derive(Parser, Debug)]
#[command(name = "leadgen", about = "Lead generation search API")]
struct Args {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Load environment from this file instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    load_env_file(args.env_file.as_deref())?;

    let level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|l| l.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Bridge log crate -> tracing (so log::info! etc. work)
    tracing_log::LogTracer::init()?;

    let mut config = Config::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    config.log_summary();

    let lead_finder = LeadFinder::from_config(&config)?;
    let missing = lead_finder.missing_credentials();
    if !missing.is_empty() {
        tracing::warn!(
            "missing credentials: {}; searches will fail until they are set",
            missing.join(", ")
        );
    }

    let app = create_router(Arc::new(lead_finder), &config);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
