use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api_server::http::{self, AppState};
use facet_core::FactStore;

/// REST facade for the fact dimension store
#[derive(Debug, Parser)]
#[command(name = "facet-api", version, about = "REST facade for the fact dimension store")]
struct Args {
    /// SQLite database path (falls back to FACET_DB, then facet.db)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Bind address (falls back to FACET_BIND, then 127.0.0.1:8080)
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let db = args
        .db
        .or_else(|| std::env::var("FACET_DB").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("facet.db"));
    let bind = match args.bind {
        Some(bind) => bind,
        None => match std::env::var("FACET_BIND") {
            Ok(raw) => raw.parse().context("invalid FACET_BIND address")?,
            Err(_) => SocketAddr::from(([127, 0, 0, 1], 8080)),
        },
    };

    let store =
        FactStore::open(&db).with_context(|| format!("failed to open database {}", db.display()))?;
    let state = AppState::new(store);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(%bind, db = %db.display(), "facet api listening");

    axum::serve(listener, http::router(state))
        .await
        .context("server terminated")?;
    Ok(())
}
