use anyhow::{anyhow, bail, Context};
use std::env;
use std::io;
use std::process;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rusty_remit::api::{self, AppState};
use rusty_remit::metrics::TransferMetrics;
use rusty_remit::settings::AppConfig;
use rusty_remit::{run_async, LedgerStore, TransferEngine};

const USAGE: &str = "Usage: rusty-remit [serve | replay <transfers.csv>]";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so replay output on stdout stays clean CSV
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rusty_remit=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run_app().await {
        error!("{err:#}");
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run_app() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = AppConfig::load().context("failed to load configuration")?;
    let accounts = config
        .initial_accounts()
        .context("failed to load initial balances")?;
    let store = Arc::new(LedgerStore::new(accounts));
    info!(accounts = store.len(), "ledger seeded");
    let engine = TransferEngine::new(store);

    match args.get(1).map(String::as_str) {
        None | Some("serve") => {
            let addr = config.bind_address();
            let listener = TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            info!(%addr, "server listening");

            let metrics = TransferMetrics::new().context("failed to register metrics")?;
            let state = AppState {
                engine: Arc::new(engine),
                metrics: Arc::new(metrics),
            };
            api::serve(listener, state).await?;
            Ok(())
        }
        Some("replay") => {
            let input = args.get(2).context(USAGE)?;
            run_async(engine, input, io::stdout())
                .await
                .map_err(|err| anyhow!(err))
        }
        Some(_) => bail!(USAGE),
    }
}
