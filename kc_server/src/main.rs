//! Knockout cup tournament server.
//!
//! Serves one tournament over HTTP. State lives in memory, or in a JSON
//! snapshot file when one is configured, and survives restarts in that case.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Error;
use kc_server::{
    api,
    config::ServerConfig,
    logging, metrics,
};
use knockout_cup::{JsonFileStore, MemoryStore, Roster, TournamentManager, TournamentStore};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Run a knockout cup tournament server

USAGE:
  kc_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:5000]
  --data-file  PATH        JSON snapshot file          [default: env TOURNAMENT_DATA_FILE or in-memory]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  TOURNAMENT_AUTH_CODE     Code required to start or reset the tournament
  TOURNAMENT_ROSTER        Comma-separated player names
  ENTRY_FEE_CENTS          Entry fee per confirmed player  [default: 1000]
  BONUS_PER_WIN_CENTS      Bonus per non-final win         [default: 200]
  DRAW_SEED                Fixed seed for the opening draw
  DRAW_ORDERED             Draw in roster order when true
  METRICS_BIND             Prometheus scrape address
  (See .env file for all configuration options)
";

struct Args {
    bind: Option<SocketAddr>,
    data_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        data_file: pargs
            .opt_value_from_str::<_, String>("--data-file")?
            .map(PathBuf::from),
    };

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.data_file)?;
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        info!("Prometheus metrics exported at http://{}/metrics", addr);
    }

    let store: Arc<dyn TournamentStore> = match &config.data_file {
        Some(path) => {
            info!("Persisting tournament to {}", path.display());
            Arc::new(JsonFileStore::new(path.clone()))
        }
        None => {
            info!("No data file configured; tournament state is in-memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let manager = TournamentManager::open(
        store,
        config.auth_code.clone(),
        Roster::new(config.roster.iter().map(String::as_str)),
        config.settings,
    )
    .await
    .map_err(|e| anyhow::anyhow!("Failed to open tournament: {}", e))?;

    let overview = manager.overview().await;
    info!(
        "Tournament ready: {:?}, {} player(s) on the roster, {} confirmed",
        overview.status,
        manager.players().await.len(),
        overview.confirmed_count
    );
    metrics::confirmed_players(overview.confirmed_count);

    let app = api::create_router(api::AppState { manager });

    info!("Starting HTTP server on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
}
