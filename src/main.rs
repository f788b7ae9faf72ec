use anyhow::{Context, Result};
use railway_server::config::ServerConfig;
use railway_server::logging::init_logging;
use railway_server::server::run_server;
use railway_server::source::load_path;
use railway_server::store::ElementStore;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    let matches = ServerConfig::command().get_matches();
    let config = ServerConfig::from_matches(&matches)?;

    init_logging().context("Failed to initialise logging")?;

    info!("Initialising...");
    let elements = load_path(&config.data_path)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;
    let store = Arc::new(ElementStore::from_elements(elements));
    info!("Initialisation complete.");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.workers)
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run_server(store, &config))
}
