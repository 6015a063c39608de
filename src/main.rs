use std::sync::{Arc, Mutex};

use tracing::{error, info};

use tripcast::config::load_config;
use tripcast::persistence::LocationStore;
use tripcast::relay::Relay;
use tripcast::transport::{AppState, start_server};
use tripcast::utils::error::RelayError;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tripcast::utils::logging::init("info");

    if let Err(e) = run().await {
        error!("Tracking server failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), RelayError> {
    let settings = load_config()?;

    let relay = Arc::new(Mutex::new(Relay::new()));
    let store = LocationStore::new(&settings.store)?;
    let state = AppState::new(relay, store, settings.relay.route_by_booking);

    tokio::select! {
        res = start_server(&settings, state) => res,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
            Ok(())
        }
    }
}
