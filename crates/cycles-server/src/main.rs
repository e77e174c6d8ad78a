//! Cycles Server — application entry point.

use cycles_board::BoardService;
use cycles_store::{ClerkConfig, ClerkProfileDirectory, LiveblocksConfig, LiveblocksRoomStore};
use tracing_subscriber::EnvFilter;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("cycles=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting Cycles server...");

    let liveblocks = LiveblocksConfig {
        base_url: env_or("LIVEBLOCKS_BASE_URL", &LiveblocksConfig::default().base_url),
        secret_key: env_or("LIVEBLOCKS_SECRET_KEY", ""),
        ..LiveblocksConfig::default()
    };
    let clerk = ClerkConfig {
        base_url: env_or("CLERK_BASE_URL", &ClerkConfig::default().base_url),
        secret_key: env_or("CLERK_SECRET_KEY", ""),
        ..ClerkConfig::default()
    };
    if liveblocks.secret_key.is_empty() || clerk.secret_key.is_empty() {
        tracing::error!("LIVEBLOCKS_SECRET_KEY and CLERK_SECRET_KEY must be set");
        std::process::exit(1);
    }

    let store = match LiveblocksRoomStore::new(liveblocks) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "failed to build document store client");
            std::process::exit(1);
        }
    };
    let directory = match ClerkProfileDirectory::new(clerk) {
        Ok(directory) => directory,
        Err(e) => {
            tracing::error!(error = %e, "failed to build profile directory client");
            std::process::exit(1);
        }
    };
    let _service = BoardService::new(store, directory);

    tracing::info!("Cycles server ready");

    // TODO: Mount the HTTP surface once the presentation layer lands

    tracing::info!("Cycles server stopped.");
}
