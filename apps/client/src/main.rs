//! # Multicourse Entry Point
//!
//! Headless run of the client: boots the application, lets the Home screen
//! sync the catalog, prints the menu and exits.
//!
//! ## Startup Sequence
//! 1. Load configuration (optional path as the first argument)
//! 2. Initialize tracing from `[logging] filter` (or `RUST_LOG`)
//! 3. Bootstrap: data directory, SQLite, HTTP client, use cases
//! 4. Build the navigation tree; Home starts loading
//! 5. Print categories and menu, then shut down

use std::path::PathBuf;
use std::process::ExitCode;

use tokio::time::{timeout, Duration};
use tracing::{error, info, warn};

use multicourse_client::navigation::ScreenChild;
use multicourse_client::{init_tracing, AppComponent, AppConfig, ClientResult};

const STARTUP_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match AppConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("multicourse: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging.filter);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting Multicourse");

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Multicourse failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> ClientResult<()> {
    let app = AppComponent::bootstrap(config).await?;
    let root = app.root(None);

    if let ScreenChild::Home(home) = root.active_screen() {
        let mut updates = home.subscribe();
        let loaded = timeout(STARTUP_TIMEOUT, updates.wait_for(|s| !s.is_loading))
            .await
            .is_ok_and(|r| r.is_ok());
        if !loaded {
            warn!("Home screen did not finish loading in time");
        }

        let state = home.state();
        if let Some(message) = &state.error_message {
            println!("! {message}");
        }
        for category in &state.categories {
            let marker = if category.selected { '*' } else { ' ' };
            println!("{marker} {}", category.category.name);
        }
        for item in &state.menu_items {
            println!("    {:<32} {}", item.name, state.currency.format(item.price));
        }
    }

    app.shutdown().await;
    Ok(())
}
