//! # Application Wiring
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. AppConfig::load ──────────────────────────────────────────────────► │
//! │  2. init_tracing (configured filter, RUST_LOG wins) ──────────────────► │
//! │  3. AppComponent::bootstrap                                             │
//! │     • create the data directory, open SQLite, run migrations            │
//! │     • build the HTTP client from [api]                                  │
//! │     • Repositories ──► UseCases (Arc, shared by every screen)           │
//! │  4. AppComponent::root(saved state) ──► RootComponent                   │
//! │     • Home starts syncing the catalog as soon as it is created          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Constructors take their collaborators explicitly; there is no container.

use std::sync::Arc;

use multicourse_api::ApiClient;
use multicourse_core::navigation::StateKeeper;
use multicourse_db::{Database, DbConfig};
use multicourse_domain::Repositories;
use tracing::info;

use crate::config::{AppConfig, UiSettings};
use crate::error::ClientResult;
use crate::navigation::{Navigator, RootComponent};
use crate::usecases::UseCases;

/// What every view-model is built from.
#[derive(Clone)]
pub struct Dependencies {
    pub use_cases: Arc<UseCases>,
    pub navigator: Navigator,
    pub ui: UiSettings,
}

/// Long-lived process state.
pub struct AppComponent {
    pub config: AppConfig,
    pub db: Database,
    pub use_cases: Arc<UseCases>,
}

impl AppComponent {
    pub async fn bootstrap(config: AppConfig) -> ClientResult<Self> {
        let db_path = config.database_path()?;
        if let Some(dir) = db_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        info!(?db_path, "Database path determined");

        let db = Database::new(
            DbConfig::new(db_path).max_connections(config.database.max_connections),
        )
        .await?;
        let api = ApiClient::new(&config.api_config()?)?;

        let repositories = Repositories::new(db.clone(), api);
        let use_cases = Arc::new(UseCases::new(&repositories));
        info!(base_url = %config.api.base_url, "Application wired");

        Ok(AppComponent {
            config,
            db,
            use_cases,
        })
    }

    /// Builds the navigation tree, restoring it from `saved` when present.
    pub fn root(&self, saved: Option<&mut StateKeeper>) -> RootComponent {
        RootComponent::new(self.use_cases.clone(), self.config.ui.clone(), saved)
    }

    pub async fn shutdown(&self) {
        self.db.close().await;
        info!("Application shut down");
    }
}
