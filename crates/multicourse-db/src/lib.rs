//! # multicourse-db: Local Storage for the Ordering Client
//!
//! SQLite storage for the catalog, cart, favourites and order preferences,
//! using sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  multicourse-domain repositories                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  multicourse-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   Database (pool.rs) ──► DAOs (repository/) ──► ChangeFeed      │   │
//! │  │   Migrations (embedded: 001_initial_schema, 002_menu_fts)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  multicourse.db (WAL mode, FTS5)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use multicourse_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/multicourse.db")).await?;
//! let categories = db.catalog().non_empty_categories().await?;
//! ```

pub mod changes;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use changes::{ChangeFeed, Table};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::cart::CartDao;
pub use repository::catalog::CatalogDao;
pub use repository::favourite::FavouriteDao;
pub use repository::menu::MenuDao;
pub use repository::preferences::PreferenceStore;
pub use repository::restaurant::RestaurantDao;
