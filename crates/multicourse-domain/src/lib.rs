//! # multicourse-domain: Use Cases over Repositories
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apps/client view-models                                                │
//! │       │ execute()                                                       │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              multicourse-domain (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   usecase/  ──► repository traits ──► Sqlite*/Remote* impls     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  multicourse-db                      multicourse-api                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Use cases see only `Arc<dyn …Repository>`; [`Repositories::new`] wires the
//! production implementations, and the `testing` feature provides fakes.

pub mod repository;
pub mod usecase;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use std::sync::Arc;

use multicourse_api::ApiClient;
use multicourse_db::Database;

use repository::{
    CartRepository, DeliveryRepository, FavouriteRepository, MenuRepository, OrderRepository,
    RemoteDeliveryRepository, RemoteOrderRepository, RemoteRestaurantRepository,
    RestaurantRepository, SqliteCartRepository, SqliteFavouriteRepository, SqliteMenuRepository,
};

/// One handle per repository area.
#[derive(Clone)]
pub struct Repositories {
    pub cart: Arc<dyn CartRepository>,
    pub favourites: Arc<dyn FavouriteRepository>,
    pub menu: Arc<dyn MenuRepository>,
    pub order: Arc<dyn OrderRepository>,
    pub delivery: Arc<dyn DeliveryRepository>,
    pub restaurant: Arc<dyn RestaurantRepository>,
}

impl Repositories {
    pub fn new(db: Database, api: ApiClient) -> Self {
        Repositories {
            cart: Arc::new(SqliteCartRepository::new(db.clone())),
            favourites: Arc::new(SqliteFavouriteRepository::new(db.clone())),
            menu: Arc::new(SqliteMenuRepository::new(db.clone())),
            order: Arc::new(RemoteOrderRepository::new(api.clone(), db.clone())),
            delivery: Arc::new(RemoteDeliveryRepository::new(api.clone())),
            restaurant: Arc::new(RemoteRestaurantRepository::new(api, db)),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl From<&testing::FakeRepositories> for Repositories {
    fn from(fakes: &testing::FakeRepositories) -> Self {
        Repositories {
            cart: fakes.cart(),
            favourites: fakes.favourites(),
            menu: fakes.menu(),
            order: fakes.order(),
            delivery: fakes.delivery(),
            restaurant: fakes.restaurant(),
        }
    }
}
