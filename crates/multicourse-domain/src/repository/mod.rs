//! # Repository Traits
//!
//! One trait per area. Use cases depend only on these; the concrete
//! implementations compose local storage and the remote API.
//!
//! ```text
//! ┌──────────────────────┬──────────────────────────────┬─────────────────┐
//! │ Trait                │ Implementation               │ Sources         │
//! ├──────────────────────┼──────────────────────────────┼─────────────────┤
//! │ CartRepository       │ SqliteCartRepository         │ SQLite          │
//! │ FavouriteRepository  │ SqliteFavouriteRepository    │ SQLite          │
//! │ MenuRepository       │ SqliteMenuRepository         │ SQLite          │
//! │ OrderRepository      │ RemoteOrderRepository        │ prefs + HTTP    │
//! │ DeliveryRepository   │ RemoteDeliveryRepository     │ HTTP            │
//! │ RestaurantRepository │ RemoteRestaurantRepository   │ HTTP + SQLite   │
//! └──────────────────────┴──────────────────────────────┴─────────────────┘
//! ```
//!
//! Every method returns [`CoreResult`]; storage and transport failures are
//! already folded into [`CoreError::Data`](multicourse_core::CoreError::Data).

pub mod local;
pub mod remote;

use async_trait::async_trait;
use multicourse_core::{
    AboutInfo, Address, CartItem, Category, CoreResult, CreateOrderParams, CreatedOrderInfo,
    DeliveryAddressInfo, DeliveryCost, DeliveryInfo, MenuItem, OrderItem, PriceCurrency,
    RestaurantInfo,
};
use tokio::sync::watch;
use uuid::Uuid;

pub use local::{SqliteCartRepository, SqliteFavouriteRepository, SqliteMenuRepository};
pub use remote::{RemoteDeliveryRepository, RemoteOrderRepository, RemoteRestaurantRepository};

/// Version counter that ticks whenever the observed data changes.
pub type Changes = watch::Receiver<u64>;

#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn cart_items(&self) -> CoreResult<Vec<CartItem>>;

    async fn cart_item(&self, item_id: &str) -> CoreResult<Option<CartItem>>;

    /// Number of distinct lines.
    async fn line_count(&self) -> CoreResult<usize>;

    /// Adds `item.count` to the line, creating it if needed.
    async fn add(&self, item: &CartItem) -> CoreResult<()>;

    /// Returns false when the line does not exist.
    async fn update_count(&self, item_id: &str, count: i64) -> CoreResult<bool>;

    async fn remove(&self, item_id: &str) -> CoreResult<bool>;

    async fn clear(&self) -> CoreResult<()>;

    /// Cart lines joined with their menu items.
    async fn order_items(&self) -> CoreResult<Vec<OrderItem>>;

    fn observe(&self) -> Changes;
}

#[async_trait]
pub trait FavouriteRepository: Send + Sync {
    async fn add(&self, item_id: &str) -> CoreResult<()>;

    async fn remove(&self, item_id: &str) -> CoreResult<()>;

    async fn is_favourite(&self, item_id: &str) -> CoreResult<bool>;

    async fn favourite_items(&self) -> CoreResult<Vec<MenuItem>>;

    fn observe(&self) -> Changes;
}

#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Categories holding at least one item, in display order.
    async fn categories(&self) -> CoreResult<Vec<Category>>;

    async fn menu_by_category(&self, category_id: &str) -> CoreResult<Vec<MenuItem>>;

    async fn menu_list(&self) -> CoreResult<Vec<MenuItem>>;

    async fn search_by_name(&self, query: &str) -> CoreResult<Vec<MenuItem>>;

    async fn menu_item(&self, id: &str) -> CoreResult<MenuItem>;

    async fn price_currency(&self) -> CoreResult<PriceCurrency>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn customer_comment(&self) -> CoreResult<String>;

    async fn save_customer_comment(&self, comment: &str) -> CoreResult<()>;

    async fn dont_call_me(&self) -> CoreResult<bool>;

    async fn set_dont_call_me(&self, value: bool) -> CoreResult<()>;

    /// Correlation id for the pending order. Stable until [`clear`](Self::clear).
    async fn guid(&self) -> CoreResult<Uuid>;

    async fn create(&self, params: &CreateOrderParams) -> CoreResult<CreatedOrderInfo>;

    /// Forgets the comment, the don't-call-me flag and the pending guid.
    async fn clear(&self) -> CoreResult<()>;
}

#[async_trait]
pub trait DeliveryRepository: Send + Sync {
    async fn delivery_info(&self) -> CoreResult<DeliveryInfo>;

    async fn propose_addresses(&self, query: &str) -> CoreResult<Vec<Address>>;

    async fn delivery_address_info(&self, address: &Address) -> CoreResult<DeliveryAddressInfo>;

    async fn delivery_cost(&self, address: &Address) -> CoreResult<DeliveryCost>;
}

#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Fresh status from the backend; also cached locally.
    async fn restaurant_info(&self) -> CoreResult<RestaurantInfo>;

    async fn about_info(&self) -> CoreResult<AboutInfo>;

    /// Replaces the local catalog with the backend snapshot.
    async fn sync(&self) -> CoreResult<()>;
}
