//! In-memory fake repositories for use-case and view-model tests.
//!
//! One [`FakeRepositories`] value implements every repository trait over a
//! shared [`FakeState`]. Tests tweak the state directly and inspect
//! [`FakeState::calls`] to see which remote operations ran, in order.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use multicourse_core::{
    AboutInfo, Address, CartItem, Category, CoreError, CoreResult, CreateOrderParams,
    CreatedOrderInfo, DeliveryAddressInfo, DeliveryCost, DeliveryInfo, MenuItem, Money,
    OrderItem, PriceCurrency, RestaurantInfo,
};
use tokio::sync::watch;
use uuid::Uuid;

use crate::repository::{
    CartRepository, Changes, DeliveryRepository, FavouriteRepository, MenuRepository,
    OrderRepository, RestaurantRepository,
};

/// Remote operations recorded in [`FakeState::calls`].
pub const CALL_RESTAURANT_INFO: &str = "restaurant_info";
pub const CALL_DELIVERY_INFO: &str = "delivery_info";
pub const CALL_CHECK_ADDRESS: &str = "check_address";
pub const CALL_DELIVERY_COST: &str = "delivery_cost";
pub const CALL_PROPOSE_ADDRESSES: &str = "propose_addresses";
pub const CALL_CREATE_ORDER: &str = "create_order";
pub const CALL_SYNC: &str = "sync";

pub fn menu_item(id: &str, name: &str, category_id: &str, price: i64) -> MenuItem {
    MenuItem {
        id: id.into(),
        name: name.into(),
        price: Money::from_minor(price),
        description: None,
        image_url: None,
        category_id: category_id.into(),
    }
}

pub fn address(id: &str, street: &str) -> Address {
    Address {
        id: id.into(),
        street: street.into(),
        city: "Kyiv".into(),
    }
}

#[derive(Debug, Clone)]
pub struct FakeState {
    pub categories: Vec<Category>,
    pub menu: Vec<MenuItem>,
    pub cart: Vec<CartItem>,
    pub favourites: Vec<String>,
    pub about: AboutInfo,
    pub can_order: bool,
    pub currency: String,
    pub delivery_available: bool,
    pub address_deliverable: bool,
    pub delivery_cost: Money,
    pub proposals: Vec<Address>,
    pub created: CreatedOrderInfo,
    pub comment: String,
    pub dont_call_me: bool,
    pub guid: Option<Uuid>,
    /// Every remote operation fails with `CoreError::Data`.
    pub offline: bool,
    /// Order preference reads fail with `CoreError::Data`.
    pub preferences_broken: bool,
    /// Held before the backend answers `create`.
    pub create_delay: Option<Duration>,
    pub calls: Vec<String>,
    pub submitted: Vec<CreateOrderParams>,
}

impl Default for FakeState {
    fn default() -> Self {
        FakeState {
            categories: vec![
                Category {
                    id: "pizza".into(),
                    name: "Pizza".into(),
                    sort_order: 1,
                },
                Category {
                    id: "drinks".into(),
                    name: "Drinks".into(),
                    sort_order: 2,
                },
                Category {
                    id: "desserts".into(),
                    name: "Desserts".into(),
                    sort_order: 3,
                },
            ],
            menu: vec![
                menu_item("margherita", "Margherita", "pizza", 18950),
                menu_item("pepperoni", "Pepperoni", "pizza", 21900),
                menu_item("cola", "Cola 0.5", "drinks", 4500),
            ],
            cart: Vec::new(),
            favourites: Vec::new(),
            about: AboutInfo {
                address: "1 Khreshchatyk St, Kyiv".into(),
                phone: "+380 67 123 45 67".into(),
                latitude: 50.45,
                longitude: 30.52,
            },
            can_order: true,
            currency: "UAH".into(),
            delivery_available: true,
            address_deliverable: true,
            delivery_cost: Money::from_minor(5000),
            proposals: Vec::new(),
            created: CreatedOrderInfo {
                result: true,
                redirect_url: None,
            },
            comment: String::new(),
            dont_call_me: false,
            guid: None,
            offline: false,
            preferences_broken: false,
            create_delay: None,
            calls: Vec::new(),
            submitted: Vec::new(),
        }
    }
}

struct Inner {
    state: Mutex<FakeState>,
    cart_changes: watch::Sender<u64>,
    favourite_changes: watch::Sender<u64>,
}

/// Shared handle; clones see the same state.
#[derive(Clone)]
pub struct FakeRepositories {
    inner: Arc<Inner>,
}

impl Default for FakeRepositories {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeRepositories {
    pub fn new() -> Self {
        FakeRepositories {
            inner: Arc::new(Inner {
                state: Mutex::new(FakeState::default()),
                cart_changes: watch::Sender::new(0),
                favourite_changes: watch::Sender::new(0),
            }),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.inner.state.lock().expect("fake state poisoned")
    }

    /// Remote calls recorded so far.
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn cart(&self) -> Arc<dyn CartRepository> {
        Arc::new(self.clone())
    }

    pub fn favourites(&self) -> Arc<dyn FavouriteRepository> {
        Arc::new(self.clone())
    }

    pub fn menu(&self) -> Arc<dyn MenuRepository> {
        Arc::new(self.clone())
    }

    pub fn order(&self) -> Arc<dyn OrderRepository> {
        Arc::new(self.clone())
    }

    pub fn delivery(&self) -> Arc<dyn DeliveryRepository> {
        Arc::new(self.clone())
    }

    pub fn restaurant(&self) -> Arc<dyn RestaurantRepository> {
        Arc::new(self.clone())
    }

    /// Records a remote call and fails it when offline.
    fn remote(&self, call: &str) -> CoreResult<MutexGuard<'_, FakeState>> {
        let mut state = self.state();
        state.calls.push(call.to_string());
        if state.offline {
            return Err(CoreError::Data("network unreachable".into()));
        }
        Ok(state)
    }

    fn bump_cart(&self) {
        self.inner.cart_changes.send_modify(|v| *v += 1);
    }

    fn bump_favourites(&self) {
        self.inner.favourite_changes.send_modify(|v| *v += 1);
    }
}

#[async_trait]
impl CartRepository for FakeRepositories {
    async fn cart_items(&self) -> CoreResult<Vec<CartItem>> {
        Ok(self.state().cart.clone())
    }

    async fn cart_item(&self, item_id: &str) -> CoreResult<Option<CartItem>> {
        Ok(self
            .state()
            .cart
            .iter()
            .find(|c| c.item_id == item_id)
            .cloned())
    }

    async fn line_count(&self) -> CoreResult<usize> {
        Ok(self.state().cart.len())
    }

    async fn add(&self, item: &CartItem) -> CoreResult<()> {
        {
            let mut state = self.state();
            match state.cart.iter().position(|c| c.item_id == item.item_id) {
                Some(index) => {
                    let line = &mut state.cart[index];
                    line.count += item.count;
                    line.price = item.price;
                }
                None => state.cart.push(item.clone()),
            }
        }
        self.bump_cart();
        Ok(())
    }

    async fn update_count(&self, item_id: &str, count: i64) -> CoreResult<bool> {
        let updated = {
            let mut state = self.state();
            match state.cart.iter_mut().find(|c| c.item_id == item_id) {
                Some(line) => {
                    line.count = count;
                    true
                }
                None => false,
            }
        };
        if updated {
            self.bump_cart();
        }
        Ok(updated)
    }

    async fn remove(&self, item_id: &str) -> CoreResult<bool> {
        let removed = {
            let mut state = self.state();
            let before = state.cart.len();
            state.cart.retain(|c| c.item_id != item_id);
            state.cart.len() != before
        };
        if removed {
            self.bump_cart();
        }
        Ok(removed)
    }

    async fn clear(&self) -> CoreResult<()> {
        self.state().cart.clear();
        self.bump_cart();
        Ok(())
    }

    async fn order_items(&self) -> CoreResult<Vec<OrderItem>> {
        let state = self.state();
        Ok(state
            .cart
            .iter()
            .filter_map(|line| {
                let menu_item = state.menu.iter().find(|m| m.id == line.item_id)?;
                Some(OrderItem {
                    menu_item: menu_item.clone(),
                    count: line.count,
                    price: line.price,
                })
            })
            .collect())
    }

    fn observe(&self) -> Changes {
        self.inner.cart_changes.subscribe()
    }
}

#[async_trait]
impl FavouriteRepository for FakeRepositories {
    async fn add(&self, item_id: &str) -> CoreResult<()> {
        {
            let mut state = self.state();
            if !state.favourites.iter().any(|f| f == item_id) {
                state.favourites.push(item_id.to_string());
            }
        }
        self.bump_favourites();
        Ok(())
    }

    async fn remove(&self, item_id: &str) -> CoreResult<()> {
        self.state().favourites.retain(|f| f != item_id);
        self.bump_favourites();
        Ok(())
    }

    async fn is_favourite(&self, item_id: &str) -> CoreResult<bool> {
        Ok(self.state().favourites.iter().any(|f| f == item_id))
    }

    async fn favourite_items(&self) -> CoreResult<Vec<MenuItem>> {
        let state = self.state();
        Ok(state
            .favourites
            .iter()
            .filter_map(|id| state.menu.iter().find(|m| &m.id == id).cloned())
            .collect())
    }

    fn observe(&self) -> Changes {
        self.inner.favourite_changes.subscribe()
    }
}

#[async_trait]
impl MenuRepository for FakeRepositories {
    async fn categories(&self) -> CoreResult<Vec<Category>> {
        let state = self.state();
        let mut categories: Vec<Category> = state
            .categories
            .iter()
            .filter(|c| state.menu.iter().any(|m| m.category_id == c.id))
            .cloned()
            .collect();
        categories.sort_by_key(|c| c.sort_order);
        Ok(categories)
    }

    async fn menu_by_category(&self, category_id: &str) -> CoreResult<Vec<MenuItem>> {
        Ok(self
            .state()
            .menu
            .iter()
            .filter(|m| m.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn menu_list(&self) -> CoreResult<Vec<MenuItem>> {
        Ok(self.state().menu.clone())
    }

    async fn search_by_name(&self, query: &str) -> CoreResult<Vec<MenuItem>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .state()
            .menu
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    async fn menu_item(&self, id: &str) -> CoreResult<MenuItem> {
        self.state()
            .menu
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| CoreError::MenuItemNotFound(id.to_string()))
    }

    async fn price_currency(&self) -> CoreResult<PriceCurrency> {
        Ok(PriceCurrency {
            name: self.state().currency.clone(),
        })
    }
}

#[async_trait]
impl OrderRepository for FakeRepositories {
    async fn customer_comment(&self) -> CoreResult<String> {
        let state = self.state();
        if state.preferences_broken {
            return Err(CoreError::Data("preferences unreadable".into()));
        }
        Ok(state.comment.clone())
    }

    async fn save_customer_comment(&self, comment: &str) -> CoreResult<()> {
        self.state().comment = comment.to_string();
        Ok(())
    }

    async fn dont_call_me(&self) -> CoreResult<bool> {
        let state = self.state();
        if state.preferences_broken {
            return Err(CoreError::Data("preferences unreadable".into()));
        }
        Ok(state.dont_call_me)
    }

    async fn set_dont_call_me(&self, value: bool) -> CoreResult<()> {
        self.state().dont_call_me = value;
        Ok(())
    }

    async fn guid(&self) -> CoreResult<Uuid> {
        Ok(*self.state().guid.get_or_insert_with(Uuid::new_v4))
    }

    async fn create(&self, params: &CreateOrderParams) -> CoreResult<CreatedOrderInfo> {
        let delay = self.state().create_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.remote(CALL_CREATE_ORDER)?;
        state.submitted.push(params.clone());
        Ok(state.created.clone())
    }

    async fn clear(&self) -> CoreResult<()> {
        let mut state = self.state();
        state.comment.clear();
        state.dont_call_me = false;
        state.guid = None;
        Ok(())
    }
}

#[async_trait]
impl DeliveryRepository for FakeRepositories {
    async fn delivery_info(&self) -> CoreResult<DeliveryInfo> {
        let state = self.remote(CALL_DELIVERY_INFO)?;
        Ok(DeliveryInfo {
            is_available: state.delivery_available,
        })
    }

    async fn propose_addresses(&self, query: &str) -> CoreResult<Vec<Address>> {
        let state = self.remote(&format!("{CALL_PROPOSE_ADDRESSES}:{query}"))?;
        Ok(state.proposals.clone())
    }

    async fn delivery_address_info(&self, _address: &Address) -> CoreResult<DeliveryAddressInfo> {
        let state = self.remote(CALL_CHECK_ADDRESS)?;
        Ok(DeliveryAddressInfo {
            result: state.address_deliverable,
        })
    }

    async fn delivery_cost(&self, _address: &Address) -> CoreResult<DeliveryCost> {
        let state = self.remote(CALL_DELIVERY_COST)?;
        Ok(DeliveryCost {
            value: state.delivery_cost,
        })
    }
}

#[async_trait]
impl RestaurantRepository for FakeRepositories {
    async fn restaurant_info(&self) -> CoreResult<RestaurantInfo> {
        let state = self.remote(CALL_RESTAURANT_INFO)?;
        Ok(RestaurantInfo {
            can_order: state.can_order,
            currency: state.currency.clone(),
        })
    }

    async fn about_info(&self) -> CoreResult<AboutInfo> {
        Ok(self.state().about.clone())
    }

    async fn sync(&self) -> CoreResult<()> {
        let _state = self.remote(CALL_SYNC)?;
        Ok(())
    }
}
