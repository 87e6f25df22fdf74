//! Item details dialog: quantity picker, add to cart, favourite toggle.

use std::sync::Arc;

use multicourse_core::validation::{decrement_quantity, increment_quantity};
use multicourse_core::{CartItem, MenuItem, PriceCurrency};
use tokio::sync::watch;
use tracing::warn;

use crate::app::Dependencies;
use crate::messages::{cart_message, UNKNOWN_ERROR};
use crate::navigation::Navigator;
use crate::scope::ViewModelScope;
use crate::state::StateHolder;
use crate::usecases::UseCases;

#[derive(Debug, Clone, PartialEq)]
pub struct DetailsState {
    pub item: Option<MenuItem>,
    pub currency: PriceCurrency,
    /// Quantity to add, always within 1..=999.
    pub count: i64,
    pub is_favourite: bool,
    pub error_message: Option<String>,
}

impl Default for DetailsState {
    fn default() -> Self {
        DetailsState {
            item: None,
            currency: PriceCurrency::default(),
            count: 1,
            is_favourite: false,
            error_message: None,
        }
    }
}

struct Inner {
    use_cases: Arc<UseCases>,
    navigator: Navigator,
    item_id: String,
    state: StateHolder<DetailsState>,
}

pub struct DetailsViewModel {
    inner: Arc<Inner>,
    scope: ViewModelScope,
}

impl DetailsViewModel {
    pub fn new(deps: &Dependencies, item_id: &str) -> Self {
        let vm = DetailsViewModel {
            inner: Arc::new(Inner {
                use_cases: deps.use_cases.clone(),
                navigator: deps.navigator.clone(),
                item_id: item_id.to_string(),
                state: StateHolder::new(DetailsState::default()),
            }),
            scope: ViewModelScope::new(),
        };

        let inner = vm.inner.clone();
        vm.scope.launch(async move { inner.load().await });
        vm
    }

    pub fn item_id(&self) -> &str {
        &self.inner.item_id
    }

    pub fn state(&self) -> DetailsState {
        self.inner.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailsState> {
        self.inner.state.subscribe()
    }

    pub fn on_plus_click(&self) {
        self.inner
            .state
            .update(|s| s.count = increment_quantity(s.count));
    }

    pub fn on_minus_click(&self) {
        self.inner
            .state
            .update(|s| s.count = decrement_quantity(s.count));
    }

    /// Adds the chosen quantity and closes the dialog on success.
    pub fn on_add_to_cart_click(&self) {
        let inner = self.inner.clone();
        self.scope.launch(async move { inner.add_to_cart().await });
    }

    pub fn on_favourite_click(&self) {
        let inner = self.inner.clone();
        self.scope
            .launch(async move { inner.toggle_favourite().await });
    }

    pub fn on_dismiss_request(&self) {
        self.inner.navigator.close_dialog();
    }

    pub fn hide_error(&self) {
        self.inner.state.update(|s| s.error_message = None);
    }
}

impl Inner {
    async fn load(&self) {
        if let Ok(currency) = self.use_cases.get_price_currency.execute().await {
            self.state.update(|s| s.currency = currency);
        }

        match self.use_cases.get_menu_item_by_id.execute(&self.item_id).await {
            Ok(item) => self.state.update(|s| s.item = Some(item)),
            Err(e) => {
                warn!(item_id = %self.item_id, error = %e, "Could not load menu item");
                self.state
                    .update(|s| s.error_message = Some(UNKNOWN_ERROR.to_string()));
                return;
            }
        }

        self.refresh_favourite().await;
    }

    async fn refresh_favourite(&self) {
        if let Ok(is_favourite) = self.use_cases.check_is_favourite.execute(&self.item_id).await {
            self.state.update(|s| s.is_favourite = is_favourite);
        }
    }

    async fn add_to_cart(&self) {
        let (item, count) = self.state.with(|s| (s.item.clone(), s.count));
        let Some(item) = item else {
            return;
        };

        let line = CartItem::new(item.id, count, item.price);
        match self.use_cases.add_to_cart.execute(line).await {
            Ok(()) => self.navigator.close_dialog(),
            Err(e) => {
                warn!(item_id = %self.item_id, error = %e, "Add to cart failed");
                self.state
                    .update(|s| s.error_message = Some(cart_message(&e).to_string()));
            }
        }
    }

    async fn toggle_favourite(&self) {
        let is_favourite = self.state.with(|s| s.is_favourite);
        let result = if is_favourite {
            self.use_cases
                .remove_from_favourite
                .execute(&self.item_id)
                .await
        } else {
            self.use_cases.add_to_favourite.execute(&self.item_id).await
        };

        if let Err(e) = result {
            warn!(item_id = %self.item_id, error = %e, "Favourite toggle failed");
        }
        self.refresh_favourite().await;
    }
}
