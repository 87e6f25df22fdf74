//! Cart screen, the root of the checkout stack.
//!
//! ## Data Flow
//! ```text
//! cart table ──change feed──► order items ──► items + total
//! preferences ──────────────► comment, don't-call-me flag
//!
//! confirm ──► PickOrder ──ok──► ContactInfo
//!                 └────err──► message
//! ```

use std::sync::Arc;

use multicourse_core::validation::{decrement_quantity, increment_quantity};
use multicourse_core::{order_total, Money, OrderComment, OrderItem, PriceCurrency};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::app::Dependencies;
use crate::messages::{cart_message, pick_order_message};
use crate::navigation::Navigator;
use crate::scope::{TaskSlot, ViewModelScope};
use crate::state::StateHolder;
use crate::usecases::UseCases;

#[derive(Debug, Clone, PartialEq)]
pub struct CartState {
    pub items: Vec<OrderItem>,
    pub total: Money,
    pub currency: PriceCurrency,
    pub customer_comment: String,
    pub dont_call_me: bool,
    pub is_loading: bool,
    pub is_order_confirming: bool,
    pub error_message: Option<String>,
}

impl Default for CartState {
    fn default() -> Self {
        CartState {
            items: Vec::new(),
            total: Money::zero(),
            currency: PriceCurrency::default(),
            customer_comment: String::new(),
            dont_call_me: false,
            is_loading: true,
            is_order_confirming: false,
            error_message: None,
        }
    }
}

impl CartState {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn formatted_total(&self) -> String {
        self.currency.format(self.total)
    }
}

struct Inner {
    use_cases: Arc<UseCases>,
    navigator: Navigator,
    state: StateHolder<CartState>,
}

pub struct CartViewModel {
    inner: Arc<Inner>,
    comment_save: TaskSlot,
    scope: ViewModelScope,
}

impl CartViewModel {
    pub fn new(deps: &Dependencies) -> Self {
        let vm = CartViewModel {
            inner: Arc::new(Inner {
                use_cases: deps.use_cases.clone(),
                navigator: deps.navigator.clone(),
                state: StateHolder::new(CartState::default()),
            }),
            comment_save: TaskSlot::new(),
            scope: ViewModelScope::new(),
        };

        let inner = vm.inner.clone();
        vm.scope.launch(async move { inner.load_preferences().await });
        let inner = vm.inner.clone();
        vm.scope.launch(async move { inner.observe_items().await });
        vm
    }

    pub fn state(&self) -> CartState {
        self.inner.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.inner.state.subscribe()
    }

    pub fn on_cart_item_click(&self, item_id: &str) {
        self.inner.navigator.open_details(item_id);
    }

    pub fn on_delete_click(&self, item_id: &str) {
        let inner = self.inner.clone();
        let item_id = item_id.to_string();
        self.scope.launch(async move { inner.remove(&item_id).await });
    }

    pub fn on_item_plus_click(&self, item: &OrderItem) {
        self.set_count(item, increment_quantity(item.count));
    }

    pub fn on_item_minus_click(&self, item: &OrderItem) {
        self.set_count(item, decrement_quantity(item.count));
    }

    fn set_count(&self, item: &OrderItem, count: i64) {
        if count == item.count {
            return;
        }
        let mut line = item.cart_item();
        line.count = count;

        let inner = self.inner.clone();
        self.scope.launch(async move {
            if let Err(e) = inner.use_cases.update_cart_item.execute(&line).await {
                warn!(item_id = %line.item_id, error = %e, "Cart update failed");
                inner.show_error(cart_message(&e));
            }
        });
    }

    pub fn on_confirm_click(&self) {
        let inner = self.inner.clone();
        self.scope.launch(async move { inner.confirm().await });
    }

    pub fn on_dont_call_me_change(&self, dont_call_me: bool) {
        self.inner.state.update(|s| s.dont_call_me = dont_call_me);

        let inner = self.inner.clone();
        self.scope.launch(async move {
            if let Err(e) = inner
                .use_cases
                .set_dont_call_me_status
                .execute(dont_call_me)
                .await
            {
                warn!(error = %e, "Could not save don't-call-me flag");
            }
        });
    }

    /// Saves the comment; a newer edit cancels a pending save.
    pub fn on_customer_comment_change(&self, text: &str) {
        let comment = OrderComment {
            text: text.to_string(),
        };
        self.inner
            .state
            .update(|s| s.customer_comment = comment.text.clone());

        let inner = self.inner.clone();
        self.comment_save.launch(&self.scope, async move {
            if let Err(e) = inner.use_cases.save_customer_comment.execute(&comment).await {
                warn!(error = %e, "Could not save comment");
            }
        });
    }

    pub fn hide_error(&self) {
        self.inner.state.update(|s| s.error_message = None);
    }

    pub fn on_back_click(&self) {
        self.inner.navigator.cart_back();
    }
}

impl Inner {
    async fn load_preferences(&self) {
        if let Ok(currency) = self.use_cases.get_price_currency.execute().await {
            self.state.update(|s| s.currency = currency);
        }
        if let Ok(comment) = self.use_cases.get_customer_comment.execute().await {
            self.state.update(|s| s.customer_comment = comment.text);
        }
        if let Ok(dont_call_me) = self.use_cases.get_dont_call_me_status.execute().await {
            self.state.update(|s| s.dont_call_me = dont_call_me);
        }
    }

    async fn observe_items(&self) {
        let mut changes = self.use_cases.get_order_items.subscribe();
        loop {
            match self.use_cases.get_order_items.execute().await {
                Ok(items) => {
                    let total = order_total(&items);
                    debug!(lines = items.len(), total = total.minor(), "Cart refreshed");
                    self.state.update(|s| {
                        s.items = items;
                        s.total = total;
                        s.is_loading = false;
                    });
                }
                Err(e) => {
                    warn!(error = %e, "Could not load cart");
                    self.state.update(|s| s.is_loading = false);
                }
            }

            if changes.changed().await.is_err() {
                return;
            }
        }
    }

    async fn remove(&self, item_id: &str) {
        if let Err(e) = self.use_cases.remove_from_cart.execute(item_id).await {
            warn!(item_id, error = %e, "Could not remove cart line");
            self.show_error(cart_message(&e));
        }
    }

    async fn confirm(&self) {
        let already_confirming = self.state.with(|s| s.is_order_confirming);
        if already_confirming {
            return;
        }
        self.state.update(|s| s.is_order_confirming = true);

        let result = self.use_cases.pick_order.execute().await;
        self.state.update(|s| s.is_order_confirming = false);
        match result {
            Ok(()) => self.navigator.open_contact_info(),
            Err(e) => {
                warn!(error = %e, "Order cannot be confirmed");
                self.show_error(pick_order_message(&e));
            }
        }
    }

    fn show_error(&self, message: &str) {
        self.state
            .update(|s| s.error_message = Some(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{EMPTY_CART, ORDERING_UNAVAILABLE};
    use crate::navigation::NavCommand;
    use crate::test_support::{deps, next_command, wait_for};
    use multicourse_core::navigation::Configuration;
    use multicourse_core::CartItem;
    use multicourse_domain::testing::FakeRepositories;

    fn filled() -> FakeRepositories {
        let fakes = FakeRepositories::new();
        fakes.state().cart = vec![
            CartItem::new("margherita", 2, Money::from_minor(18950)),
            CartItem::new("cola", 1, Money::from_minor(4500)),
        ];
        fakes
    }

    #[tokio::test]
    async fn test_observes_items_and_total() {
        let fakes = filled();
        let (deps, _nav) = deps(&fakes);

        let vm = CartViewModel::new(&deps);
        let state = wait_for(&mut vm.subscribe(), |s| !s.is_loading).await;

        assert_eq!(state.items.len(), 2);
        assert_eq!(state.total, Money::from_minor(2 * 18950 + 4500));

        vm.on_item_plus_click(&state.items[1]);
        let state = wait_for(&mut vm.subscribe(), |s| {
            s.total == Money::from_minor(2 * 18950 + 2 * 4500)
        })
        .await;
        assert_eq!(state.items[1].count, 2);

        vm.on_delete_click("margherita");
        let state = wait_for(&mut vm.subscribe(), |s| s.items.len() == 1).await;
        assert_eq!(state.total, Money::from_minor(9000));
    }

    #[tokio::test]
    async fn test_minus_floors_at_one() {
        let fakes = filled();
        let (deps, _nav) = deps(&fakes);
        let vm = CartViewModel::new(&deps);
        let state = wait_for(&mut vm.subscribe(), |s| !s.is_loading).await;

        vm.on_item_minus_click(&state.items[0]);
        wait_for(&mut vm.subscribe(), |s| s.items[0].count == 1).await;

        let state = vm.state();
        vm.on_item_minus_click(&state.items[0]);
        tokio::task::yield_now().await;
        assert_eq!(fakes.state().cart[0].count, 1);
    }

    #[tokio::test]
    async fn test_confirm_opens_contact_info() {
        let fakes = filled();
        let (deps, mut nav) = deps(&fakes);
        let vm = CartViewModel::new(&deps);

        vm.on_confirm_click();

        assert_eq!(
            next_command(&mut nav).await,
            NavCommand::CartPush(Configuration::ContactInfo)
        );
    }

    #[tokio::test]
    async fn test_confirm_failures_show_messages() {
        let fakes = FakeRepositories::new();
        let (deps, _nav) = deps(&fakes);
        let vm = CartViewModel::new(&deps);

        vm.on_confirm_click();
        let state = wait_for(&mut vm.subscribe(), |s| s.error_message.is_some()).await;
        assert_eq!(state.error_message.as_deref(), Some(EMPTY_CART));
        vm.hide_error();

        fakes.state().cart = vec![CartItem::new("cola", 1, Money::from_minor(4500))];
        fakes.state().can_order = false;
        vm.on_confirm_click();
        let state = wait_for(&mut vm.subscribe(), |s| s.error_message.is_some()).await;
        assert_eq!(state.error_message.as_deref(), Some(ORDERING_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_preferences_are_loaded_and_saved() {
        let fakes = FakeRepositories::new();
        fakes.state().comment = "Ring twice".into();
        let (deps, _nav) = deps(&fakes);
        let vm = CartViewModel::new(&deps);
        wait_for(&mut vm.subscribe(), |s| s.customer_comment == "Ring twice").await;

        vm.on_customer_comment_change("Leave at the door");
        vm.on_dont_call_me_change(true);
        assert!(vm.state().dont_call_me);

        tokio::time::timeout(std::time::Duration::from_secs(5), async {
            loop {
                {
                    let state = fakes.state();
                    if state.comment == "Leave at the door" && state.dont_call_me {
                        break;
                    }
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("preferences were not saved");
    }
}
