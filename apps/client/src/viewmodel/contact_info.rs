//! # Contact Form
//!
//! Second step of checkout: recipient details, delivery address, payment.
//!
//! ## Address Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  typing ──► query < 4 chars ──► proposals cleared, no lookup            │
//! │     │                                                                   │
//! │     └─────► debounce ──► GetProposedAddress ──► proposals               │
//! │                                                                         │
//! │  pick proposal ──► CanDeliver ──ok──► verified ──► GetDeliveryCost      │
//! │                        │                               │                │
//! │                        └──err──► message               └─► total        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Editing the address text drops the chosen address and any pending check.
//! Newer lookups and checks cancel older ones, so a stale result never lands
//! on top of a newer choice. Order submission runs to completion.
//!
//! ## Confirm Button
//! Recomputed synchronously on every edit: valid name, phone and email, plus
//! a verified address.

use std::sync::Arc;
use std::time::Duration;

use multicourse_core::validation::{
    is_searchable_address_query, validate_customer_name, validate_delivery_address,
    validate_email, validate_phone,
};
use multicourse_core::{
    order_total, Address, Money, OrderInfo, PaymentMethod, PriceCurrency,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::app::Dependencies;
use crate::messages::{
    can_deliver_message, create_order_message, validation_message, DELIVERY_COST_ERROR,
    DELIVERY_UNAVAILABLE, INCORRECT_ADDRESS, PROPOSED_ADDRESS_ERROR, UNKNOWN_ORDER_ERROR,
};
use crate::navigation::Navigator;
use crate::scope::{TaskSlot, ViewModelScope};
use crate::state::StateHolder;
use crate::usecases::UseCases;

#[derive(Debug, Clone, PartialEq)]
pub struct ContactInfoState {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Text in the address field.
    pub address_query: String,
    /// Proposal the customer picked; cleared by further typing.
    pub address: Option<Address>,
    pub address_verified: bool,
    pub proposed_addresses: Vec<Address>,
    pub payment_method: PaymentMethod,
    pub currency: PriceCurrency,
    pub order_cost: Money,
    pub delivery_cost: Option<Money>,
    pub total_price: Money,
    pub is_confirm_button_enabled: bool,
    pub is_loading: bool,
    pub is_order_creating: bool,
    pub error_message: Option<String>,
}

impl Default for ContactInfoState {
    fn default() -> Self {
        ContactInfoState {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            address_query: String::new(),
            address: None,
            address_verified: false,
            proposed_addresses: Vec::new(),
            payment_method: PaymentMethod::default(),
            currency: PriceCurrency::default(),
            order_cost: Money::zero(),
            delivery_cost: None,
            total_price: Money::zero(),
            is_confirm_button_enabled: false,
            is_loading: true,
            is_order_creating: false,
            error_message: None,
        }
    }
}

impl ContactInfoState {
    fn is_form_valid(&self) -> bool {
        validate_customer_name(&self.name).is_ok()
            && validate_phone(&self.phone).is_ok()
            && validate_email(&self.email).is_ok()
            && self.address_verified
            && validate_delivery_address(self.address.as_ref()).is_ok()
    }

    fn refresh_confirm_button(&mut self) {
        self.is_confirm_button_enabled = self.is_form_valid() && !self.is_order_creating;
    }

    fn reset_delivery(&mut self) {
        self.address_verified = false;
        self.delivery_cost = None;
        self.total_price = self.order_cost;
    }

    /// Validated order details, or the first failing field's message.
    fn order_info(&self) -> Result<OrderInfo, &'static str> {
        validate_customer_name(&self.name).map_err(|e| validation_message(&e))?;
        let phone = validate_phone(&self.phone).map_err(|e| validation_message(&e))?;
        let email = validate_email(&self.email).map_err(|e| validation_message(&e))?;
        validate_delivery_address(self.address.as_ref()).map_err(|e| validation_message(&e))?;

        match &self.address {
            Some(address) if self.address_verified => Ok(OrderInfo {
                name: self.name.trim().to_string(),
                phone,
                email,
                address: address.clone(),
            }),
            _ => Err(INCORRECT_ADDRESS),
        }
    }
}

struct Inner {
    use_cases: Arc<UseCases>,
    navigator: Navigator,
    state: StateHolder<ContactInfoState>,
}

pub struct ContactInfoViewModel {
    inner: Arc<Inner>,
    address_debounce: Duration,
    lookup: TaskSlot,
    check: TaskSlot,
    scope: ViewModelScope,
}

impl ContactInfoViewModel {
    pub fn new(deps: &Dependencies) -> Self {
        let vm = ContactInfoViewModel {
            inner: Arc::new(Inner {
                use_cases: deps.use_cases.clone(),
                navigator: deps.navigator.clone(),
                state: StateHolder::new(ContactInfoState::default()),
            }),
            address_debounce: deps.ui.address_debounce(),
            lookup: TaskSlot::new(),
            check: TaskSlot::new(),
            scope: ViewModelScope::new(),
        };

        let inner = vm.inner.clone();
        vm.scope.launch(async move { inner.load().await });
        vm
    }

    pub fn state(&self) -> ContactInfoState {
        self.inner.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<ContactInfoState> {
        self.inner.state.subscribe()
    }

    pub fn on_name_change(&self, name: &str) {
        self.edit(|s| s.name = name.to_string());
    }

    pub fn on_phone_change(&self, phone: &str) {
        self.edit(|s| s.phone = phone.to_string());
    }

    pub fn on_email_change(&self, email: &str) {
        self.edit(|s| s.email = email.to_string());
    }

    pub fn on_payment_method_change(&self, method: PaymentMethod) {
        self.edit(|s| s.payment_method = method);
    }

    pub fn on_address_change(&self, text: &str) {
        self.check.cancel();
        self.edit(|s| {
            s.address_query = text.to_string();
            s.address = None;
            s.reset_delivery();
        });

        if !is_searchable_address_query(text) {
            self.lookup.cancel();
            self.inner
                .state
                .update(|s| s.proposed_addresses.clear());
            return;
        }

        let inner = self.inner.clone();
        let query = text.to_string();
        self.lookup.debounce(&self.scope, self.address_debounce, async move {
            inner.propose(&query).await;
        });
    }

    pub fn on_proposed_address_click(&self, address: &Address) {
        self.lookup.cancel();
        self.edit(|s| {
            s.address_query = address.display_line();
            s.address = Some(address.clone());
            s.proposed_addresses.clear();
            s.reset_delivery();
        });

        let inner = self.inner.clone();
        let address = address.clone();
        self.check
            .launch(&self.scope, async move { inner.verify(address).await });
    }

    /// Validates the form and submits the order.
    ///
    /// Ignored while a submission is in flight. A running submission is never
    /// cancelled by a later tap.
    pub fn create_order(&self) {
        if self.inner.state.get().is_order_creating {
            debug!("Order submission already in flight");
            return;
        }
        let inner = self.inner.clone();
        self.scope.launch(async move { inner.create_order().await });
    }

    pub fn hide_error(&self) {
        self.inner.state.update(|s| s.error_message = None);
    }

    pub fn on_back_click(&self) {
        self.inner.navigator.cart_back();
    }

    fn edit(&self, f: impl FnOnce(&mut ContactInfoState)) {
        self.inner.state.update(|s| {
            f(s);
            s.refresh_confirm_button();
        });
    }
}

impl Inner {
    async fn load(&self) {
        if let Ok(currency) = self.use_cases.get_price_currency.execute().await {
            self.state.update(|s| s.currency = currency);
        }

        if let Ok(items) = self.use_cases.get_order_items.execute().await {
            let order_cost = order_total(&items);
            self.state.update(|s| {
                s.order_cost = order_cost;
                s.total_price = order_cost + s.delivery_cost.unwrap_or_default();
            });
        }

        match self.use_cases.check_delivery_available.execute().await {
            Ok(true) => {}
            Ok(false) => self.show_error(DELIVERY_UNAVAILABLE),
            Err(e) => {
                warn!(error = %e, "Could not check delivery status");
                self.show_error(UNKNOWN_ORDER_ERROR);
            }
        }
        self.state.update(|s| s.is_loading = false);
    }

    async fn propose(&self, query: &str) {
        match self.use_cases.get_proposed_address.execute(query).await {
            Ok(addresses) => {
                debug!(query, found = addresses.len(), "Address proposals");
                self.state.update(|s| s.proposed_addresses = addresses);
            }
            Err(e) => {
                warn!(query, error = %e, "Address lookup failed");
                self.show_error(PROPOSED_ADDRESS_ERROR);
            }
        }
    }

    async fn verify(&self, address: Address) {
        if let Err(e) = self.use_cases.can_deliver.execute(&address).await {
            warn!(address_id = %address.id, error = %e, "Address rejected");
            self.state.update(|s| {
                s.error_message = Some(can_deliver_message(&e).to_string());
                s.refresh_confirm_button();
            });
            return;
        }

        self.state.update(|s| {
            s.address_verified = true;
            s.refresh_confirm_button();
        });

        match self.use_cases.get_delivery_cost.execute(&address).await {
            Ok(cost) => self.state.update(|s| {
                s.delivery_cost = Some(cost.value);
                s.total_price = s.order_cost + cost.value;
            }),
            Err(e) => {
                warn!(address_id = %address.id, error = %e, "Delivery cost failed");
                self.show_error(DELIVERY_COST_ERROR);
            }
        }
    }

    async fn create_order(&self) {
        let prepared = {
            let mut prepared = None;
            self.state.update(|s| {
                if s.is_order_creating {
                    return;
                }
                match s.order_info() {
                    Ok(info) => {
                        s.is_order_creating = true;
                        s.error_message = None;
                        prepared = Some((info, s.payment_method));
                    }
                    Err(message) => s.error_message = Some(message.to_string()),
                }
                s.refresh_confirm_button();
            });
            prepared
        };
        let Some((order_info, payment_method)) = prepared else {
            return;
        };

        let result = self
            .use_cases
            .create_order
            .execute(order_info, payment_method)
            .await;

        self.state.update(|s| {
            s.is_order_creating = false;
            s.refresh_confirm_button();
        });

        match result {
            Ok(created) => match created.redirect_url {
                Some(url) if payment_method.requires_external_payment() => {
                    info!("Order created, opening payment page");
                    self.navigator.open_pay_order(url);
                }
                _ => {
                    info!("Order created");
                    self.navigator.open_success_order();
                }
            },
            Err(e) => {
                warn!(error = %e, "Order creation failed");
                self.show_error(create_order_message(&e));
            }
        }
    }

    fn show_error(&self, message: &str) {
        self.state
            .update(|s| s.error_message = Some(message.to_string()));
    }
}
