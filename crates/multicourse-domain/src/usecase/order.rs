//! # Order Creation
//!
//! ## Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CreateOrderUseCase::execute(order_info, payment_method)                │
//! │                                                                         │
//! │  1. restaurant_info().can_order?        no ──► StoreNotAcceptingOrders  │
//! │  2. delivery_info().is_available?       no ──► DeliveryUnavailable      │
//! │  3. delivery_address_info().result?     no ──► AddressNotDeliverable    │
//! │  4. comment = saved note + don't-call-me flag                           │
//! │     guid    = pending order guid (persisted, reused on resubmit)        │
//! │  5. create(params).result?              no ──► OrderNotCreated          │
//! │  6. clear cart + order preferences ──► CreatedOrderInfo                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Strictly sequential; the first failing check returns and nothing later
//! runs. No retries.

use std::sync::Arc;

use multicourse_core::{
    CoreError, CoreResult, CreateOrderParams, CreatedOrderInfo, OrderComment, OrderInfo,
    PaymentMethod,
};
use tracing::{info, instrument, warn};

use crate::repository::{CartRepository, DeliveryRepository, OrderRepository, RestaurantRepository};

#[derive(Clone)]
pub struct CreateOrderUseCase {
    restaurant: Arc<dyn RestaurantRepository>,
    delivery: Arc<dyn DeliveryRepository>,
    order: Arc<dyn OrderRepository>,
    cart: Arc<dyn CartRepository>,
}

impl CreateOrderUseCase {
    pub fn new(
        restaurant: Arc<dyn RestaurantRepository>,
        delivery: Arc<dyn DeliveryRepository>,
        order: Arc<dyn OrderRepository>,
        cart: Arc<dyn CartRepository>,
    ) -> Self {
        CreateOrderUseCase {
            restaurant,
            delivery,
            order,
            cart,
        }
    }

    #[instrument(skip(self, order_info), fields(address_id = %order_info.address.id))]
    pub async fn execute(
        &self,
        order_info: OrderInfo,
        payment_method: PaymentMethod,
    ) -> CoreResult<CreatedOrderInfo> {
        if !self.restaurant.restaurant_info().await?.can_order {
            return Err(CoreError::StoreNotAcceptingOrders);
        }
        if !self.delivery.delivery_info().await?.is_available {
            return Err(CoreError::DeliveryUnavailable);
        }
        if !self
            .delivery
            .delivery_address_info(&order_info.address)
            .await?
            .result
        {
            return Err(CoreError::AddressNotDeliverable);
        }

        let comment = OrderComment::compose(
            &self.order.customer_comment().await?,
            self.order.dont_call_me().await?,
        );

        let params = CreateOrderParams {
            guid: self.order.guid().await?,
            order_info,
            payment_method,
            comment,
        };

        let created = self.order.create(&params).await?;
        if !created.result {
            warn!(guid = %params.guid, "Backend refused the order");
            return Err(CoreError::OrderNotCreated);
        }

        self.cart.clear().await?;
        self.order.clear().await?;

        info!(
            guid = %params.guid,
            redirect = created.redirect_url.is_some(),
            "Order created"
        );
        Ok(created)
    }
}

// =============================================================================
// Order-scoped preferences
// =============================================================================

#[derive(Clone)]
pub struct GetCustomerCommentUseCase {
    order: Arc<dyn OrderRepository>,
}

impl GetCustomerCommentUseCase {
    pub fn new(order: Arc<dyn OrderRepository>) -> Self {
        GetCustomerCommentUseCase { order }
    }

    pub async fn execute(&self) -> CoreResult<OrderComment> {
        Ok(OrderComment {
            text: self.order.customer_comment().await?,
        })
    }
}

#[derive(Clone)]
pub struct SaveCustomerCommentUseCase {
    order: Arc<dyn OrderRepository>,
}

impl SaveCustomerCommentUseCase {
    pub fn new(order: Arc<dyn OrderRepository>) -> Self {
        SaveCustomerCommentUseCase { order }
    }

    pub async fn execute(&self, comment: &OrderComment) -> CoreResult<()> {
        self.order.save_customer_comment(&comment.text).await
    }
}

#[derive(Clone)]
pub struct GetDontCallMeStatusUseCase {
    order: Arc<dyn OrderRepository>,
}

impl GetDontCallMeStatusUseCase {
    pub fn new(order: Arc<dyn OrderRepository>) -> Self {
        GetDontCallMeStatusUseCase { order }
    }

    pub async fn execute(&self) -> CoreResult<bool> {
        self.order.dont_call_me().await
    }
}

#[derive(Clone)]
pub struct SetDontCallMeStatusUseCase {
    order: Arc<dyn OrderRepository>,
}

impl SetDontCallMeStatusUseCase {
    pub fn new(order: Arc<dyn OrderRepository>) -> Self {
        SetDontCallMeStatusUseCase { order }
    }

    pub async fn execute(&self, dont_call_me: bool) -> CoreResult<()> {
        self.order.set_dont_call_me(dont_call_me).await
    }
}
