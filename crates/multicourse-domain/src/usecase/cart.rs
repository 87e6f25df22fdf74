//! Cart use cases.

use std::sync::Arc;

use multicourse_core::validation::validate_quantity;
use multicourse_core::{
    CartItem, CoreError, CoreResult, OrderItem, MAX_CART_ITEMS, MAX_ITEM_QUANTITY,
};
use tracing::debug;

use crate::repository::{CartRepository, Changes, RestaurantRepository};

/// Adds an item to the cart, merging with an existing line.
#[derive(Clone)]
pub struct AddToCartUseCase {
    cart: Arc<dyn CartRepository>,
}

impl AddToCartUseCase {
    pub fn new(cart: Arc<dyn CartRepository>) -> Self {
        AddToCartUseCase { cart }
    }

    /// ## Errors
    /// - `Validation` for a quantity outside 1..=999
    /// - `QuantityTooLarge` when the merged line would exceed the maximum
    /// - `CartTooLarge` when a new line would exceed [`MAX_CART_ITEMS`]
    pub async fn execute(&self, item: CartItem) -> CoreResult<()> {
        validate_quantity(item.count)?;

        match self.cart.cart_item(&item.item_id).await? {
            Some(existing) => {
                let merged = existing.count + item.count;
                if merged > MAX_ITEM_QUANTITY {
                    return Err(CoreError::QuantityTooLarge {
                        requested: merged,
                        max: MAX_ITEM_QUANTITY,
                    });
                }
            }
            None => {
                if self.cart.line_count().await? >= MAX_CART_ITEMS {
                    return Err(CoreError::CartTooLarge {
                        max: MAX_CART_ITEMS,
                    });
                }
            }
        }

        debug!(item_id = %item.item_id, count = item.count, "Adding to cart");
        self.cart.add(&item).await
    }
}

/// Sets the quantity of an existing cart line.
#[derive(Clone)]
pub struct UpdateCartItemUseCase {
    cart: Arc<dyn CartRepository>,
}

impl UpdateCartItemUseCase {
    pub fn new(cart: Arc<dyn CartRepository>) -> Self {
        UpdateCartItemUseCase { cart }
    }

    /// Quantities below 1 are rejected; removal goes through
    /// [`RemoveFromCartUseCase`].
    pub async fn execute(&self, item: &CartItem) -> CoreResult<()> {
        validate_quantity(item.count)?;

        if !self.cart.update_count(&item.item_id, item.count).await? {
            return Err(CoreError::MenuItemNotFound(item.item_id.clone()));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct RemoveFromCartUseCase {
    cart: Arc<dyn CartRepository>,
}

impl RemoveFromCartUseCase {
    pub fn new(cart: Arc<dyn CartRepository>) -> Self {
        RemoveFromCartUseCase { cart }
    }

    pub async fn execute(&self, item_id: &str) -> CoreResult<()> {
        self.cart.remove(item_id).await?;
        Ok(())
    }
}

/// Current cart contents joined with the menu, plus a change subscription.
#[derive(Clone)]
pub struct GetOrderItemsUseCase {
    cart: Arc<dyn CartRepository>,
}

impl GetOrderItemsUseCase {
    pub fn new(cart: Arc<dyn CartRepository>) -> Self {
        GetOrderItemsUseCase { cart }
    }

    pub async fn execute(&self) -> CoreResult<Vec<OrderItem>> {
        self.cart.order_items().await
    }

    /// Ticks after every cart write; re-run [`execute`](Self::execute) on change.
    pub fn subscribe(&self) -> Changes {
        self.cart.observe()
    }
}

/// Gate in front of the checkout screen.
#[derive(Clone)]
pub struct PickOrderUseCase {
    cart: Arc<dyn CartRepository>,
    restaurant: Arc<dyn RestaurantRepository>,
}

impl PickOrderUseCase {
    pub fn new(cart: Arc<dyn CartRepository>, restaurant: Arc<dyn RestaurantRepository>) -> Self {
        PickOrderUseCase { cart, restaurant }
    }

    /// ## Errors
    /// - `EmptyCart` with nothing to order
    /// - `StoreNotAcceptingOrders` when the restaurant is closed
    pub async fn execute(&self) -> CoreResult<()> {
        if self.cart.line_count().await? == 0 {
            return Err(CoreError::EmptyCart);
        }
        if !self.restaurant.restaurant_info().await?.can_order {
            return Err(CoreError::StoreNotAcceptingOrders);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeRepositories;
    use multicourse_core::{Money, ValidationError};

    fn line(id: &str, count: i64) -> CartItem {
        CartItem::new(id, count, Money::from_minor(18950))
    }

    #[tokio::test]
    async fn test_add_merges_quantities() {
        let fakes = FakeRepositories::new();
        let add = AddToCartUseCase::new(fakes.cart());

        add.execute(line("margherita", 2)).await.unwrap();
        add.execute(line("margherita", 3)).await.unwrap();

        let cart = fakes.state().cart.clone();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].count, 5);
    }

    #[tokio::test]
    async fn test_add_rejects_overflowing_merge() {
        let fakes = FakeRepositories::new();
        let add = AddToCartUseCase::new(fakes.cart());

        add.execute(line("margherita", 990)).await.unwrap();
        let err = add.execute(line("margherita", 10)).await.unwrap_err();

        assert_eq!(
            err,
            CoreError::QuantityTooLarge {
                requested: 1000,
                max: MAX_ITEM_QUANTITY
            }
        );
        assert_eq!(fakes.state().cart[0].count, 990);
    }

    #[tokio::test]
    async fn test_update_rejects_zero() {
        let fakes = FakeRepositories::new();
        fakes.state().cart.push(line("margherita", 2));
        let update = UpdateCartItemUseCase::new(fakes.cart());

        let err = update.execute(&line("margherita", 0)).await.unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(fakes.state().cart[0].count, 2);
    }

    #[tokio::test]
    async fn test_pick_order_gates() {
        let fakes = FakeRepositories::new();
        let pick = PickOrderUseCase::new(fakes.cart(), fakes.restaurant());

        assert_eq!(pick.execute().await.unwrap_err(), CoreError::EmptyCart);

        fakes.state().cart.push(line("margherita", 1));
        fakes.state().can_order = false;
        assert_eq!(
            pick.execute().await.unwrap_err(),
            CoreError::StoreNotAcceptingOrders
        );

        fakes.state().can_order = true;
        assert!(pick.execute().await.is_ok());
    }
}
