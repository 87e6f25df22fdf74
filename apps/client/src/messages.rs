//! User-facing messages and the per-screen error mapping.
//!
//! Each screen maps only the failures it can explain; anything else falls
//! through to a generic message.

use multicourse_core::{CoreError, ValidationError};

pub const NETWORK_ERROR: &str =
    "Something went wrong while loading. Check your network connection.";
pub const ORDERING_UNAVAILABLE: &str =
    "The restaurant is not taking orders right now. Please try again later.";
pub const DELIVERY_UNAVAILABLE: &str =
    "Delivery is currently unavailable. Please try again later.";
pub const UNKNOWN_ERROR: &str = "Something went wrong. Please try again.";

pub const INCORRECT_NAME: &str = "Please enter your name.";
pub const INCORRECT_PHONE: &str = "Please enter a valid phone number.";
pub const INCORRECT_EMAIL: &str = "Please enter a valid email or leave it empty.";
pub const INCORRECT_ADDRESS: &str = "Please choose a delivery address from the list.";
pub const ENTER_BUILDING_NUMBER: &str = "Please add a building number to the address.";
pub const PROPOSED_ADDRESS_ERROR: &str = "Could not look up this address.";
pub const DELIVERY_COST_ERROR: &str = "Could not calculate the delivery cost.";
pub const ORDER_NOT_CREATED: &str = "The order could not be created. Please try again.";
pub const UNKNOWN_ORDER_ERROR: &str = "Something went wrong while placing the order.";

pub const EMPTY_CART: &str = "Your cart is empty.";
pub const CART_FULL: &str = "Your cart is full.";
pub const QUANTITY_TOO_LARGE: &str = "That is more than we can deliver in one order.";
pub const ABOUT_ERROR: &str = "Could not load restaurant info.";

/// Failures of `CreateOrderUseCase` on the contact form.
pub fn create_order_message(err: &CoreError) -> &'static str {
    match err {
        CoreError::StoreNotAcceptingOrders | CoreError::DeliveryUnavailable => DELIVERY_UNAVAILABLE,
        CoreError::AddressNotDeliverable => INCORRECT_ADDRESS,
        CoreError::OrderNotCreated => ORDER_NOT_CREATED,
        _ => UNKNOWN_ORDER_ERROR,
    }
}

/// Failures of `CanDeliverUseCase` after picking a proposal.
pub fn can_deliver_message(err: &CoreError) -> &'static str {
    match err {
        CoreError::MissingBuildingNumber => ENTER_BUILDING_NUMBER,
        CoreError::DeliveryUnavailable | CoreError::AddressNotDeliverable => DELIVERY_UNAVAILABLE,
        _ => PROPOSED_ADDRESS_ERROR,
    }
}

/// Failures of cart writes from the details dialog and the cart screen.
pub fn cart_message(err: &CoreError) -> &'static str {
    match err {
        CoreError::CartTooLarge { .. } => CART_FULL,
        CoreError::QuantityTooLarge { .. } => QUANTITY_TOO_LARGE,
        _ => UNKNOWN_ERROR,
    }
}

/// Failures of the confirm step on the cart screen.
pub fn pick_order_message(err: &CoreError) -> &'static str {
    match err {
        CoreError::EmptyCart => EMPTY_CART,
        CoreError::StoreNotAcceptingOrders => ORDERING_UNAVAILABLE,
        CoreError::Data(_) => NETWORK_ERROR,
        _ => UNKNOWN_ERROR,
    }
}

/// First failing contact field.
pub fn validation_message(err: &ValidationError) -> &'static str {
    match err.field() {
        "name" => INCORRECT_NAME,
        "phone" => INCORRECT_PHONE,
        "email" => INCORRECT_EMAIL,
        "address" => INCORRECT_ADDRESS,
        _ => UNKNOWN_ERROR,
    }
}
