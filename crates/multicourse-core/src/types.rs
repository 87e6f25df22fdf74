//! # Domain Types
//!
//! Models shared by the data, domain and presentation layers.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog (replaced on sync)     Cart                 Checkout           │
//! │  ──────────────────────────     ────                 ────────           │
//! │  Category                       CartItem ──┐         OrderInfo          │
//! │  MenuItem ──────────────────────────────── OrderItem Address            │
//! │  RestaurantInfo                 Favourite            PaymentMethod      │
//! │  AboutInfo                                           OrderComment       │
//! │                                                      CreateOrderParams  │
//! │  Delivery                                            CreatedOrderInfo   │
//! │  ────────                                                               │
//! │  DeliveryInfo · DeliveryAddressInfo · DeliveryCost                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Catalog
// =============================================================================

/// A menu category, e.g. "Pizza" or "Drinks".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Position in the category strip, ascending.
    pub sort_order: i64,
}

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    /// Unit price.
    pub price: Money,
    pub description: Option<String>,
    /// Remote image URL, if the restaurant provided one.
    pub image_url: Option<String>,
    pub category_id: String,
}

/// Server-reported restaurant status. Latest snapshot wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantInfo {
    /// Whether the restaurant accepts orders right now.
    pub can_order: bool,
    /// Currency label shown next to prices.
    pub currency: String,
}

impl Default for RestaurantInfo {
    fn default() -> Self {
        RestaurantInfo {
            can_order: false,
            currency: String::new(),
        }
    }
}

/// Currency label for price display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceCurrency {
    pub name: String,
}

impl PriceCurrency {
    /// Formats an amount with this currency.
    pub fn format(&self, amount: Money) -> String {
        amount.format_with(&self.name)
    }
}

/// Restaurant contact details shown in the About dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutInfo {
    pub address: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl AboutInfo {
    /// `tel:` URI handed to the platform dialer.
    pub fn dial_uri(&self) -> String {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{}", digits)
    }
}

/// Full catalog snapshot delivered by a sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantData {
    pub categories: Vec<Category>,
    pub menu: Vec<MenuItem>,
    pub about: AboutInfo,
    pub info: RestaurantInfo,
}

// =============================================================================
// Cart
// =============================================================================

/// Cart line as stored locally.
///
/// ## Invariant
/// `count >= 1`. Decrement floors at 1; removal is explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub item_id: String,
    pub count: i64,
    /// Unit price captured when the item was added.
    pub price: Money,
}

impl CartItem {
    pub fn new(item_id: impl Into<String>, count: i64, price: Money) -> Self {
        CartItem {
            item_id: item_id.into(),
            count,
            price,
        }
    }

    pub fn total(&self) -> Money {
        self.price.multiply_quantity(self.count)
    }
}

/// A cart line joined with its menu item, for display and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub menu_item: MenuItem,
    pub count: i64,
    pub price: Money,
}

impl OrderItem {
    pub fn id(&self) -> &str {
        &self.menu_item.id
    }

    pub fn total(&self) -> Money {
        self.price.multiply_quantity(self.count)
    }

    /// The underlying cart line.
    pub fn cart_item(&self) -> CartItem {
        CartItem::new(self.menu_item.id.clone(), self.count, self.price)
    }
}

/// Sum of line totals.
pub fn order_total(items: &[OrderItem]) -> Money {
    items.iter().map(OrderItem::total).sum()
}

/// Membership of a menu item in the favourites list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favourite {
    pub item_id: String,
}

// =============================================================================
// Delivery
// =============================================================================

/// A delivery address, as proposed by the delivery provider.
///
/// Transient until validated by the address check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub street: String,
    pub city: String,
}

impl Address {
    /// True when the street line carries a building number.
    pub fn has_building_number(&self) -> bool {
        self.street.chars().any(|c| c.is_ascii_digit())
    }

    /// Single-line form shown in the address field.
    pub fn display_line(&self) -> String {
        if self.city.is_empty() {
            self.street.clone()
        } else {
            format!("{}, {}", self.street, self.city)
        }
    }
}

/// Whether the delivery subsystem is currently serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryInfo {
    pub is_available: bool,
}

/// Result of checking a concrete address with the delivery provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddressInfo {
    pub result: bool,
}

/// Delivery price for a resolved address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryCost {
    pub value: Money,
}

// =============================================================================
// Checkout
// =============================================================================

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash to the courier.
    #[default]
    Cash,
    /// Card payment on the provider's page.
    Online,
}

impl PaymentMethod {
    /// Online payment needs the redirect page to complete.
    pub fn requires_external_payment(&self) -> bool {
        matches!(self, PaymentMethod::Online)
    }
}

/// Recipient and delivery address collected by the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInfo {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Address,
}

/// Free-text comment attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderComment {
    pub text: String,
}

/// Line appended to the comment when the customer asks not to be called.
pub const DONT_CALL_ME_NOTE: &str = "Please do not call back.";

impl OrderComment {
    /// Builds the comment from the saved note and the don't-call-me flag.
    ///
    /// ```rust
    /// use multicourse_core::OrderComment;
    ///
    /// let comment = OrderComment::compose("  Ring twice ", true);
    /// assert_eq!(comment.text, "Ring twice\nPlease do not call back.");
    /// assert_eq!(OrderComment::compose("", false).text, "");
    /// ```
    pub fn compose(customer_comment: &str, dont_call_me: bool) -> Self {
        let note = customer_comment.trim();
        let text = match (note.is_empty(), dont_call_me) {
            (_, false) => note.to_string(),
            (true, true) => DONT_CALL_ME_NOTE.to_string(),
            (false, true) => format!("{}\n{}", note, DONT_CALL_ME_NOTE),
        };
        OrderComment { text }
    }
}

/// Everything the order endpoint needs. Never mutated after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderParams {
    /// Correlation id; repeated submissions of one order share it.
    pub guid: Uuid,
    pub order_info: OrderInfo,
    pub payment_method: PaymentMethod,
    pub comment: OrderComment,
}

/// Order endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedOrderInfo {
    pub result: bool,
    /// Payment page to open when payment completes externally.
    pub redirect_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: format!("Item {id}"),
            price: Money::from_minor(price),
            description: None,
            image_url: None,
            category_id: "c-1".to_string(),
        }
    }

    #[test]
    fn test_order_total_sums_lines() {
        let items = vec![
            OrderItem {
                menu_item: item("a", 1500),
                count: 2,
                price: Money::from_minor(1500),
            },
            OrderItem {
                menu_item: item("b", 990),
                count: 1,
                price: Money::from_minor(990),
            },
        ];
        assert_eq!(order_total(&items).minor(), 3990);
        assert!(order_total(&[]).is_zero());
    }

    #[test]
    fn test_address_building_number() {
        let mut address = Address {
            id: "a-1".into(),
            street: "Shevchenka St".into(),
            city: "Kyiv".into(),
        };
        assert!(!address.has_building_number());
        address.street.push_str(", 12");
        assert!(address.has_building_number());
        assert_eq!(address.display_line(), "Shevchenka St, 12, Kyiv");
    }

    #[test]
    fn test_comment_composition() {
        assert_eq!(OrderComment::compose("Leave at door", false).text, "Leave at door");
        assert_eq!(OrderComment::compose("   ", true).text, DONT_CALL_ME_NOTE);
    }

    #[test]
    fn test_payment_method() {
        assert!(PaymentMethod::Online.requires_external_payment());
        assert!(!PaymentMethod::Cash.requires_external_payment());
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Online).unwrap(),
            "\"online\""
        );
    }

    #[test]
    fn test_dial_uri_keeps_digits() {
        let about = AboutInfo {
            phone: "+38 (067) 123-45-67".into(),
            ..AboutInfo::default()
        };
        assert_eq!(about.dial_uri(), "tel:+380671234567");
    }
}
