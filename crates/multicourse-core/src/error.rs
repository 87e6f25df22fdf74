//! # Error Types
//!
//! Domain error taxonomy shared by every layer.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  multicourse-core (this file)                                           │
//! │  ├── CoreError        - Closed set of ordering failures                 │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  multicourse-db       DbError  ──┐                                      │
//! │  multicourse-api      ApiError ──┴──► CoreError::Data at the            │
//! │                                       repository boundary               │
//! │                                                                         │
//! │  View-models map CoreError variants to user-facing messages.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `CoreError` is `Clone` so a failure can be kept inside a state snapshot.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Ordering workflow failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The restaurant is closed for orders.
    ///
    /// ## When This Occurs
    /// - Restaurant info reports `can_order = false`
    /// - Checked first by order creation and by the cart confirm step
    #[error("The restaurant is not accepting orders right now")]
    StoreNotAcceptingOrders,

    /// The delivery service is not serving at the moment.
    #[error("Delivery is currently unavailable")]
    DeliveryUnavailable,

    /// The delivery provider could not resolve the address.
    #[error("Delivery to this address is not possible")]
    AddressNotDeliverable,

    /// The chosen street has no building number.
    #[error("Address is missing a building number")]
    MissingBuildingNumber,

    /// The order endpoint answered but reported failure.
    #[error("The order could not be created")]
    OrderNotCreated,

    /// Confirming an order with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Menu item cannot be found locally.
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage or network failure below the repository boundary.
    #[error("Data error: {0}")]
    Data(String),
}

impl CoreError {
    /// Wraps any lower-layer failure as [`CoreError::Data`].
    pub fn data(err: impl std::fmt::Display) -> Self {
        CoreError::Data(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (phone, email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityTooLarge {
            requested: 1000,
            max: 999,
        };
        assert_eq!(
            err.to_string(),
            "Quantity 1000 exceeds maximum allowed (999)"
        );
        assert_eq!(
            CoreError::MenuItemNotFound("m-1".into()).to_string(),
            "Menu item not found: m-1"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "phone".to_string(),
        };
        assert_eq!(validation_err.field(), "phone");

        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_data_wraps_display() {
        let err = CoreError::data("connection refused");
        assert_eq!(err, CoreError::Data("connection refused".into()));
    }
}
