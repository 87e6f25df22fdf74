//! # Validation Module
//!
//! Rules for the contact form and cart quantities.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ContactInfo view-model                                                 │
//! │  ├── every keystroke: recompute confirm-button enablement               │
//! │  └── create_order: first failing field becomes the field message        │
//! │                                                                         │
//! │  Cart / Details view-models                                             │
//! │  └── plus/minus buttons: quantity clamped to 1..=MAX_ITEM_QUANTITY      │
//! │                                                                         │
//! │  UpdateCartItemUseCase                                                  │
//! │  └── rejects quantity < 1 before touching storage                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::Address;
use crate::{MAX_ITEM_QUANTITY, MIN_ADDRESS_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const PHONE_MIN_DIGITS: usize = 10;
const PHONE_MAX_DIGITS: usize = 12;

// =============================================================================
// Contact Form
// =============================================================================

/// Validates the recipient name.
///
/// ## Rules
/// - Trimmed, 2 to 50 characters
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    let len = name.chars().count();

    if len == 0 {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if len < NAME_MIN {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: NAME_MIN,
        });
    }
    if len > NAME_MAX {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: NAME_MAX,
        });
    }

    Ok(())
}

/// Validates a phone number and returns its normalized form.
///
/// ## Rules
/// - Spaces, dashes and parentheses are ignored
/// - Optional leading `+`
/// - 10 to 12 digits
///
/// ```rust
/// use multicourse_core::validation::validate_phone;
///
/// assert_eq!(validate_phone("+38 (067) 123-45-67").unwrap(), "+380671234567");
/// assert!(validate_phone("12345").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let (plus, rest) = match phone.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", phone),
    };

    let mut digits = String::with_capacity(rest.len());
    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '(' | ')' => {}
            _ => {
                return Err(ValidationError::InvalidFormat {
                    field: "phone".to_string(),
                    reason: "must contain only digits".to_string(),
                })
            }
        }
    }

    if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: format!(
                "must have {} to {} digits",
                PHONE_MIN_DIGITS, PHONE_MAX_DIGITS
            ),
        });
    }

    Ok(format!("{}{}", plus, digits))
}

/// Validates an optional email. Blank means "not provided".
pub fn validate_email(email: &str) -> ValidationResult<Option<String>> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(None);
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(Some(email.to_string()))
}

/// Validates the delivery address chosen on the form.
///
/// ## Rules
/// - Street must not be blank
/// - The address must come from the provider's proposals (has an id)
pub fn validate_delivery_address(address: Option<&Address>) -> ValidationResult<()> {
    let address = match address {
        Some(a) if !a.street.trim().is_empty() => a,
        _ => {
            return Err(ValidationError::Required {
                field: "address".to_string(),
            })
        }
    };

    if address.id.is_empty() {
        return Err(ValidationError::InvalidFormat {
            field: "address".to_string(),
            reason: "must be selected from the proposed addresses".to_string(),
        });
    }

    Ok(())
}

/// True when an address query is long enough to ask the provider.
pub fn is_searchable_address_query(query: &str) -> bool {
    query.trim().chars().count() >= MIN_ADDRESS_QUERY_LEN
}

// =============================================================================
// Quantities
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be at least 1
/// - Must be at most [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Plus button: one more, capped at the maximum.
pub fn increment_quantity(qty: i64) -> i64 {
    qty.saturating_add(1).clamp(1, MAX_ITEM_QUANTITY)
}

/// Minus button: one fewer, never below 1.
pub fn decrement_quantity(qty: i64) -> i64 {
    qty.saturating_sub(1).clamp(1, MAX_ITEM_QUANTITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Olena").is_ok());
        assert!(validate_customer_name("  Ли ").is_ok());
        assert!(matches!(
            validate_customer_name("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_customer_name("A"),
            Err(ValidationError::TooShort { .. })
        ));
        assert!(validate_customer_name(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert_eq!(validate_phone("0671234567").unwrap(), "0671234567");
        assert_eq!(validate_phone("+380 67 123 45 67").unwrap(), "+380671234567");
        assert!(validate_phone("").is_err());
        assert!(validate_phone("067-ABC-4567").is_err());
        assert!(validate_phone("+3806712345678").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email("").unwrap(), None);
        assert_eq!(
            validate_email(" olena@example.com ").unwrap().as_deref(),
            Some("olena@example.com")
        );
        assert!(validate_email("olena@example").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_validate_delivery_address() {
        assert!(validate_delivery_address(None).is_err());

        let typed = Address {
            id: String::new(),
            street: "Shevchenka 1".into(),
            city: String::new(),
        };
        assert!(validate_delivery_address(Some(&typed)).is_err());

        let chosen = Address {
            id: "addr-1".into(),
            ..typed
        };
        assert!(validate_delivery_address(Some(&chosen)).is_ok());
    }

    #[test]
    fn test_address_query_threshold() {
        assert!(!is_searchable_address_query("Shv"));
        assert!(!is_searchable_address_query("  ab  "));
        assert!(is_searchable_address_query("Shev"));
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_quantity_adjustments_never_drop_below_one() {
        assert_eq!(decrement_quantity(1), 1);
        assert_eq!(decrement_quantity(5), 4);
        assert_eq!(decrement_quantity(i64::MIN), 1);
        assert_eq!(increment_quantity(1), 2);
        assert_eq!(increment_quantity(MAX_ITEM_QUANTITY), MAX_ITEM_QUANTITY);
    }
}
