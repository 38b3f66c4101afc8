//! # Validation Module
//!
//! Field-level validation of raw JSON values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: compute-sales loader                                         │
//! │  ├── File readable, UTF-8, valid JSON                                  │
//! │  └── Failure = "data unavailable", core never sees it                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: shape module                                                 │
//! │  ├── Outer shape: array / wrapper object / price map                   │
//! │  └── Failure = CoreError (fatal for that input)                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── One field at a time: id, price, quantity                          │
//! │  └── Failure = ValidationError → turned into a warning by the caller  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Field Names
//! Real-world sales exports disagree on field names (`price` vs `unit_price`,
//! `quantity` vs `qty`, `Product` vs `product_id`). Each field is looked up
//! through an ordered list of accepted keys; the first key present wins.
//!
//! ## Usage
//! ```rust
//! use sales_core::validation::{validate_identifier, validate_quantity};
//! use serde_json::json;
//!
//! assert_eq!(validate_identifier(Some(&json!(" COKE "))).unwrap(), "COKE");
//! assert!(validate_quantity(Some(&json!(-1))).is_err());
//! assert!(validate_quantity(Some(&json!("2.5"))).is_ok());
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::money::{Money, Quantity};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Accepted Keys
// =============================================================================

/// Product identifier keys on a catalog entry, in lookup order.
pub const CATALOG_ID_KEYS: &[&str] = &[
    "id", "product_id", "productId", "product", "Product", "title", "Title", "name", "Name",
    "item", "Item", "sku", "SKU",
];

/// Product identifier keys on a sale line item, in lookup order.
pub const LINE_PRODUCT_KEYS: &[&str] = &[
    "product_id", "productId", "id", "product", "Product", "title", "Title", "name", "Name",
    "item", "Item", "sku", "SKU",
];

/// Unit price keys on a catalog entry, in lookup order.
pub const PRICE_KEYS: &[&str] = &[
    "price", "Price", "unit_price", "unitPrice", "UnitPrice", "cost", "Cost",
];

/// Quantity keys on a sale line item, in lookup order.
pub const QUANTITY_KEYS: &[&str] = &[
    "quantity", "Quantity", "qty", "Qty", "amount", "Amount", "units", "Units",
];

/// Sale id keys that mark a flat, one-line-per-object sales listing.
pub const SALE_ID_KEYS: &[&str] = &["SALE_ID", "sale_id", "saleId", "SaleId"];

// =============================================================================
// Lookup Helpers
// =============================================================================

/// Returns the value of the first key in `keys` that `obj` contains.
pub fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key))
}

/// Converts a JSON number or numeric string to an exact decimal.
///
/// ## Rules
/// - Integers convert exactly
/// - Floats convert through their shortest round-trip text (`0.1` → `0.1`)
/// - Strings are trimmed and parsed, scientific notation included
/// - Booleans, null, arrays and objects are not numeric
pub fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                parse_decimal(&n.to_string())
            }
        }
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must be present
/// - Must be a JSON string
/// - Must not be blank; surrounding whitespace is trimmed
pub fn validate_identifier(value: Option<&Value>) -> ValidationResult<String> {
    let value = value.ok_or_else(|| ValidationError::Required {
        field: "product id".to_string(),
    })?;

    let id = value.as_str().ok_or_else(|| ValidationError::InvalidFormat {
        field: "product id".to_string(),
        reason: "must be a string".to_string(),
    })?;

    let id = id.trim();
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    Ok(id.to_string())
}

/// Validates a non-negative numeric field.
fn validate_non_negative(value: Option<&Value>, field: &str) -> ValidationResult<Decimal> {
    let value = value.ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })?;

    let amount = to_decimal(value).ok_or_else(|| ValidationError::NotNumeric {
        field: field.to_string(),
    })?;

    if amount < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(amount)
}

/// Validates a catalog unit price.
///
/// ## Rules
/// - Must be present and numeric
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use sales_core::validation::validate_price;
/// use serde_json::json;
///
/// assert!(validate_price(Some(&json!(10.99))).is_ok());
/// assert!(validate_price(Some(&json!(0))).is_ok());      // Free item
/// assert!(validate_price(Some(&json!(-1))).is_err());    // Invalid
/// assert!(validate_price(Some(&json!("n/a"))).is_err()); // Invalid
/// assert!(validate_price(None).is_err());
/// ```
pub fn validate_price(value: Option<&Value>) -> ValidationResult<Money> {
    validate_non_negative(value, "price").map(Money::from_decimal)
}

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be present and numeric
/// - Must be non-negative (>= 0); zero is a valid, empty line
/// - Fractional quantities are allowed
pub fn validate_quantity(value: Option<&Value>) -> ValidationResult<Quantity> {
    validate_non_negative(value, "quantity").map(Quantity::from_decimal)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_present_respects_key_order() {
        let obj = json!({"name": "Cola", "id": "COKE"});
        let obj = obj.as_object().unwrap();
        assert_eq!(first_present(obj, CATALOG_ID_KEYS), Some(&json!("COKE")));
        assert_eq!(first_present(obj, PRICE_KEYS), None);
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(to_decimal(&json!(3)), Some(Decimal::from(3)));
        assert_eq!(to_decimal(&json!(0.1)), Some(Decimal::new(1, 1)));
        assert_eq!(to_decimal(&json!(" 12.50 ")), Some(Decimal::new(1250, 2)));
        assert_eq!(to_decimal(&json!("1e3")), Some(Decimal::from(1000)));
        assert_eq!(to_decimal(&json!(u64::MAX)), Some(Decimal::from(u64::MAX)));
        assert_eq!(to_decimal(&json!("")), None);
        assert_eq!(to_decimal(&json!("abc")), None);
        assert_eq!(to_decimal(&json!(true)), None);
        assert_eq!(to_decimal(&Value::Null), None);
    }

    #[test]
    fn test_validate_identifier() {
        assert_eq!(validate_identifier(Some(&json!("A"))).unwrap(), "A");
        assert_eq!(validate_identifier(Some(&json!("  A  "))).unwrap(), "A");

        assert!(matches!(
            validate_identifier(None),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_identifier(Some(&json!("   "))),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_identifier(Some(&json!(42))),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(
            validate_price(Some(&json!(5))).unwrap(),
            Money::from_decimal(Decimal::from(5))
        );
        assert!(validate_price(Some(&json!(0))).is_ok());
        assert!(validate_price(Some(&json!("7.25"))).is_ok());

        assert!(matches!(
            validate_price(Some(&json!(-0.01))),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            validate_price(Some(&json!("free"))),
            Err(ValidationError::NotNumeric { .. })
        ));
        assert!(matches!(
            validate_price(None),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Some(&json!(1))).is_ok());
        assert!(validate_quantity(Some(&json!(0))).is_ok());
        assert_eq!(
            validate_quantity(Some(&json!(1.5))).unwrap(),
            Quantity::from_decimal(Decimal::new(15, 1))
        );

        assert!(validate_quantity(Some(&json!(-1))).is_err());
        assert!(validate_quantity(Some(&json!(null))).is_err());
        assert!(validate_quantity(Some(&json!([1]))).is_err());
        assert!(validate_quantity(None).is_err());
    }
}
