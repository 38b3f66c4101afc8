//! # Input Shapes
//!
//! Recognises the outer shape of raw catalog and sales trees before any
//! entry or record is looked at.
//!
//! ## Accepted Shapes
//! ```text
//! Catalog                               Sales
//! ───────                               ─────
//! [ {id, price}, ... ]                  [ [ {product_id, quantity}, ... ], ... ]
//! { "products": [ ... ] }               { "sales": [ ... ] }
//! { id, price }          (one entry)    [ {SALE_ID, product_id, quantity}, ... ]
//! { "A": 10, "B": 2.5 }  (price map)        └─ flat listing, grouped by SALE_ID
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};
use crate::validation::{first_present, CATALOG_ID_KEYS, PRICE_KEYS, SALE_ID_KEYS};

/// Wrapper keys whose array value holds the catalog entries.
const CATALOG_WRAPPER_KEYS: &[&str] = &[
    "products", "Products", "catalog", "Catalog", "items", "Items", "records", "Records", "data",
    "Data",
];

/// Wrapper keys whose array value holds the sale records.
const SALES_WRAPPER_KEYS: &[&str] = &[
    "sales", "Sales", "records", "Records", "items", "Items", "data", "Data",
];

// =============================================================================
// Catalog Layout
// =============================================================================

/// The outer layout of a raw catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalogLayout<'a> {
    /// A sequence of entry objects, each with an id and a price field.
    Entries(&'a [Value]),
    /// A direct `{ "<id>": <price> }` map.
    PriceMap(&'a Map<String, Value>),
}

/// Classifies a raw catalog tree.
///
/// An object is tried, in order, as a wrapper around an entry array, as a
/// single entry, and finally as a price map. A price map may only hold
/// scalar values; anything else is not a catalog.
pub fn catalog_layout(raw: &Value) -> CoreResult<CatalogLayout<'_>> {
    match raw {
        Value::Array(entries) => Ok(CatalogLayout::Entries(entries)),
        Value::Object(obj) => {
            if let Some(entries) = wrapped_array(obj, CATALOG_WRAPPER_KEYS) {
                return Ok(CatalogLayout::Entries(entries));
            }
            if first_present(obj, CATALOG_ID_KEYS).is_some_and(Value::is_string)
                && first_present(obj, PRICE_KEYS).is_some()
            {
                return Ok(CatalogLayout::Entries(std::slice::from_ref(raw)));
            }
            if obj.values().all(is_scalar) {
                return Ok(CatalogLayout::PriceMap(obj));
            }
            Err(CoreError::MalformedCatalog {
                reason: "object is neither an entry list nor a price map".to_string(),
            })
        }
        other => Err(CoreError::MalformedCatalog {
            reason: format!("expected an array of entries, found {}", kind_of(other)),
        }),
    }
}

// =============================================================================
// Sales Layout
// =============================================================================

/// Resolves a raw sales tree into its ordered sale records.
///
/// Records are borrowed from the input when it already is a sequence of
/// records. A flat listing, where every element is an object and at least one
/// carries a sale id, is regrouped into one record per sale id in order of
/// first appearance. A line without a sale id becomes a record of its own.
pub fn sales_records(raw: &Value) -> CoreResult<Cow<'_, [Value]>> {
    let records = match raw {
        Value::Array(records) => records.as_slice(),
        Value::Object(obj) => {
            wrapped_array(obj, SALES_WRAPPER_KEYS).ok_or_else(|| CoreError::MalformedInput {
                reason: "expected an array of sale records, found object".to_string(),
            })?
        }
        other => {
            return Err(CoreError::MalformedInput {
                reason: format!("expected an array of sale records, found {}", kind_of(other)),
            })
        }
    };

    if is_flat_listing(records) {
        return Ok(Cow::Owned(group_by_sale_id(records)));
    }
    Ok(Cow::Borrowed(records))
}

fn is_flat_listing(records: &[Value]) -> bool {
    records.iter().all(Value::is_object)
        && records.iter().any(|record| line_sale_id(record).is_some())
}

fn line_sale_id(line: &Value) -> Option<&Value> {
    line.as_object()
        .and_then(|obj| first_present(obj, SALE_ID_KEYS))
}

fn group_by_sale_id(lines: &[Value]) -> Vec<Value> {
    let mut order: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<Value>> = Vec::new();

    for line in lines {
        let slot = match line_sale_id(line).map(sale_key) {
            Some(key) => *order.entry(key).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            }),
            None => {
                groups.push(Vec::new());
                groups.len() - 1
            }
        };
        groups[slot].push(line.clone());
    }

    groups.into_iter().map(Value::Array).collect()
}

/// `1` and `"1"` name the same sale.
fn sale_key(id: &Value) -> String {
    match id {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn wrapped_array<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a [Value]> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Human-readable JSON type name for error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
