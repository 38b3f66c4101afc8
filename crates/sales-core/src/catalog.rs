//! # Catalog Index
//!
//! Builds the read-only product id → unit price lookup used for one run.
//!
//! ## Build Flow
//! ```text
//! raw catalog (serde_json::Value)
//!      │
//!      ▼
//! shape::catalog_layout ──── wrong outer shape ──► empty index + NotASequence
//!      │
//!      ├── Entries ──► per entry: object? id? price? ──► CatalogEntry | warning
//!      └── PriceMap ─► per key:   id?  price?        ──► CatalogEntry | warning
//!      │
//!      ▼
//! insert (last occurrence wins, DuplicateId warning)
//!      │
//!      ▼
//! (CatalogIndex, Vec<CatalogWarning>)
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CoreResult;
use crate::money::Money;
use crate::shape::{catalog_layout, CatalogLayout};
use crate::types::CatalogEntry;
use crate::validation::{
    first_present, validate_identifier, validate_price, CATALOG_ID_KEYS, PRICE_KEYS,
};
use crate::warning::CatalogWarning;

/// Immutable product id → unit price mapping.
///
/// Every stored price is a valid, non-negative amount and every id is unique.
/// Ids iterate in sorted order, so anything derived from the index is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogIndex {
    prices: BTreeMap<String, Money>,
}

impl CatalogIndex {
    /// Builds an index from raw catalog data. Never fails.
    ///
    /// A structurally unusable catalog yields an empty index and the single
    /// warning [`CatalogWarning::NotASequence`].
    ///
    /// ## Example
    /// ```rust
    /// use sales_core::CatalogIndex;
    /// use serde_json::json;
    ///
    /// let raw = json!([{"id": "A", "price": 5}, {"id": "A", "price": 7}]);
    /// let (catalog, warnings) = CatalogIndex::build(&raw);
    ///
    /// assert_eq!(catalog.unit_price("A").unwrap().to_string(), "7");
    /// assert_eq!(warnings[0].to_string(), "duplicate id A, overwritten");
    /// ```
    pub fn build(raw: &Value) -> (Self, Vec<CatalogWarning>) {
        match Self::try_build(raw) {
            Ok(built) => built,
            Err(err) => {
                warn!(error = %err, "catalog has no usable entries");
                (Self::default(), vec![CatalogWarning::NotASequence])
            }
        }
    }

    /// Builds an index, failing only when the outer shape is unusable.
    ///
    /// Per-entry defects are still returned as warnings.
    pub fn try_build(raw: &Value) -> CoreResult<(Self, Vec<CatalogWarning>)> {
        let layout = catalog_layout(raw)?;

        let mut index = CatalogIndex::default();
        let mut warnings = Vec::new();

        match layout {
            CatalogLayout::Entries(entries) => {
                for (position, entry) in entries.iter().enumerate() {
                    match validate_entry(position, entry) {
                        Ok(entry) => index.insert(entry, &mut warnings),
                        Err(warning) => record(&mut warnings, warning),
                    }
                }
            }
            CatalogLayout::PriceMap(map) => {
                for (position, (key, price)) in map.iter().enumerate() {
                    let id = key.trim();
                    if id.is_empty() {
                        record(&mut warnings, CatalogWarning::MissingIdentifier { position });
                        continue;
                    }
                    match validate_price(Some(price)) {
                        Ok(unit_price) => index.insert(
                            CatalogEntry {
                                product_id: id.to_string(),
                                unit_price,
                            },
                            &mut warnings,
                        ),
                        Err(_) => record(
                            &mut warnings,
                            CatalogWarning::InvalidPrice {
                                product_id: id.to_string(),
                            },
                        ),
                    }
                }
            }
        }

        debug!(
            entries = index.len(),
            warnings = warnings.len(),
            "catalog index built"
        );
        Ok((index, warnings))
    }

    fn insert(&mut self, entry: CatalogEntry, warnings: &mut Vec<CatalogWarning>) {
        if self
            .prices
            .insert(entry.product_id.clone(), entry.unit_price)
            .is_some()
        {
            record(
                warnings,
                CatalogWarning::DuplicateId {
                    product_id: entry.product_id,
                },
            );
        }
    }

    /// Returns the unit price for a product id.
    #[inline]
    pub fn unit_price(&self, product_id: &str) -> Option<Money> {
        self.prices.get(product_id).copied()
    }

    /// Checks if a product id is in the catalog.
    #[inline]
    pub fn contains(&self, product_id: &str) -> bool {
        self.prices.contains_key(product_id)
    }

    /// Number of products in the catalog.
    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Checks if the catalog is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Iterates over entries in product id order.
    pub fn iter(&self) -> impl Iterator<Item = CatalogEntry> + '_ {
        self.prices.iter().map(|(id, price)| CatalogEntry {
            product_id: id.clone(),
            unit_price: *price,
        })
    }
}

/// Validates one raw entry of an entry list.
fn validate_entry(position: usize, raw: &Value) -> Result<CatalogEntry, CatalogWarning> {
    let obj = raw
        .as_object()
        .ok_or(CatalogWarning::MalformedEntry { position })?;

    let product_id = validate_identifier(first_present(obj, CATALOG_ID_KEYS))
        .map_err(|_| CatalogWarning::MissingIdentifier { position })?;

    let unit_price = validate_price(first_present(obj, PRICE_KEYS)).map_err(|_| {
        CatalogWarning::InvalidPrice {
            product_id: product_id.clone(),
        }
    })?;

    Ok(CatalogEntry {
        product_id,
        unit_price,
    })
}

fn record(warnings: &mut Vec<CatalogWarning>, warning: CatalogWarning) {
    warn!(%warning, "catalog entry skipped");
    warnings.push(warning);
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn price(n: i64) -> Money {
        Money::from_decimal(Decimal::from(n))
    }

    #[test]
    fn test_build_from_entry_list() {
        let raw = json!([
            {"id": "A", "price": 10},
            {"title": "B", "Price": "2.50"},
            {"product_id": "C", "unit_price": 0}
        ]);
        let (catalog, warnings) = CatalogIndex::build(&raw);

        assert!(warnings.is_empty());
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.unit_price("A"), Some(price(10)));
        assert_eq!(
            catalog.unit_price("B"),
            Some(Money::from_decimal(Decimal::new(250, 2)))
        );
        assert_eq!(catalog.unit_price("C"), Some(Money::zero()));
    }

    #[test]
    fn test_build_from_price_map() {
        let (catalog, warnings) = CatalogIndex::build(&json!({"A": 10.0, "B": 2}));
        assert!(warnings.is_empty());
        assert_eq!(catalog.unit_price("A"), Some(price(10)));
        assert!(catalog.contains("B"));
    }

    #[test]
    fn test_price_map_invalid_values() {
        let (catalog, warnings) = CatalogIndex::build(&json!({"A": -1, " ": 3, "B": "x"}));
        assert!(catalog.is_empty());
        assert_eq!(warnings.len(), 3);
        assert!(warnings.contains(&CatalogWarning::MissingIdentifier { position: 1 }));
        assert!(warnings.contains(&CatalogWarning::InvalidPrice {
            product_id: "A".to_string()
        }));
    }

    #[test]
    fn test_price_map_positions_follow_input_order() {
        let (catalog, warnings) = CatalogIndex::build(&json!({"Z": 1, " ": 2}));
        assert!(catalog.contains("Z"));
        assert_eq!(warnings[0].to_string(), "missing identifier at position 1");
    }

    #[test]
    fn test_duplicate_last_wins() {
        let raw = json!([{"id": "A", "price": 5}, {"id": "A", "price": 7}]);
        let (catalog, warnings) = CatalogIndex::build(&raw);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.unit_price("A"), Some(price(7)));
        assert_eq!(
            warnings,
            vec![CatalogWarning::DuplicateId {
                product_id: "A".to_string()
            }]
        );
    }

    #[test]
    fn test_per_entry_defects_are_skipped() {
        let raw = json!([
            {"price": 5},
            {"id": "B", "price": -2},
            {"id": "C"},
            {"id": "D", "price": "abc"},
            "not an entry",
            {"id": "E", "price": 1}
        ]);
        let (catalog, warnings) = CatalogIndex::build(&raw);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("E"));
        let messages: Vec<String> = warnings.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "missing identifier at position 0",
                "invalid price for B",
                "invalid price for C",
                "invalid price for D",
                "malformed catalog entry at position 4",
            ]
        );
    }

    #[test]
    fn test_structural_failure_yields_empty_index() {
        for raw in [json!(null), json!(12), json!("products.json")] {
            let (catalog, warnings) = CatalogIndex::build(&raw);
            assert!(catalog.is_empty());
            assert_eq!(warnings, vec![CatalogWarning::NotASequence]);
            assert!(CatalogIndex::try_build(&raw).is_err());
        }
    }

    #[test]
    fn test_iter_is_sorted() {
        let (catalog, _) = CatalogIndex::build(&json!({"b": 1, "a": 2}));
        let ids: Vec<String> = catalog.iter().map(|e| e.product_id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
