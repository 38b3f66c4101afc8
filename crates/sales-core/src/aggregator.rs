//! # Sale Aggregator
//!
//! Prices every sale record against a [`CatalogIndex`] and totals the run.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sale Aggregator                                  │
//! │                                                                         │
//! │  raw sales ──► shape::sales_records ──► wrong shape? ──► MalformedInput │
//! │                        │                                                │
//! │                        ▼                                                │
//! │         ┌──────────────────────────────┐                               │
//! │         │  MAP  (one record at a time) │  depends only on the record   │
//! │         │  record i ──► SaleResult i   │  and the read-only catalog    │
//! │         └──────────────┬───────────────┘                               │
//! │                        │ Vec<SaleResult> in input order                 │
//! │                        ▼                                                │
//! │         ┌──────────────────────────────┐                               │
//! │         │  FOLD  grand_total           │  exact decimal, after all     │
//! │         │  Σ SaleResult.total_cost     │  records are priced           │
//! │         └──────────────┬───────────────┘                               │
//! │                        ▼                                                │
//! │                   RunSummary                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The map step shares no mutable state between records, and decimal
//! addition is exact, so pricing records in any order yields the same
//! summary.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::catalog::CatalogIndex;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::shape::sales_records;
use crate::types::{LineResult, RunSummary, SaleResult};
use crate::validation::{
    first_present, validate_identifier, validate_quantity, LINE_PRODUCT_KEYS, QUANTITY_KEYS,
};
use crate::warning::SaleWarning;

/// Prices sale records against a borrowed catalog.
#[derive(Debug, Clone, Copy)]
pub struct SaleAggregator<'c> {
    catalog: &'c CatalogIndex,
}

impl<'c> SaleAggregator<'c> {
    /// Creates an aggregator over a built catalog.
    pub fn new(catalog: &'c CatalogIndex) -> Self {
        SaleAggregator { catalog }
    }

    /// Processes a raw sales collection.
    ///
    /// ## Errors
    /// - [`CoreError::MalformedInput`] when `raw_sales` is not a sequence of
    ///   records (or a recognised wrapper / flat listing of one)
    /// - [`CoreError::TotalOverflow`] when the grand total leaves the
    ///   decimal range
    ///
    /// Defects inside records never fail the call; they become warnings on
    /// the affected `SaleResult`.
    pub fn process(&self, raw_sales: &Value) -> CoreResult<RunSummary> {
        let records = sales_records(raw_sales)?;

        let results: Vec<SaleResult> = records
            .iter()
            .enumerate()
            .map(|(index, record)| self.price_record(index, record))
            .collect();

        let grand_total = results
            .iter()
            .try_fold(Money::zero(), |total, result| {
                total.checked_add(result.total_cost)
            })
            .ok_or(CoreError::TotalOverflow)?;

        let summary = RunSummary::new(results, grand_total);
        info!(
            records = summary.record_count(),
            warnings = summary.warning_count(),
            grand_total = %summary.grand_total,
            "sales processed"
        );
        Ok(summary)
    }

    /// Prices a single raw record at `index`.
    pub fn price_record(&self, index: usize, raw: &Value) -> SaleResult {
        let Some(items) = raw.as_array() else {
            warn!(record = index, "malformed record");
            return SaleResult::malformed(index);
        };

        let mut lines = Vec::with_capacity(items.len());
        let mut warnings = Vec::new();
        let mut total_cost = Money::zero();

        for (position, item) in items.iter().enumerate() {
            let Some(line) = self.price_line(index, position, item, &mut warnings) else {
                continue;
            };

            if let Some(subtotal) = line.subtotal {
                match total_cost.checked_add(subtotal) {
                    Some(total) => total_cost = total,
                    None => {
                        push(
                            &mut warnings,
                            SaleWarning::AmountOverflow {
                                product_id: line.product_id.clone(),
                                record: index,
                            },
                        );
                        lines.push(LineResult {
                            subtotal: None,
                            ..line
                        });
                        continue;
                    }
                }
            }
            lines.push(line);
        }

        debug!(record = index, total = %total_cost, lines = lines.len(), "record priced");
        SaleResult {
            record_index: index,
            lines,
            total_cost,
            warnings,
        }
    }

    /// Resolves one line item. Returns `None` for a malformed item.
    fn price_line(
        &self,
        record: usize,
        position: usize,
        raw: &Value,
        warnings: &mut Vec<SaleWarning>,
    ) -> Option<LineResult> {
        let product_id = raw
            .as_object()
            .and_then(|obj| validate_identifier(first_present(obj, LINE_PRODUCT_KEYS)).ok());
        let (Some(obj), Some(product_id)) = (raw.as_object(), product_id) else {
            push(warnings, SaleWarning::MalformedLineItem { position, record });
            return None;
        };

        let unit_price = self.catalog.unit_price(&product_id);
        if unit_price.is_none() {
            push(
                warnings,
                SaleWarning::UnknownProduct {
                    product_id: product_id.clone(),
                    record,
                },
            );
        }

        let quantity = validate_quantity(first_present(obj, QUANTITY_KEYS)).ok();
        if quantity.is_none() {
            push(
                warnings,
                SaleWarning::InvalidQuantity {
                    product_id: product_id.clone(),
                    record,
                },
            );
        }

        let subtotal = match (unit_price, quantity) {
            (Some(price), Some(qty)) => {
                let subtotal = price.checked_mul_quantity(qty);
                if subtotal.is_none() {
                    push(
                        warnings,
                        SaleWarning::AmountOverflow {
                            product_id: product_id.clone(),
                            record,
                        },
                    );
                }
                subtotal
            }
            _ => None,
        };

        Some(LineResult {
            position,
            product_id,
            quantity,
            unit_price,
            subtotal,
        })
    }
}

fn push(warnings: &mut Vec<SaleWarning>, warning: SaleWarning) {
    warn!(record = warning.record(), %warning, "sale defect recovered");
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

    fn catalog(raw: Value) -> CatalogIndex {
        CatalogIndex::build(&raw).0
    }

    fn money(num: i64, scale: u32) -> Money {
        Money::from_decimal(Decimal::new(num, scale))
    }

    #[test]
    fn test_clean_record_totals_exactly() {
        let catalog = catalog(json!({"A": 10.99, "B": 0.1}));
        let sales = json!([[
            {"product_id": "A", "quantity": 3},
            {"product_id": "B", "quantity": 2},
            {"product_id": "A", "quantity": 0.5}
        ]]);

        let summary = SaleAggregator::new(&catalog).process(&sales).unwrap();
        let sale = &summary.results[0];

        assert!(sale.is_clean());
        assert_eq!(sale.lines.len(), 3);
        // 32.97 + 0.2 + 5.495
        assert_eq!(sale.total_cost, money(38665, 3));
        assert_eq!(summary.grand_total, sale.total_cost);
    }

    #[test]
    fn test_unknown_product_contributes_zero() {
        let catalog = catalog(json!({"A": 10.0}));
        let sales = json!([[{"product_id": "B", "quantity": 2}]]);

        let summary = SaleAggregator::new(&catalog).process(&sales).unwrap();
        let sale = &summary.results[0];

        assert!(sale.total_cost.is_zero());
        assert_eq!(sale.warnings.len(), 1);
        assert_eq!(sale.warnings[0].to_string(), "unknown product B in record 0");
        assert_eq!(sale.lines[0].unit_price, None);
        assert!(!sale.lines[0].is_resolved());
    }

    #[test]
    fn test_invalid_quantity_zeroes_line() {
        let catalog = catalog(json!({"A": 4}));
        let sales = json!([[
            {"product_id": "A", "quantity": -1},
            {"product_id": "A"},
            {"product_id": "A", "quantity": "many"},
            {"product_id": "A", "quantity": 2}
        ]]);

        let summary = SaleAggregator::new(&catalog).process(&sales).unwrap();
        let sale = &summary.results[0];

        assert_eq!(sale.total_cost, money(8, 0));
        assert_eq!(sale.warnings.len(), 3);
        assert!(sale
            .warnings
            .iter()
            .all(|w| w.to_string() == "invalid quantity for A in record 0"));
        assert_eq!(sale.lines[0].unit_price, Some(money(4, 0)));
        assert_eq!(sale.lines[0].subtotal, None);
    }

    #[test]
    fn test_unknown_product_with_bad_quantity_reports_both() {
        let catalog = catalog(json!({"A": 4}));
        let sales = json!([[{"product_id": "Z", "quantity": -3}]]);

        let summary = SaleAggregator::new(&catalog).process(&sales).unwrap();
        let messages: Vec<String> = summary.results[0]
            .warnings
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            messages,
            vec!["unknown product Z in record 0", "invalid quantity for Z in record 0"]
        );
    }

    #[test]
    fn test_malformed_items_and_records_are_recovered() {
        let catalog = catalog(json!({"A": 1}));
        let sales = json!([
            [{"product_id": "A", "quantity": 1}, 42, {"quantity": 1}],
            {"product_id": "A", "quantity": 1},
            [{"product_id": "A", "quantity": 5}]
        ]);

        let summary = SaleAggregator::new(&catalog).process(&sales).unwrap();

        assert_eq!(summary.results[0].total_cost, money(1, 0));
        assert_eq!(summary.results[0].lines.len(), 1);
        assert_eq!(
            summary.results[0].warnings,
            vec![
                SaleWarning::MalformedLineItem {
                    position: 1,
                    record: 0
                },
                SaleWarning::MalformedLineItem {
                    position: 2,
                    record: 0
                },
            ]
        );

        assert_eq!(summary.results[1], SaleResult::malformed(1));
        assert_eq!(summary.results[2].total_cost, money(5, 0));
        assert_eq!(summary.grand_total, money(6, 0));
    }

    #[test]
    fn test_empty_inputs() {
        let catalog = catalog(json!({"A": 1}));
        let aggregator = SaleAggregator::new(&catalog);

        let summary = aggregator.process(&json!([])).unwrap();
        assert!(summary.results.is_empty());
        assert!(summary.grand_total.is_zero());

        let summary = aggregator.process(&json!([[]])).unwrap();
        assert!(summary.results[0].is_clean());
        assert!(summary.results[0].total_cost.is_zero());
    }

    #[test]
    fn test_line_overflow_is_a_warning() {
        let catalog = catalog(json!({"BIG": "79228162514264337593543950335"}));
        let sales = json!([[
            {"product_id": "BIG", "quantity": 2},
            {"product_id": "BIG", "quantity": 1}
        ]]);

        let summary = SaleAggregator::new(&catalog).process(&sales).unwrap();
        let sale = &summary.results[0];
        assert_eq!(sale.warnings.len(), 1);
        assert_eq!(
            sale.warnings[0].to_string(),
            "amount overflow for BIG in record 0"
        );
        assert_eq!(sale.total_cost.amount(), Decimal::MAX);
    }

    #[test]
    fn test_grand_total_overflow_is_fatal() {
        let catalog = catalog(json!({"BIG": "79228162514264337593543950335"}));
        let sales = json!([
            [{"product_id": "BIG", "quantity": 1}],
            [{"product_id": "BIG", "quantity": 1}]
        ]);

        let err = SaleAggregator::new(&catalog).process(&sales).unwrap_err();
        assert_eq!(err, CoreError::TotalOverflow);
    }

    #[test]
    fn test_flat_listing_missing_one_sale_id() {
        let catalog = catalog(json!({"A": 10}));
        let sales = json!([
            {"SALE_ID": 1, "Product": "A", "Quantity": 2},
            {"SALE_ID": 1, "Product": "A", "Quantity": 1},
            {"Product": "A", "Quantity": 5}
        ]);

        let summary = SaleAggregator::new(&catalog).process(&sales).unwrap();
        assert_eq!(summary.record_count(), 2);
        assert_eq!(summary.results[0].total_cost, money(30, 0));
        assert!(summary.results[0].is_clean());
        assert_eq!(summary.results[1].total_cost, money(50, 0));
        assert_eq!(summary.grand_total, money(80, 0));
        assert_eq!(summary.warning_count(), 0);
    }

    #[test]
    fn test_flat_listing_with_capitalised_field_names() {
        let catalog = catalog(json!([
            {"title": "Cola", "price": 1.5},
            {"title": "Chips", "price": 2}
        ]));
        let sales = json!([
            {"SALE_ID": 1, "Product": "Cola", "Quantity": 2},
            {"SALE_ID": 2, "Product": "Chips", "Quantity": 1},
            {"SALE_ID": 1, "Product": "Chips", "Quantity": 1}
        ]);

        let summary = SaleAggregator::new(&catalog).process(&sales).unwrap();
        assert_eq!(summary.record_count(), 2);
        assert_eq!(summary.results[0].total_cost, money(5, 0));
        assert_eq!(summary.results[1].total_cost, money(2, 0));
        assert_eq!(summary.grand_total, money(7, 0));
    }
}
