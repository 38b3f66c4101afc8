//! # Domain Types
//!
//! Result types produced by the catalog build and the sale aggregator.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogEntry   │   │   LineResult    │   │   SaleResult    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id     │   │  position       │   │  record_index   │       │
//! │  │  unit_price     │   │  product_id     │   │  lines          │       │
//! │  └─────────────────┘   │  quantity?      │   │  total_cost     │       │
//! │                        │  unit_price?    │   │  warnings       │       │
//! │                        │  subtotal?      │   └────────┬────────┘       │
//! │                        └─────────────────┘            │ 0..N            │
//! │                                              ┌────────▼────────┐       │
//! │                                              │   RunSummary    │       │
//! │                                              │  ─────────────  │       │
//! │                                              │  results        │       │
//! │                                              │  grand_total    │       │
//! │                                              │  elapsed        │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these are built once and never mutated afterwards.

use std::time::Duration;

use serde::Serialize;

use crate::money::{Money, Quantity};
use crate::warning::SaleWarning;

// =============================================================================
// Catalog Entry
// =============================================================================

/// A validated catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Unique product identifier (trimmed).
    pub product_id: String,
    /// Non-negative unit price.
    pub unit_price: Money,
}

// =============================================================================
// Line Result
// =============================================================================

/// One well-formed line item after resolution against the catalog.
///
/// Malformed line items produce a warning but no `LineResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineResult {
    /// 0-based position of the item within its record.
    pub position: usize,
    pub product_id: String,
    /// `None` when the raw quantity was missing, non-numeric or negative.
    pub quantity: Option<Quantity>,
    /// `None` when the product is not in the catalog.
    pub unit_price: Option<Money>,
    /// Present only when both quantity and unit price resolved.
    pub subtotal: Option<Money>,
}

impl LineResult {
    /// Checks if the line contributed to its record's total.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.subtotal.is_some()
    }
}

// =============================================================================
// Sale Result
// =============================================================================

/// The priced outcome of one sale record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleResult {
    /// 0-based position of the record in the input.
    pub record_index: usize,
    pub lines: Vec<LineResult>,
    /// Sum of resolved subtotals; unresolved items contribute 0.
    pub total_cost: Money,
    /// Defects in this record, in the order they were found.
    pub warnings: Vec<SaleWarning>,
}

impl SaleResult {
    /// Result for a record that could not be read at all.
    pub fn malformed(record_index: usize) -> Self {
        SaleResult {
            record_index,
            lines: Vec::new(),
            total_cost: Money::zero(),
            warnings: vec![SaleWarning::MalformedRecord {
                record: record_index,
            }],
        }
    }

    /// Checks if the record priced without any defect.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

// =============================================================================
// Run Summary
// =============================================================================

/// The outcome of processing one sales input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// One result per input record, in input order.
    pub results: Vec<SaleResult>,
    /// Sum of every `SaleResult::total_cost`.
    pub grand_total: Money,
    /// Wall-clock time of the whole run. Zero until the caller stamps it.
    pub elapsed: Duration,
}

impl RunSummary {
    /// Creates a summary with no elapsed time recorded.
    pub fn new(results: Vec<SaleResult>, grand_total: Money) -> Self {
        RunSummary {
            results,
            grand_total,
            elapsed: Duration::ZERO,
        }
    }

    /// Returns the summary stamped with the measured run time.
    #[must_use]
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Number of sale records processed.
    #[inline]
    pub fn record_count(&self) -> usize {
        self.results.len()
    }

    /// Number of warnings across all records.
    pub fn warning_count(&self) -> usize {
        self.results.iter().map(|r| r.warnings.len()).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_malformed_sale_result() {
        let result = SaleResult::malformed(4);
        assert_eq!(result.record_index, 4);
        assert!(result.total_cost.is_zero());
        assert_eq!(result.warnings[0].to_string(), "malformed record 4");
        assert!(!result.is_clean());
    }

    #[test]
    fn test_run_summary_counts_and_elapsed() {
        let summary = RunSummary::new(
            vec![SaleResult::malformed(0), SaleResult::malformed(1)],
            Money::zero(),
        );
        assert_eq!(summary.elapsed, Duration::ZERO);
        assert_eq!(summary.record_count(), 2);
        assert_eq!(summary.warning_count(), 2);

        let stamped = summary.with_elapsed(Duration::from_millis(12));
        assert_eq!(stamped.elapsed, Duration::from_millis(12));
    }

    #[test]
    fn test_line_result_resolution() {
        let line = LineResult {
            position: 0,
            product_id: "A".to_string(),
            quantity: Some(Quantity::from_decimal(Decimal::from(2))),
            unit_price: None,
            subtotal: None,
        };
        assert!(!line.is_resolved());
    }
}
