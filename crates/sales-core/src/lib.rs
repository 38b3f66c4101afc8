//! # sales-core: Pure Matching & Aggregation for Compute Sales
//!
//! This crate resolves sale line items against a product-price catalog and
//! totals every sale. It has zero I/O dependencies: callers hand it JSON
//! trees that are already parsed, and get typed results back.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Compute Sales Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 compute-sales (CLI application)                 │   │
//! │  │    args ──► config ──► load JSON ──► render report ──► write    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ serde_json::Value                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sales-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │aggregator │  │ validation │  │   money   │  │   │
//! │  │   │  Catalog  │  │   Sale    │  │   shape    │  │  Money    │  │   │
//! │  │   │   Index   │  │Aggregator │  │   fields   │  │ Quantity  │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCKS • NO CONSOLE • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Exact decimal `Money` and `Quantity`
//! - [`catalog`] - `CatalogIndex` built from raw catalog data
//! - [`aggregator`] - `SaleAggregator` producing a `RunSummary`
//! - [`types`] - Result types (`LineResult`, `SaleResult`, `RunSummary`)
//! - [`warning`] - Recoverable, per-unit diagnostics
//! - [`validation`] - Field-level checks on raw JSON values
//! - [`shape`] - Outer-shape checks on raw catalog and sales trees
//! - [`error`] - Fatal error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same catalog + same sales = same `RunSummary`
//! 2. **Exact Money**: decimal arithmetic, rounding only when rendering
//! 3. **Degrade, Don't Abort**: bad entries, records and items become warnings
//! 4. **Explicit Errors**: only a wrong top-level shape is fatal
//!
//! ## Example Usage
//!
//! ```rust
//! use sales_core::{CatalogIndex, SaleAggregator};
//! use serde_json::json;
//!
//! let (catalog, _) = CatalogIndex::build(&json!({"A": 10, "B": 2}));
//! let sales = json!([[{"product_id": "A", "quantity": 3}, {"product_id": "X", "quantity": 1}]]);
//!
//! let summary = SaleAggregator::new(&catalog).process(&sales).unwrap();
//! assert_eq!(summary.grand_total.to_string(), "30");
//! assert_eq!(summary.results[0].warnings.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregator;
pub mod catalog;
pub mod error;
pub mod money;
pub mod shape;
pub mod types;
pub mod validation;
pub mod warning;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregator::SaleAggregator;
pub use catalog::CatalogIndex;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Quantity};
pub use types::*;
pub use warning::{CatalogWarning, SaleWarning};
