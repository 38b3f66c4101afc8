//! # Warnings
//!
//! Recoverable diagnostics collected while building a catalog or pricing sales.
//!
//! A warning never stops a run. The offending unit (catalog entry, record or
//! line item) is skipped or zeroed, the warning is recorded next to it, and
//! processing continues. `Display` renders the exact report line.

use serde::Serialize;
use thiserror::Error;

/// A defect found while building a [`CatalogIndex`](crate::CatalogIndex).
///
/// Positions are 0-based indices into the raw entry sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogWarning {
    /// The whole catalog has an unusable outer shape; the index is empty.
    #[error("catalog is not a sequence of entries")]
    NotASequence,

    /// Entry is not a JSON object.
    #[error("malformed catalog entry at position {position}")]
    MalformedEntry { position: usize },

    /// Entry has no usable product identifier.
    #[error("missing identifier at position {position}")]
    MissingIdentifier { position: usize },

    /// Price is missing, non-numeric or negative.
    #[error("invalid price for {product_id}")]
    InvalidPrice { product_id: String },

    /// A later entry replaced an earlier one with the same id.
    #[error("duplicate id {product_id}, overwritten")]
    DuplicateId { product_id: String },
}

/// A defect found while pricing one sale record.
///
/// Every variant carries the record index it belongs to, so a warning is
/// never attributed to the wrong sale.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SaleWarning {
    /// Record is not a sequence of line items; it totals 0.
    #[error("malformed record {record}")]
    MalformedRecord { record: usize },

    /// Line item is not an object or has no product id.
    #[error("malformed line item at position {position} in record {record}")]
    MalformedLineItem { position: usize, record: usize },

    /// Product id is not in the catalog.
    #[error("unknown product {product_id} in record {record}")]
    UnknownProduct { product_id: String, record: usize },

    /// Quantity is missing, non-numeric or negative.
    #[error("invalid quantity for {product_id} in record {record}")]
    InvalidQuantity { product_id: String, record: usize },

    /// Subtotal or running total left the decimal range.
    #[error("amount overflow for {product_id} in record {record}")]
    AmountOverflow { product_id: String, record: usize },
}

impl SaleWarning {
    /// Index of the sale record this warning is attached to.
    pub fn record(&self) -> usize {
        match self {
            SaleWarning::MalformedRecord { record }
            | SaleWarning::MalformedLineItem { record, .. }
            | SaleWarning::UnknownProduct { record, .. }
            | SaleWarning::InvalidQuantity { record, .. }
            | SaleWarning::AmountOverflow { record, .. } => *record,
        }
    }
}
