//! # Error Types
//!
//! Fatal error types for sales-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sales-core errors (this file)                                         │
//! │  ├── CoreError        - Fatal, halts the run for one input             │
//! │  └── ValidationError  - Field-level rejection of a raw JSON value      │
//! │                                                                         │
//! │  sales-core warnings (warning.rs)                                      │
//! │  ├── CatalogWarning   - Recoverable catalog-entry defects              │
//! │  └── SaleWarning      - Recoverable record / line-item defects         │
//! │                                                                         │
//! │  compute-sales errors (app crate)                                      │
//! │  └── AppError         - What the user sees, mapped to an exit code     │
//! │                                                                         │
//! │  Flow: ValidationError → Warning (recovered)                           │
//! │        CoreError → AppError → stderr + exit code                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (what shape was found, which field)
//! 3. Errors are enum variants, never String
//! 4. Only a wrong top-level shape is fatal; everything else is a warning

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Fatal errors for a single run.
///
/// These are the only failures that stop a run. Everything below the top
/// level (a catalog entry, a record, a line item) degrades to a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The raw sales collection is not a sequence of records.
    ///
    /// ## When This Occurs
    /// - The sales file holds a number, string, boolean or null
    /// - The sales file holds an object with no recognised wrapper key
    ///
    /// There is no per-record unit to degrade to, so no report is produced.
    #[error("Malformed sales input: {reason}")]
    MalformedInput { reason: String },

    /// The raw catalog is not a sequence of entries or a price map.
    #[error("Malformed catalog: {reason}")]
    MalformedCatalog { reason: String },

    /// The grand total left the representable decimal range.
    #[error("Grand total exceeds the representable amount range")]
    TotalOverflow,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
///
/// Produced while reading one raw field (an id, a price, a quantity).
/// Callers turn them into the matching warning and keep going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field holds a value of the wrong JSON type.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Field is not a number and not a numeric string.
    #[error("{field} must be numeric")]
    NotNumeric { field: String },

    /// Numeric field is below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
