//! # Money Module
//!
//! Provides the `Money` and `Quantity` types for exact sale arithmetic.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Summing thousands of sale lines compounds that error, and the         │
//! │  result then depends on the order the lines were added.                │
//! │                                                                         │
//! │  OUR SOLUTION: Base-10 Decimal                                          │
//! │    0.1 + 0.2 = 0.3 exactly                                             │
//! │    Quantities may be fractional (1.5 kg), so integer cents are not     │
//! │    enough; a decimal keeps price × quantity exact as well.             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use sales_core::money::{Money, Quantity};
//!
//! let price = Money::from_decimal(Decimal::new(1099, 2)); // 10.99
//! let line = price.checked_mul_quantity(Quantity::from_decimal(Decimal::from(3))).unwrap();
//! assert_eq!(line.to_string(), "32.97");
//!
//! // Rounding happens only when a report is rendered:
//! assert_eq!(line.format_fixed(1), "33.0");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// Represents an exact monetary amount.
///
/// ## Design Decisions
/// - **Decimal**: exact base-10 value, up to 28 significant digits
/// - **Single field tuple struct**: zero-cost wrapper over `Decimal`
/// - **No currency**: every amount in a run shares the catalog's currency
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CatalogIndex unit price ──► LineResult.subtotal ──► SaleResult.total  │
/// │                                                          │              │
/// │                                                          ▼              │
/// │                                               RunSummary.grand_total    │
/// │                                                          │              │
/// │                                     rounded only here ──►│ report text  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the exact decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Adds two amounts, returning `None` when the sum leaves the decimal range.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use sales_core::money::{Money, Quantity};
    ///
    /// let unit_price = Money::from_decimal(Decimal::new(299, 2)); // 2.99
    /// let subtotal = unit_price
    ///     .checked_mul_quantity(Quantity::from_decimal(Decimal::new(15, 1))) // 1.5
    ///     .unwrap();
    /// assert_eq!(subtotal.amount(), Decimal::new(4485, 3)); // 4.485, not rounded
    /// ```
    #[inline]
    pub fn checked_mul_quantity(self, qty: Quantity) -> Option<Money> {
        self.0.checked_mul(qty.0).map(Money)
    }

    /// Rounds to `dp` fractional digits using Bankers Rounding.
    ///
    /// ## Bankers Rounding Explained
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  BANKERS ROUNDING (Round Half to Even)                              │
    /// │                                                                     │
    /// │  Standard rounding always rounds 0.5 UP, causing systematic bias:  │
    /// │    0.005 → 0.01, 0.015 → 0.02, 0.025 → 0.03                        │
    /// │                                                                     │
    /// │  Bankers Rounding rounds 0.5 to nearest EVEN digit:                │
    /// │    0.005 → 0.00, 0.015 → 0.02, 0.025 → 0.02                        │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// Only the report renderer calls this. Totals are never rounded while
    /// they are being accumulated.
    pub fn round_dp(&self, dp: u32) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven),
        )
    }

    /// Renders the amount with exactly `dp` fractional digits.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use sales_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(Decimal::from(30)).format_fixed(2), "30.00");
    /// assert_eq!(Money::from_decimal(Decimal::new(2025, 3)).format_fixed(2), "2.02");
    /// ```
    pub fn format_fixed(&self, dp: u32) -> String {
        let mut rounded = self.round_dp(dp).0;
        rounded.rescale(dp);
        rounded.to_string()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the exact amount with trailing zeros removed.
///
/// ## Note
/// Use `format_fixed` for report columns.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Quantity Type
// =============================================================================

/// A validated, non-negative count of units on a sale line.
///
/// Fractional values are allowed (weighed goods).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Wraps an exact decimal quantity.
    #[inline]
    pub const fn from_decimal(qty: Decimal) -> Self {
        Quantity(qty)
    }

    /// Renders the quantity with exactly `dp` fractional digits.
    pub fn format_fixed(&self, dp: u32) -> String {
        Money(self.0).format_fixed(dp)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
