//! # Money Module
//!
//! Provides the `Price` type for handling book prices safely.
//!
//! ## Why Integer Prices?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    19.999 × 0.85 = 16.999149999...  → What do we store?                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Milliunits                                       │
//! │    Prices carry three decimal places, so 19.999 is stored as 19999.    │
//! │    Discounts round half up AT milli precision, deterministically.      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::money::Price;
//!
//! // Create from milliunits (preferred)
//! let price = Price::from_millis(19_999); // 19.999
//!
//! // Promotion math
//! let discounted = price.apply_discount(15); // 16.999
//!
//! // NEVER do this:
//! // let bad = Price::from_float(19.999); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Price Type
// =============================================================================

/// Represents a book price in milliunits (thousandths of the currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refund bookkeeping
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Three decimals**: Catalog prices are quoted to milli precision
///
/// ## Where Price is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Book.price_millis ──┬──► Book.final_price_millis (after promotion)    │
/// │                      │                                                  │
/// │                      └──► OrderItem.unit_price_millis (snapshot)       │
/// │                                                                         │
/// │  Cart line totals ──► Order.total_millis                               │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(i64);

impl Price {
    /// Creates a Price from milliunits (thousandths of the currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Price;
    ///
    /// let price = Price::from_millis(19_999); // Represents 19.999
    /// assert_eq!(price.millis(), 19_999);
    /// ```
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Price(millis)
    }

    /// Creates a Price from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Price;
    ///
    /// let price = Price::from_units(100); // 100.000
    /// assert_eq!(price.millis(), 100_000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Price(units * 1000)
    }

    /// Returns the value in milliunits.
    #[inline]
    pub const fn millis(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Price;
    ///
    /// let price = Price::from_millis(19_999);
    /// assert_eq!(price.units(), 19);
    /// ```
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 1000
    }

    /// Returns the fractional portion in milliunits (always 0-999).
    #[inline]
    pub const fn millis_part(&self) -> i64 {
        (self.0 % 1000).abs()
    }

    /// Returns zero price.
    #[inline]
    pub const fn zero() -> Self {
        Price(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a whole-percentage discount and returns the discounted price.
    ///
    /// ## Rounding
    /// The result is rounded half up at milli precision using integer math:
    /// `(millis × (100 − pct) + 50) / 100`. The +50 provides rounding
    /// (50/100 = 0.5), the same shape as any half-up integer division.
    ///
    /// ## Arguments
    /// * `pct` - Discount percentage, expected in `[0, 100]`. Range checking
    ///   is the caller's job (see `validation::validate_discount_percentage`).
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Price;
    ///
    /// let list = Price::from_millis(19_999);        // 19.999
    /// assert_eq!(list.apply_discount(15).millis(), 16_999);
    ///
    /// let round = Price::from_units(10);            // 10.000
    /// assert_eq!(round.apply_discount(33).millis(), 6_700); // 6.700
    ///
    /// // Zero percent returns the price unchanged, exactly
    /// assert_eq!(list.apply_discount(0), list);
    /// ```
    pub fn apply_discount(&self, pct: u32) -> Price {
        // i128 intermediate prevents overflow on large catalogs
        let keep = 100 - pct as i128;
        let millis = (self.0 as i128 * keep + 50) / 100;
        Price(millis as i64)
    }

    /// Returns the amount subtracted by a discount.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Price;
    ///
    /// let list = Price::from_units(100);
    /// assert_eq!(list.discount_amount(10).millis(), 10_000); // 10.000 off
    /// ```
    pub fn discount_amount(&self, pct: u32) -> Price {
        *self - self.apply_discount(pct)
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Price;
    ///
    /// let unit_price = Price::from_millis(2_990); // 2.990
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.millis(), 8_970); // 8.970
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Price(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows prices in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Client-side formatting handles
/// localization and currency symbols.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:03}", sign, self.units().abs(), self.millis_part())
    }
}

/// Default price is zero.
impl Default for Price {
    fn default() -> Self {
        Price::zero()
    }
}

/// Addition of two Price values.
impl Add for Price {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Price(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Price {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Price values.
impl Sub for Price {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Price(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Price {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Price {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Price(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_millis() {
        let price = Price::from_millis(19_999);
        assert_eq!(price.millis(), 19_999);
        assert_eq!(price.units(), 19);
        assert_eq!(price.millis_part(), 999);
    }

    #[test]
    fn test_from_units() {
        assert_eq!(Price::from_units(100).millis(), 100_000);
        assert_eq!(Price::from_units(0).millis(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Price::from_millis(19_999)), "19.999");
        assert_eq!(format!("{}", Price::from_millis(5_000)), "5.000");
        assert_eq!(format!("{}", Price::from_millis(-5_500)), "-5.500");
        assert_eq!(format!("{}", Price::from_millis(0)), "0.000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Price::from_millis(10_000);
        let b = Price::from_millis(5_000);

        assert_eq!((a + b).millis(), 15_000);
        assert_eq!((a - b).millis(), 5_000);
        let result: Price = a * 3;
        assert_eq!(result.millis(), 30_000);
    }

    #[test]
    fn test_discount_exact() {
        // 100.000 at 10% = 90.000
        let list = Price::from_units(100);
        assert_eq!(list.apply_discount(10).millis(), 90_000);
    }

    #[test]
    fn test_discount_with_rounding() {
        // 19.999 at 15% = 16.99915 → 16.999 at milli precision
        let list = Price::from_millis(19_999);
        assert_eq!(list.apply_discount(15).millis(), 16_999);

        // 10.000 at 33% = 6.700 exactly
        let list = Price::from_units(10);
        assert_eq!(list.apply_discount(33).millis(), 6_700);

        // Half-milli boundary rounds up: 0.001 at 50% = 0.0005 → 0.001
        let tiny = Price::from_millis(1);
        assert_eq!(tiny.apply_discount(50).millis(), 1);
    }

    #[test]
    fn test_discount_zero_percent_is_identity() {
        let list = Price::from_millis(19_999);
        assert_eq!(list.apply_discount(0), list);
    }

    #[test]
    fn test_discount_full_percent_is_free() {
        let list = Price::from_millis(19_999);
        assert_eq!(list.apply_discount(100).millis(), 0);
    }

    #[test]
    fn test_discount_never_exceeds_list_price() {
        let list = Price::from_millis(7_777);
        for pct in 0..=100u32 {
            let discounted = list.apply_discount(pct);
            assert!(discounted.millis() >= 0);
            assert!(discounted <= list);
        }
    }

    #[test]
    fn test_discount_is_pure() {
        // Same inputs always yield the same output, no hidden state
        let list = Price::from_millis(12_345);
        assert_eq!(list.apply_discount(37), list.apply_discount(37));
    }

    #[test]
    fn test_discount_amount() {
        let list = Price::from_units(100);
        assert_eq!(list.discount_amount(10).millis(), 10_000);
        assert_eq!(list.discount_amount(0).millis(), 0);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Price::from_millis(2_990);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.millis(), 8_970);
    }
}
