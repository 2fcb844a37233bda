//! # Money Module
//!
//! Provides the `Money` type for quotation amounts.
//!
//! ## Integer Won
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Quotations are priced in KRW, whose minor unit IS the major unit.      │
//! │                                                                         │
//! │    Catalog price   500,000원   → Money(500_000)                         │
//! │    Analysis cycle  1,000,000원 → Money(1_000_000)                       │
//! │                                                                         │
//! │  No floating point anywhere. Percentages are applied in basis points   │
//! │  with a single round-half-up at the end of the expression.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use toxquote_core::money::Money;
//!
//! let oral = Money::from_won(500_000);
//! let total = oral + Money::from_won(800_000);
//! assert_eq!(total.won(), 1_300_000);
//! assert_eq!(total.to_string(), "1,300,000원");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::format;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole won.
///
/// ## Design Decisions
/// - **i64 (signed)**: out-of-range discount rates propagate arithmetically
///   instead of panicking, so the type must be able to go negative
/// - **Newtype serde**: catalog JSON holds plain integers
/// - **Saturating arithmetic**: a summary must always be computable, so
///   sums and products clamp at the `i64` bounds instead of overflowing
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole won.
    #[inline]
    pub const fn from_won(won: i64) -> Self {
        Money(won)
    }

    /// Returns the value in whole won.
    #[inline]
    pub const fn won(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a count (quantity, analysis cycles, ...).
    ///
    /// ## Example
    /// ```rust
    /// use toxquote_core::money::Money;
    ///
    /// let per_cycle = Money::from_won(1_000_000);
    /// assert_eq!(per_cycle.multiply_quantity(4).won(), 4_000_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `self × bps / 10000`, rounded half-up.
    ///
    /// Rounding happens once, on the whole product. Half-up means toward
    /// positive infinity, so `-0.5` rounds to `0`.
    ///
    /// ## Example
    /// ```rust
    /// use toxquote_core::money::Money;
    ///
    /// // 12,000,000 × 10% = 1,200,000
    /// assert_eq!(Money::from_won(12_000_000).portion_bps(1000).won(), 1_200_000);
    /// // 5 × 10% = 0.5 → 1
    /// assert_eq!(Money::from_won(5).portion_bps(1000).won(), 1);
    /// ```
    pub fn portion_bps(&self, bps: i64) -> Money {
        // i128 so that 10^15-won quotations times 10000 bps cannot overflow
        let scaled = self.0 as i128 * bps as i128 + 5000;
        let won = scaled
            .div_euclid(10_000)
            .clamp(i64::MIN as i128, i64::MAX as i128);
        Money::from_won(won as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Full display format: `1,234,567원`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::format_full(*self))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty as i64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_won() {
        let money = Money::from_won(500_000);
        assert_eq!(money.won(), 500_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_won(1_234_567).to_string(), "1,234,567원");
        assert_eq!(Money::from_won(0).to_string(), "0원");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_won(1000);
        let b = Money::from_won(500);

        assert_eq!((a + b).won(), 1500);
        assert_eq!((a - b).won(), 500);
        assert_eq!((a * 3i64).won(), 3000);
        assert_eq!((a * 4u32).won(), 4000);
    }

    #[test]
    fn test_sum() {
        let items = vec![Money::from_won(100), Money::from_won(250), Money::from_won(650)];
        let by_ref: Money = items.iter().sum();
        let by_value: Money = items.into_iter().sum();
        assert_eq!(by_ref.won(), 1000);
        assert_eq!(by_value.won(), 1000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_won(i64::MAX);
        assert_eq!(max + Money::from_won(1), max);
        assert_eq!((Money::from_won(i64::MIN) - Money::from_won(1)).won(), i64::MIN);
        assert_eq!(max.multiply_quantity(4), max);
        assert_eq!(max * 2u32, max);

        let mut acc = max;
        acc += Money::from_won(10);
        assert_eq!(acc, max);

        let sum: Money = vec![max, Money::from_won(1), Money::from_won(1)].into_iter().sum();
        assert_eq!(sum, max);
    }

    #[test]
    fn test_portion_clamps() {
        assert_eq!(Money::from_won(i64::MAX).portion_bps(20_000).won(), i64::MAX);
        assert_eq!(Money::from_won(i64::MAX).portion_bps(-20_000).won(), i64::MIN);
    }

    #[test]
    fn test_portion_rounds_half_up() {
        // 15 × 10% = 1.5 → 2
        assert_eq!(Money::from_won(15).portion_bps(1000).won(), 2);
        // 14 × 10% = 1.4 → 1
        assert_eq!(Money::from_won(14).portion_bps(1000).won(), 1);
        // 25 × 10% = 2.5 → 3 (half-up, not half-even)
        assert_eq!(Money::from_won(25).portion_bps(1000).won(), 3);
    }

    #[test]
    fn test_portion_negative_rate_propagates() {
        // -10% of 1000 = -100 exactly
        assert_eq!(Money::from_won(1000).portion_bps(-1000).won(), -100);
        // -10% of 5 = -0.5 → 0 (toward +∞)
        assert_eq!(Money::from_won(5).portion_bps(-1000).won(), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_won(100).is_positive());
        assert!(Money::from_won(-100).is_negative());
    }

    #[test]
    fn test_serde_is_plain_integer() {
        let json = serde_json::to_string(&Money::from_won(800_000)).unwrap();
        assert_eq!(json, "800000");
        let back: Money = serde_json::from_str("800000").unwrap();
        assert_eq!(back, Money::from_won(800_000));
    }
}
