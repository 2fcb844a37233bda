//! # Total Calculator
//!
//! Rolls line items and the surcharge into the discounted grand total.
//!
//! ```text
//! subtotal        = Σ line.price                       (price on request = 0)
//! discount_amount = round_half_up((subtotal + surcharge) × rate)
//! total           = subtotal + surcharge − discount_amount
//! ```
//!
//! Rounding is applied once, to the whole discounted base, never per line.
//! The rate is not clamped: a rate outside 0..=100 % flows through the
//! arithmetic unchanged. Callers reject such rates with
//! [`crate::validation::validate_discount_rate`] first.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::line_item::SelectedLineItem;
use crate::money::Money;
use crate::types::DiscountRate;

/// Totals breakdown of a quotation. Recomputed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Money,
    pub surcharge: Money,
    pub discount_rate: DiscountRate,
    pub discount_amount: Money,
    pub total: Money,
}

/// Computes the totals for `lines` plus `surcharge` at `rate`.
///
/// ## Example
/// ```rust
/// use toxquote_core::money::Money;
/// use toxquote_core::totals::compute_total_from_subtotal;
/// use toxquote_core::types::DiscountRate;
///
/// let totals = compute_total_from_subtotal(
///     Money::from_won(10_000_000),
///     Money::from_won(2_000_000),
///     DiscountRate::from_percent(10),
/// );
/// assert_eq!(totals.discount_amount.won(), 1_200_000);
/// assert_eq!(totals.total.won(), 10_800_000);
/// ```
pub fn compute_total(lines: &[SelectedLineItem], surcharge: Money, rate: DiscountRate) -> Totals {
    let subtotal: Money = lines.iter().map(SelectedLineItem::billable_price).sum();
    compute_total_from_subtotal(subtotal, surcharge, rate)
}

/// [`compute_total`] for an already-summed subtotal.
pub fn compute_total_from_subtotal(subtotal: Money, surcharge: Money, rate: DiscountRate) -> Totals {
    let discount_amount = (subtotal + surcharge).portion_bps(rate.bps());

    Totals {
        subtotal,
        surcharge,
        discount_rate: rate,
        discount_amount,
        total: subtotal + surcharge - discount_amount,
    }
}
