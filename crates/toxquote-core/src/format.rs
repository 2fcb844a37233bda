//! # Currency Formatter
//!
//! Renders won amounts for quotation documents and compact dashboards.
//!
//! ```text
//! format_full(12_345_678)        → "12,345,678원"
//! format_abbreviated(1_230_000)  → "123만원"
//! format_abbreviated(1_235_000)  → "123.5만원"
//! ```
//!
//! The abbreviated form divides by 10,000 (만). The quotient has at most four
//! fractional digits, so it is printed exactly with trailing zeros trimmed;
//! no rounding takes place.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Unit word appended by [`format_full`].
pub const WON: &str = "원";

/// Unit word appended by [`format_abbreviated`].
pub const TEN_THOUSAND_WON: &str = "만원";

/// Divisor for the abbreviated format.
pub const TEN_THOUSAND: i64 = 10_000;

/// Unit words used when rendering amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayUnits {
    /// Suffix for the full format.
    #[serde(default = "default_full_unit")]
    pub full: String,

    /// Suffix for the abbreviated (÷10,000) format.
    #[serde(default = "default_abbreviated_unit")]
    pub abbreviated: String,
}

fn default_full_unit() -> String {
    WON.to_string()
}

fn default_abbreviated_unit() -> String {
    TEN_THOUSAND_WON.to_string()
}

impl Default for DisplayUnits {
    fn default() -> Self {
        DisplayUnits {
            full: default_full_unit(),
            abbreviated: default_abbreviated_unit(),
        }
    }
}

/// Formats an amount as `1,234,567원`.
pub fn format_full(amount: Money) -> String {
    format_full_with(amount, WON)
}

/// Formats an amount divided by 10,000 as `123.4567만원`.
pub fn format_abbreviated(amount: Money) -> String {
    format_abbreviated_with(amount, TEN_THOUSAND_WON)
}

/// [`format_full`] with a custom unit word.
pub fn format_full_with(amount: Money, unit: &str) -> String {
    let won = amount.won();
    let sign = if won < 0 { "-" } else { "" };
    format!("{}{}{}", sign, group_thousands(won.unsigned_abs()), unit)
}

/// [`format_abbreviated`] with a custom unit word.
pub fn format_abbreviated_with(amount: Money, unit: &str) -> String {
    let won = amount.won();
    let sign = if won < 0 { "-" } else { "" };
    let abs = won.unsigned_abs();
    let whole = abs / TEN_THOUSAND as u64;
    let fraction = abs % TEN_THOUSAND as u64;

    let mut out = format!("{}{}", sign, group_thousands(whole));
    if fraction != 0 {
        let digits = format!("{:04}", fraction);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out.push_str(unit);
    out
}

/// Inserts a comma between every group of three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
