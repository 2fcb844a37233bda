//! # Duration Parser
//!
//! Turns a catalog duration label into a number of analysis cycles.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule table (first match wins)                                          │
//! │                                                                         │
//! │   "<N>주"     weeks   → max(1, ceil(N / 4))    "13주"  → 4              │
//! │   "<N>개월"   months  → max(1, N)              "3개월" → 3              │
//! │   anything else       → 1                      "단회", "GD 6-17", "-"   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rule matches when the trimmed label starts with the number, optionally
//! followed by whitespace, and then the unit word. Trailing text after the
//! unit is ignored, so "13주 (회복 4주)" counts the main period only.
//! Parsing never fails; a label the table cannot read is one cycle.

use tracing::trace;

/// Cycles assumed for labels no rule recognizes.
pub const DEFAULT_CYCLES: u32 = 1;

/// Weeks billed as one analysis cycle.
pub const WEEKS_PER_CYCLE: u32 = 4;

/// One entry of the duration rule table.
struct DurationRule {
    name: &'static str,
    unit: &'static str,
    cycles: fn(u32) -> u32,
}

impl DurationRule {
    /// Returns the leading count if `label` is `<N><unit>...`.
    fn count_in(&self, label: &str) -> Option<u32> {
        let digits_end = label
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(label.len());

        if digits_end == 0 {
            return None;
        }

        let (number, rest) = label.split_at(digits_end);
        if !rest.trim_start().starts_with(self.unit) {
            return None;
        }

        number.parse().ok()
    }
}

const RULES: &[DurationRule] = &[
    DurationRule {
        name: "weeks",
        unit: "주",
        cycles: |weeks| weeks.div_ceil(WEEKS_PER_CYCLE),
    },
    DurationRule {
        name: "months",
        unit: "개월",
        cycles: |months| months,
    },
];

/// Number of analysis cycles for a duration label. Always `>= 1`.
///
/// ## Example
/// ```rust
/// use toxquote_core::duration::parse_analysis_cycles;
///
/// assert_eq!(parse_analysis_cycles("13주"), 4);
/// assert_eq!(parse_analysis_cycles("6개월"), 6);
/// assert_eq!(parse_analysis_cycles("단회"), 1);
/// ```
pub fn parse_analysis_cycles(label: &str) -> u32 {
    let label = label.trim();

    for rule in RULES {
        if let Some(count) = rule.count_in(label) {
            let cycles = (rule.cycles)(count).max(DEFAULT_CYCLES);
            trace!(label, rule = rule.name, count, cycles, "Parsed duration label");
            return cycles;
        }
    }

    trace!(label, "Unrecognized duration label, defaulting to one cycle");
    DEFAULT_CYCLES
}
