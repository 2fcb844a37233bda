//! # Validation Module
//!
//! Caller-facing checks that run before input reaches the engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Quotation UI                                                 │
//! │  └── Immediate feedback on empty names, bad numbers                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (called by Quotation / loaders)                  │
//! │  ├── Discount rate within 0..=100 %                                    │
//! │  ├── Custom prices non-negative                                        │
//! │  └── Names and catalog ids well-formed                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine (pricing, surcharge, totals)                          │
//! │  └── Total functions, no checks: bad input propagates arithmetically   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use toxquote_core::types::DiscountRate;
//! use toxquote_core::validation::validate_discount_rate;
//!
//! assert!(validate_discount_rate(DiscountRate::from_percent(10)).is_ok());
//! assert!(validate_discount_rate(DiscountRate::from_percent(101)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::DiscountRate;
use crate::MAX_QUOTATION_LINES;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest allowed display name, in characters.
pub const MAX_NAME_CHARS: usize = 200;

/// Largest unit price a caller may enter by hand, 1,000조원.
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000_000_000;

/// Longest allowed catalog id.
pub const MAX_ITEM_ID_LEN: usize = 50;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a discount rate.
///
/// ## Rules
/// - Must be between 0 and 10000 bps (0% to 100%)
pub fn validate_discount_rate(rate: DiscountRate) -> ValidationResult<()> {
    if !(0..=10_000).contains(&rate.bps()) {
        return Err(ValidationError::OutOfRange {
            field: "discount rate (bps)".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Validates a user-entered unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - At most [`MAX_UNIT_PRICE`]
/// - Zero is allowed (complimentary test)
///
/// ## Example
/// ```rust
/// use toxquote_core::money::Money;
/// use toxquote_core::validation::validate_custom_price;
///
/// assert!(validate_custom_price(Money::from_won(1_500_000)).is_ok());
/// assert!(validate_custom_price(Money::zero()).is_ok());
/// assert!(validate_custom_price(Money::from_won(-1)).is_err());
/// assert!(validate_custom_price(Money::from_won(i64::MAX)).is_err());
/// ```
pub fn validate_custom_price(price: Money) -> ValidationResult<()> {
    if !(0..=MAX_UNIT_PRICE).contains(&price.won()) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a user-entered line name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters (counted as chars, names are mostly Hangul)
///
/// ## Returns
/// The trimmed name.
pub fn validate_line_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_CHARS,
        });
    }

    Ok(name.to_string())
}

/// Validates a catalog item id.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, digits, hyphens and underscores only
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "item id".to_string(),
        });
    }

    if id.len() > MAX_ITEM_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "item id".to_string(),
            max: MAX_ITEM_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "item id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more line fits on a quotation.
pub fn validate_quotation_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_QUOTATION_LINES {
        return Err(ValidationError::OutOfRange {
            field: "quotation lines".to_string(),
            min: 0,
            max: MAX_QUOTATION_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
