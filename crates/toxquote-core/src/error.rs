//! # Error Types
//!
//! Domain-specific error types for toxquote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  toxquote-core errors (this file)                                      │
//! │  ├── CoreError        - Parsing and quotation editing failures         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  toxquote-catalog errors (separate crate)                              │
//! │  └── CatalogError     - Catalog/config loading failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CatalogError → CLI (anyhow)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing functions themselves never fail: a missing price resolves to
//! `None` ("price on request"), an unparseable duration to one cycle, an
//! unknown mode label to the manual mode. Errors here come from strict
//! parsing and from editing a quotation.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Mode label is not one of the known modes (strict parsing only).
    #[error("Unknown pricing mode: '{0}'")]
    UnknownMode(String),

    /// Route label is not one of the supported administration routes.
    #[error("Unknown administration route: '{0}'")]
    UnknownRoute(String),

    /// Standard label is not a known regulatory standard.
    #[error("Unknown regulatory standard: '{0}'")]
    UnknownStandard(String),

    /// Combination arity outside 2..=4.
    #[error("Unsupported combination arity: {0} (expected 2, 3 or 4)")]
    InvalidComboArity(u8),

    /// Catalog has no item (or combination item) with this id.
    #[error("Catalog item not found: {0}")]
    ItemNotFound(String),

    /// Line item cannot be found in the quotation.
    #[error("Line item not found: {0}")]
    LineNotFound(String),

    /// An option line was attached to another option line.
    ///
    /// Options hang off top-level lines only, so the parent must not itself
    /// be an option.
    #[error("Line {0} is an option and cannot own options")]
    NestedOption(String),

    /// Quotation has exceeded maximum allowed lines.
    #[error("Quotation cannot have more than {max} lines")]
    QuotationTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before the engine runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate catalog item id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidComboArity(5);
        assert_eq!(
            err.to_string(),
            "Unsupported combination arity: 5 (expected 2, 3 or 4)"
        );

        let err = CoreError::QuotationTooLarge { max: 200 };
        assert_eq!(err.to_string(), "Quotation cannot have more than 200 lines");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "discount rate".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "discount rate must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
