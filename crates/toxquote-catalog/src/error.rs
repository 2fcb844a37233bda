//! # Catalog Error Types
//!
//! Failures while reading catalog tables or pricing configuration.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Catalog        │  │  Configuration  │  │  Domain                 │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  CatalogLoad    │  │  ConfigLoad     │  │  Core (duplicate ids,   │ │
//! │  │  InvalidCatalog │  │  ConfigSave     │  │  bad item ids, ...)     │ │
//! │  │                 │  │  InvalidConfig  │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use toxquote_core::{CoreError, ValidationError};

/// Result type alias for loading operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error type covering catalog and configuration loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Catalog Errors
    // =========================================================================
    /// Catalog file could not be read.
    #[error("Failed to load catalog: {0}")]
    CatalogLoadFailed(String),

    /// Catalog JSON is malformed or has the wrong shape.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// Config parsed but failed validation.
    #[error("Invalid pricing configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Rejected by the engine's own checks.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::Core(CoreError::Validation(err))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::InvalidCatalog(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for CatalogError {
    fn from(err: toml::ser::Error) -> Self {
        CatalogError::ConfigSaveFailed(err.to_string())
    }
}
