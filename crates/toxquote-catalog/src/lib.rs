//! # toxquote-catalog: Catalog & Configuration Loading
//!
//! Everything that touches the file system on behalf of `toxquote-core`.
//!
//! ## Modules
//!
//! - [`loader`] - Catalog JSON → [`toxquote_core::Catalog`]
//! - [`config`] - `pricing.toml` + environment → [`toxquote_core::PricingConfig`]
//! - [`sample`] - Built-in demo catalog
//! - [`error`] - Loading errors
//!
//! ## Example Usage
//!
//! ```rust
//! use toxquote_catalog::sample_catalog;
//! use toxquote_core::{ItemId, Mode, NoFormulationCharge, PricingConfig, Quotation, Route, Standard};
//!
//! let catalog = sample_catalog().unwrap();
//! let mut quotation = Quotation::new(Standard::Baseline, Route::Oral, Mode::AutoSingle);
//! quotation.add_from_catalog(&catalog, &ItemId::new("AMES"), None).unwrap();
//!
//! let summary = quotation.summary(&catalog, &PricingConfig::default(), &NoFormulationCharge);
//! assert_eq!(summary.total_full, "14,000,000원");
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod sample;

pub use config::ConfigLoader;
pub use error::{CatalogError, CatalogResult};
pub use loader::{CatalogFile, CatalogLoader};
pub use sample::sample_catalog;
