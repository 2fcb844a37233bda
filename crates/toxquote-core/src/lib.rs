//! # toxquote-core: Pure Pricing Logic for ToxQuote
//!
//! This crate is the **heart** of ToxQuote. It turns a selection of
//! toxicology tests into a priced quotation using pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ToxQuote Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    quote-cli (apps/quote-cli)                   │   │
//! │  │    request JSON ──► Quotation ──► summary (text / JSON)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                toxquote-catalog (Loading Layer)                 │   │
//! │  │      catalog JSON, config TOML, env overrides, sample data      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ toxquote-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │ duration  │  │ surcharge │  │  totals   │  │   │
//! │  │   │  overlay  │  │  13주→4   │  │  X / Y    │  │ discount  │  │   │
//! │  │   │  chain    │  │  6개월→6  │  │  rules    │  │ rounding  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (catalog items, routes, modes, discount rate)
//! - [`money`] - Money type in whole won (integer only)
//! - [`format`] - `1,234,567원` and `123.4567만원` display
//! - [`catalog`] - Catalog, overlay and metadata tables
//! - [`pricing`] - Route price resolution through the overlay chain
//! - [`duration`] - Duration label → analysis cycle count
//! - [`surcharge`] - Formulation/validation surcharge
//! - [`totals`] - Subtotal, discount and grand total
//! - [`line_item`] - Lines selected onto a quotation
//! - [`quotation`] - The editable quotation aggregate
//! - [`config`] - Surcharge rates and display settings
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same catalog and selection, same quotation
//! 2. **No I/O**: loading catalogs and config lives in `toxquote-catalog`
//! 3. **Integer Money**: all amounts are whole won in `i64`, rounding happens once
//! 4. **Total Engine**: missing prices and odd durations degrade, never fail
//!
//! ## Example Usage
//!
//! ```rust
//! use toxquote_core::money::Money;
//! use toxquote_core::totals::compute_total_from_subtotal;
//! use toxquote_core::types::DiscountRate;
//!
//! let totals = compute_total_from_subtotal(
//!     Money::from_won(10_000_000),
//!     Money::from_won(2_000_000),
//!     DiscountRate::from_percent(10),
//! );
//!
//! assert_eq!(totals.total.won(), 10_800_000);
//! assert_eq!(totals.total.to_string(), "10,800,000원");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod duration;
pub mod error;
pub mod format;
pub mod line_item;
pub mod money;
pub mod pricing;
pub mod quotation;
pub mod surcharge;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, MetadataTable, OverlayTable};
pub use config::{FormulationCharges, PricingConfig, SurchargeRates};
pub use error::{CoreError, CoreResult, ValidationError};
pub use line_item::SelectedLineItem;
pub use money::Money;
pub use pricing::{resolve_combo_price, resolve_price, PriceOrigin, ResolvedPrice};
pub use quotation::{Quotation, QuotationSummary};
pub use surcharge::{compute_surcharge, FormulationRule, NoFormulationCharge, SurchargeBreakdown};
pub use totals::{compute_total, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed on a single quotation.
///
/// ## Business Reason
/// A study quotation rarely runs past a few dozen tests; the cap stops a
/// runaway import from producing an unprintable document.
pub const MAX_QUOTATION_LINES: usize = 200;
