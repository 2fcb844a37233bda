//! Built-in demo catalog.
//!
//! Prices are illustrative round numbers, not a real price list.

use toxquote_core::catalog::Catalog;

use crate::error::CatalogResult;
use crate::loader::CatalogLoader;

/// JSON source of [`sample_catalog`].
pub const SAMPLE_CATALOG_JSON: &str = include_str!("../data/sample_catalog.json");

/// Builds the demo catalog.
pub fn sample_catalog() -> CatalogResult<Catalog> {
    CatalogLoader::from_json_str(SAMPLE_CATALOG_JSON)
}
