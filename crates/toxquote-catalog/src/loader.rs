//! # Catalog Loader
//!
//! Reads catalog tables from JSON into a [`Catalog`].
//!
//! ## File Format
//! ```json
//! {
//!   "items": [
//!     { "id": "RD-4W", "name": "4주 반복투여독성", "category": "repeat-dose",
//!       "duration": "4주", "prices": { "oral": 18000000, "intravenous": 21000000 } }
//!   ],
//!   "combos": [
//!     { "id": "HF-SD", "name": "건강기능식품 단회투여", "category": "combination",
//!       "duration": "단회", "price_2": 7000000, "price_3": 9000000 }
//!   ],
//!   "tier1":    [ { "id": "RD-4W", "prices": { "oral": 22000000 } } ],
//!   "tier2":    [],
//!   "metadata": [ { "id": "RD-4W", "system": "in_vivo", "analysis_required": true } ]
//! }
//! ```
//!
//! Every table is optional. Overlay and metadata rows may name ids the
//! catalog does not carry; they are kept and reported at `warn!`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use toxquote_core::catalog::{Catalog, MetadataTable, OverlayTable};
use toxquote_core::validation::validate_item_id;
use toxquote_core::{CatalogItem, ComboCatalogItem, ItemId, ItemMetadata, RoutePrices};

use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// File Schema
// =============================================================================

/// One overlay row: sparse per-route prices for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayEntry {
    pub id: ItemId,
    #[serde(default)]
    pub prices: RoutePrices,
}

/// One metadata row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub id: ItemId,
    #[serde(flatten)]
    pub metadata: ItemMetadata,
}

/// On-disk shape of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub combos: Vec<ComboCatalogItem>,
    #[serde(default)]
    pub tier1: Vec<OverlayEntry>,
    #[serde(default)]
    pub tier2: Vec<OverlayEntry>,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

impl CatalogFile {
    /// Validates ids and builds the engine's [`Catalog`].
    pub fn into_catalog(self) -> CatalogResult<Catalog> {
        for id in self
            .items
            .iter()
            .map(|item| &item.id)
            .chain(self.combos.iter().map(|combo| &combo.id))
        {
            validate_item_id(id.as_str())?;
        }

        let (tier1, _) = overlay_table("tier1", self.tier1);
        let (tier2, _) = overlay_table("tier2", self.tier2);
        let (metadata, _) = metadata_table(self.metadata);

        let catalog = Catalog::from_parts(self.items, self.combos, tier1, tier2, metadata)?;
        report_dangling(&catalog);

        Ok(catalog)
    }
}

/// Builds an overlay tier. A repeated (item, route) pair keeps the last
/// row; returns the table and how many prices were replaced.
fn overlay_table(table_name: &str, entries: Vec<OverlayEntry>) -> (OverlayTable, usize) {
    let mut table = OverlayTable::new();
    let mut replaced = 0;

    for entry in entries {
        for (route, price) in entry.prices.iter() {
            if let Some(previous) = table.get(&entry.id, route) {
                warn!(
                    table = table_name,
                    item = %entry.id,
                    %route,
                    previous = previous.won(),
                    price = price.won(),
                    "Duplicate overlay price, keeping the last row"
                );
                replaced += 1;
            }
            table.insert(entry.id.clone(), route, price);
        }
    }

    (table, replaced)
}

/// Builds the metadata table. A repeated id keeps the last row.
fn metadata_table(entries: Vec<MetadataEntry>) -> (MetadataTable, usize) {
    let mut table = MetadataTable::new();
    let mut replaced = 0;

    for entry in entries {
        if table.get(&entry.id).is_some() {
            warn!(item = %entry.id, "Duplicate metadata row, keeping the last row");
            replaced += 1;
        }
        table = table.with(entry.id, entry.metadata);
    }

    (table, replaced)
}

fn report_dangling(catalog: &Catalog) {
    let tables = [
        ("tier1", catalog.tier1.item_ids().collect::<Vec<_>>()),
        ("tier2", catalog.tier2.item_ids().collect::<Vec<_>>()),
        ("metadata", catalog.metadata.item_ids().collect::<Vec<_>>()),
    ];

    for (table, ids) in tables {
        for id in ids.into_iter().filter(|id| !catalog.contains(id)) {
            warn!(table, item = %id, "Catalog table references an unknown item");
        }
    }
}

// =============================================================================
// Loader
// =============================================================================

/// Entry points for reading a catalog.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Reads and builds a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Catalog> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::CatalogLoadFailed(format!("{}: {}", path.display(), e)))?;

        let catalog = Self::from_json_str(&contents)?;
        info!(?path, entries = catalog.len(), "Catalog loaded");

        Ok(catalog)
    }

    /// Builds a catalog from JSON text.
    pub fn from_json_str(json: &str) -> CatalogResult<Catalog> {
        Self::parse(json)?.into_catalog()
    }

    /// Parses JSON text without building the catalog.
    pub fn parse(json: &str) -> CatalogResult<CatalogFile> {
        Ok(serde_json::from_str(json)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
