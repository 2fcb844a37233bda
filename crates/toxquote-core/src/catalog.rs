//! # Catalog Model
//!
//! Read-only lookup structures the engine prices against.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Catalog                                        │
//! │                                                                         │
//! │   items        ItemId → CatalogItem        (base price per route)      │
//! │   combos       ItemId → ComboCatalogItem   (price per arity)           │
//! │   tier1        ItemId → RoutePrices        (consulted first)           │
//! │   tier2        ItemId → RoutePrices        (consulted second)          │
//! │   metadata     ItemId → ItemMetadata       (surcharge flags)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `Catalog` is passed by reference into every engine call; there is no
//! global catalog state. Building one is the job of the catalog loader.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CatalogItem, ComboCatalogItem, ItemId, ItemMetadata, Route, RoutePrices};

// =============================================================================
// Overlay Table
// =============================================================================

/// Sparse price overrides keyed by item and route.
///
/// An item may appear in either tier, both, or neither; an item may also
/// carry overrides for only some of its routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayTable(HashMap<ItemId, RoutePrices>);

impl OverlayTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of one override.
    pub fn with(mut self, id: impl Into<ItemId>, route: Route, price: Money) -> Self {
        self.insert(id.into(), route, price);
        self
    }

    pub fn insert(&mut self, id: ItemId, route: Route, price: Money) {
        let entry = self.0.entry(id).or_default();
        *entry = std::mem::take(entry).with(route, price);
    }

    /// Override for `id` on `route`, if this tier has one.
    pub fn get(&self, id: &ItemId, route: Route) -> Option<Money> {
        self.0.get(id).and_then(|prices| prices.get(route))
    }

    pub fn contains_item(&self, id: &ItemId) -> bool {
        self.0.contains_key(id)
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ItemId, RoutePrices)> for OverlayTable {
    fn from_iter<I: IntoIterator<Item = (ItemId, RoutePrices)>>(iter: I) -> Self {
        OverlayTable(iter.into_iter().collect())
    }
}

// =============================================================================
// Metadata Table
// =============================================================================

/// Surcharge flags per item. Items without an entry contribute nothing to
/// the surcharge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTable(HashMap<ItemId, ItemMetadata>);

impl MetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<ItemId>, metadata: ItemMetadata) -> Self {
        self.0.insert(id.into(), metadata);
        self
    }

    pub fn get(&self, id: &ItemId) -> Option<&ItemMetadata> {
        self.0.get(id)
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ItemId, ItemMetadata)> for MetadataTable {
    fn from_iter<I: IntoIterator<Item = (ItemId, ItemMetadata)>>(iter: I) -> Self {
        MetadataTable(iter.into_iter().collect())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The complete set of catalog tables.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<ItemId, CatalogItem>,
    combos: HashMap<ItemId, ComboCatalogItem>,
    /// Items in catalog order, for listings.
    order: Vec<ItemId>,
    pub tier1: OverlayTable,
    pub tier2: OverlayTable,
    pub metadata: MetadataTable,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate item ids.
    ///
    /// Item and combo ids share one namespace because both are referenced
    /// by selected line items.
    pub fn from_parts(
        items: Vec<CatalogItem>,
        combos: Vec<ComboCatalogItem>,
        tier1: OverlayTable,
        tier2: OverlayTable,
        metadata: MetadataTable,
    ) -> CoreResult<Self> {
        let mut catalog = Catalog {
            tier1,
            tier2,
            metadata,
            ..Catalog::default()
        };

        for item in items {
            catalog.ensure_unique(&item.id)?;
            catalog.order.push(item.id.clone());
            catalog.items.insert(item.id.clone(), item);
        }

        for combo in combos {
            catalog.ensure_unique(&combo.id)?;
            catalog.order.push(combo.id.clone());
            catalog.combos.insert(combo.id.clone(), combo);
        }

        Ok(catalog)
    }

    fn ensure_unique(&self, id: &ItemId) -> Result<(), ValidationError> {
        if self.items.contains_key(id) || self.combos.contains_key(id) {
            return Err(ValidationError::Duplicate {
                field: "catalog item id".to_string(),
                value: id.to_string(),
            });
        }
        Ok(())
    }

    pub fn item(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.items.get(id)
    }

    pub fn combo(&self, id: &ItemId) -> Option<&ComboCatalogItem> {
        self.combos.get(id)
    }

    /// Duration label of a regular or combination item.
    pub fn duration_of(&self, id: &ItemId) -> Option<&str> {
        self.items
            .get(id)
            .map(|item| item.duration.as_str())
            .or_else(|| self.combos.get(id).map(|combo| combo.duration.as_str()))
    }

    /// Regular items in catalog order.
    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Combination items in catalog order.
    pub fn combos(&self) -> impl Iterator<Item = &ComboCatalogItem> {
        self.order.iter().filter_map(|id| self.combos.get(id))
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id) || self.combos.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
