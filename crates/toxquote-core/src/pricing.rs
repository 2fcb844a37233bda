//! # Price Resolver
//!
//! Resolves the unit price of a catalog item for a route and regulatory
//! standard.
//!
//! ## Overlay Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Price Source Chain                                   │
//! │                                                                         │
//! │  Standard::Baseline                                                    │
//! │     └── BasePrice ─────────────────────────────► item.prices[route]    │
//! │                                                                         │
//! │  Standard::Global                                                      │
//! │     ├── Tier-1 overlay ── hit? ──► return                              │
//! │     │        │ miss                                                    │
//! │     ├── Tier-2 overlay ── hit? ──► return                              │
//! │     │        │ miss                                                    │
//! │     └── BasePrice ─────────────────────────────► item.prices[route]    │
//! │                                                                         │
//! │  A miss everywhere yields None: "price on request".                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The precedence lives in exactly one place, [`price_chain`]. Adding a
//! tier means adding a source to that list.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::catalog::{Catalog, OverlayTable};
use crate::money::Money;
use crate::types::{CatalogItem, ComboArity, ComboCatalogItem, ItemId, Route, Standard};

// =============================================================================
// Price Sources
// =============================================================================

/// Where a resolved price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PriceOrigin {
    Tier1Overlay,
    Tier2Overlay,
    Base,
    Combination,
}

/// A price together with the source that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPrice {
    pub price: Money,
    pub origin: PriceOrigin,
}

/// One link in the price chain.
pub trait PriceSource {
    /// Which origin a hit from this source is reported as.
    fn origin(&self) -> PriceOrigin;

    /// Returns a price if this source has one for `item` on `route`.
    fn lookup(&self, item: &CatalogItem, route: Route) -> Option<Money>;
}

/// An overlay tier used as a price source.
pub struct OverlaySource<'a> {
    table: &'a OverlayTable,
    origin: PriceOrigin,
}

impl<'a> OverlaySource<'a> {
    pub fn tier1(table: &'a OverlayTable) -> Self {
        OverlaySource {
            table,
            origin: PriceOrigin::Tier1Overlay,
        }
    }

    pub fn tier2(table: &'a OverlayTable) -> Self {
        OverlaySource {
            table,
            origin: PriceOrigin::Tier2Overlay,
        }
    }
}

impl PriceSource for OverlaySource<'_> {
    fn origin(&self) -> PriceOrigin {
        self.origin
    }

    fn lookup(&self, item: &CatalogItem, route: Route) -> Option<Money> {
        self.table.get(&item.id, route)
    }
}

/// The item's own per-route base price. Always last in a chain.
pub struct BasePrice;

impl PriceSource for BasePrice {
    fn origin(&self) -> PriceOrigin {
        PriceOrigin::Base
    }

    fn lookup(&self, item: &CatalogItem, route: Route) -> Option<Money> {
        item.prices.get(route)
    }
}

/// Ordered list of sources consulted for `standard`.
pub fn price_chain<'a>(
    standard: Standard,
    tier1: &'a OverlayTable,
    tier2: &'a OverlayTable,
) -> Vec<Box<dyn PriceSource + 'a>> {
    if standard.applies_overlays() {
        vec![
            Box::new(OverlaySource::tier1(tier1)),
            Box::new(OverlaySource::tier2(tier2)),
            Box::new(BasePrice),
        ]
    } else {
        vec![Box::new(BasePrice)]
    }
}

/// Walks `chain` and returns the first hit.
pub fn first_hit(
    chain: &[Box<dyn PriceSource + '_>],
    item: &CatalogItem,
    route: Route,
) -> Option<ResolvedPrice> {
    chain.iter().find_map(|source| {
        source.lookup(item, route).map(|price| ResolvedPrice {
            price,
            origin: source.origin(),
        })
    })
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the unit price of `item` on `route` under `standard`.
///
/// Returns `None` when no source has a price ("price on request").
///
/// ## Example
/// ```rust
/// use toxquote_core::catalog::OverlayTable;
/// use toxquote_core::money::Money;
/// use toxquote_core::pricing::resolve_price;
/// use toxquote_core::types::{CatalogItem, ItemId, Route, RoutePrices, Standard};
///
/// let item = CatalogItem {
///     id: ItemId::new("RD-4W"),
///     name: "4-week repeat dose".into(),
///     category: "repeat-dose".into(),
///     duration: "4주".into(),
///     prices: RoutePrices::new()
///         .with(Route::Oral, Money::from_won(500_000))
///         .with(Route::Intravenous, Money::from_won(800_000)),
/// };
/// let tier1 = OverlayTable::new().with("RD-4W", Route::Oral, Money::from_won(650_000));
/// let tier2 = OverlayTable::new();
///
/// let baseline = resolve_price(&item, Route::Oral, Standard::Baseline, &tier1, &tier2);
/// assert_eq!(baseline, Some(Money::from_won(500_000)));
///
/// let global = resolve_price(&item, Route::Oral, Standard::Global, &tier1, &tier2);
/// assert_eq!(global, Some(Money::from_won(650_000)));
/// ```
pub fn resolve_price(
    item: &CatalogItem,
    route: Route,
    standard: Standard,
    tier1: &OverlayTable,
    tier2: &OverlayTable,
) -> Option<Money> {
    resolve_price_detailed(item, route, standard, tier1, tier2).map(|resolved| resolved.price)
}

/// Same as [`resolve_price`], reporting which source supplied the price.
pub fn resolve_price_detailed(
    item: &CatalogItem,
    route: Route,
    standard: Standard,
    tier1: &OverlayTable,
    tier2: &OverlayTable,
) -> Option<ResolvedPrice> {
    let chain = price_chain(standard, tier1, tier2);
    let resolved = first_hit(&chain, item, route);

    match resolved {
        Some(hit) => debug!(
            item = %item.id,
            %route,
            %standard,
            origin = ?hit.origin,
            price = hit.price.won(),
            "Resolved unit price"
        ),
        None => debug!(item = %item.id, %route, %standard, "No price configured, price on request"),
    }

    resolved
}

/// Resolves the unit price of a combination item for `arity`.
///
/// Returns the arity's price field as-is; overlays never apply to
/// combination items.
pub fn resolve_combo_price(combo: &ComboCatalogItem, arity: ComboArity) -> Option<Money> {
    let price = match arity {
        ComboArity::Two => combo.price_2,
        ComboArity::Three => combo.price_3,
        ComboArity::Four => combo.price_4,
    };
    debug!(item = %combo.id, %arity, price = ?price.map(|p| p.won()), "Resolved combination price");
    price
}

/// Catalog-level convenience: resolves by id against the catalog's own
/// overlay tables. Unknown ids resolve to `None`.
pub fn resolve_in_catalog(
    catalog: &Catalog,
    id: &ItemId,
    route: Route,
    standard: Standard,
) -> Option<ResolvedPrice> {
    let item = catalog.item(id)?;
    resolve_price_detailed(item, route, standard, &catalog.tier1, &catalog.tier2)
}

// =============================================================================
// Unit Tests
// =============================================================================
