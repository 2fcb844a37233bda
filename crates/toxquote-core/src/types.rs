//! # Domain Types
//!
//! Catalog reference data and the selectors that steer pricing.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │  CatalogItem    │   │ ComboCatalogItem │   │  ItemMetadata   │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  id             │   │  id              │   │  system         │      │
//! │  │  name/category  │   │  name/category   │   │  analysis_req.  │      │
//! │  │  duration       │   │  price_2/3/4     │   └─────────────────┘      │
//! │  │  prices[route]  │   └──────────────────┘                            │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Selectors: Route · Standard · Mode · ComboArity · DiscountRate         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog types are immutable reference data: built once at catalog load
//! time and only ever borrowed by the engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Identifiers
// =============================================================================

/// Stable catalog identifier shared by items, overlays and metadata.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId(id)
    }
}

// =============================================================================
// Administration Route
// =============================================================================

/// Route by which the test article is administered.
///
/// Oral and intravenous are priced for nearly every item; the others are
/// present for the items that support them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Oral,
    Intravenous,
    Subcutaneous,
    Intramuscular,
    Dermal,
    Inhalation,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Oral,
        Route::Intravenous,
        Route::Subcutaneous,
        Route::Intramuscular,
        Route::Dermal,
        Route::Inhalation,
    ];
}

impl Default for Route {
    fn default() -> Self {
        Route::Oral
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Route::Oral => "oral",
            Route::Intravenous => "intravenous",
            Route::Subcutaneous => "subcutaneous",
            Route::Intramuscular => "intramuscular",
            Route::Dermal => "dermal",
            Route::Inhalation => "inhalation",
        };
        f.write_str(label)
    }
}

impl FromStr for Route {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "oral" | "po" | "경구" => Ok(Route::Oral),
            "intravenous" | "iv" | "정맥" => Ok(Route::Intravenous),
            "subcutaneous" | "sc" | "피하" => Ok(Route::Subcutaneous),
            "intramuscular" | "im" | "근육" => Ok(Route::Intramuscular),
            "dermal" | "피부" => Ok(Route::Dermal),
            "inhalation" | "흡입" => Ok(Route::Inhalation),
            other => Err(CoreError::UnknownRoute(other.to_string())),
        }
    }
}

/// Per-route prices of one item. Routes without an entry are "price on
/// request".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePrices(BTreeMap<Route, Money>);

impl RoutePrices {
    pub fn new() -> Self {
        RoutePrices(BTreeMap::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, route: Route, price: Money) -> Self {
        self.0.insert(route, price);
        self
    }

    pub fn get(&self, route: Route) -> Option<Money> {
        self.0.get(&route).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Route, Money)> + '_ {
        self.0.iter().map(|(route, price)| (*route, *price))
    }
}

impl FromIterator<(Route, Money)> for RoutePrices {
    fn from_iter<I: IntoIterator<Item = (Route, Money)>>(iter: I) -> Self {
        RoutePrices(iter.into_iter().collect())
    }
}

// =============================================================================
// Regulatory Standard
// =============================================================================

/// Regulatory standard the study is run under.
///
/// Only `Global` consults the overlay tables; `Baseline` always bills the
/// catalog base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Standard {
    /// Domestic baseline guideline.
    Baseline,
    /// Global (overlay-triggering) guideline.
    Global,
}

impl Standard {
    #[inline]
    pub fn applies_overlays(&self) -> bool {
        matches!(self, Standard::Global)
    }
}

impl Default for Standard {
    fn default() -> Self {
        Standard::Baseline
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standard::Baseline => write!(f, "baseline"),
            Standard::Global => write!(f, "global"),
        }
    }
}

impl FromStr for Standard {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baseline" | "domestic" | "kr" => Ok(Standard::Baseline),
            "global" | "oecd" | "ich" => Ok(Standard::Global),
            other => Err(CoreError::UnknownStandard(other.to_string())),
        }
    }
}

// =============================================================================
// Catalog Items
// =============================================================================

/// One priceable test in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    /// Free-form duration label: "4주", "3개월", "단회", "GD 6-17", "-".
    #[serde(default)]
    pub duration: String,
    /// Base price per route.
    #[serde(default)]
    pub prices: RoutePrices,
}

/// Number of components priced together in a combination product.
///
/// Serialized as the plain number (`2`, `3`, `4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ComboArity {
    Two,
    Three,
    Four,
}

impl ComboArity {
    pub const fn count(&self) -> u8 {
        match self {
            ComboArity::Two => 2,
            ComboArity::Three => 3,
            ComboArity::Four => 4,
        }
    }
}

impl TryFrom<u8> for ComboArity {
    type Error = CoreError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            2 => Ok(ComboArity::Two),
            3 => Ok(ComboArity::Three),
            4 => Ok(ComboArity::Four),
            other => Err(CoreError::InvalidComboArity(other)),
        }
    }
}

impl From<ComboArity> for u8 {
    fn from(arity: ComboArity) -> Self {
        arity.count()
    }
}

impl fmt::Display for ComboArity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}종", self.count())
    }
}

/// A combination-product test: one price per supported arity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboCatalogItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub price_2: Option<Money>,
    #[serde(default)]
    pub price_3: Option<Money>,
    #[serde(default)]
    pub price_4: Option<Money>,
}

// =============================================================================
// Item Metadata
// =============================================================================

/// Biological-system classification of a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BiologicalSystem {
    /// Whole-animal studies.
    InVivo,
    /// Cell/tissue based assays.
    InVitro,
}

/// Surcharge-relevant flags of one catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub system: BiologicalSystem,
    /// Item needs repeated dose-formulation content analysis.
    #[serde(default)]
    pub analysis_required: bool,
}

// =============================================================================
// Pricing Mode
// =============================================================================

/// Selects the surcharge formula for a quotation.
///
/// `AutoSingle` is the regular single-substance branch. The `AutoCombination`,
/// `AutoHealthFood` and `AutoCosmetic` modes price a different product
/// catalog whose formulation charge comes from a pluggable rule. `Manual`
/// leaves the surcharge to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    AutoSingle,
    AutoCombination,
    AutoHealthFood,
    AutoCosmetic,
    Manual,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::AutoSingle,
        Mode::AutoCombination,
        Mode::AutoHealthFood,
        Mode::AutoCosmetic,
        Mode::Manual,
    ];

    /// Returns true if the engine computes the surcharge for this mode.
    pub fn is_automatic(&self) -> bool {
        !matches!(self, Mode::Manual)
    }

    /// Returns true for the alternate-catalog automatic modes.
    pub fn is_alternate(&self) -> bool {
        matches!(
            self,
            Mode::AutoCombination | Mode::AutoHealthFood | Mode::AutoCosmetic
        )
    }

    /// Lenient parse: an unrecognized label degrades to `Manual`.
    ///
    /// Falling back to manual means an unknown mode yields a zero surcharge
    /// and never an automatic one.
    pub fn from_label(label: &str) -> Mode {
        label.parse().unwrap_or_else(|_| {
            tracing::warn!(label, "Unknown pricing mode, treating as manual");
            Mode::Manual
        })
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::AutoSingle
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mode::AutoSingle => "auto_single",
            Mode::AutoCombination => "auto_combination",
            Mode::AutoHealthFood => "auto_health_food",
            Mode::AutoCosmetic => "auto_cosmetic",
            Mode::Manual => "manual",
        };
        f.write_str(label)
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto_single" | "auto" | "single" => Ok(Mode::AutoSingle),
            "auto_combination" | "combination" | "combo" => Ok(Mode::AutoCombination),
            "auto_health_food" | "health_food" => Ok(Mode::AutoHealthFood),
            "auto_cosmetic" | "cosmetic" => Ok(Mode::AutoCosmetic),
            "manual" | "none" => Ok(Mode::Manual),
            other => Err(CoreError::UnknownMode(other.to_string())),
        }
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1000 bps = 10%. Signed: an out-of-range rate
/// is carried through the arithmetic as-is and rejected by validation, not
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(i64);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: i64) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from whole percent.
    #[inline]
    pub const fn from_percent(pct: i64) -> Self {
        DiscountRate(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> i64 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
