//! # Selected Line Items
//!
//! A test the user has put on a quotation.
//!
//! ## Snapshot + Override
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog_name / catalog_price   frozen when the line is added          │
//! │  custom_name  / custom_price    user edits, win whenever present       │
//! │                                                                         │
//! │  name()  = custom_name  ?? catalog_name                                 │
//! │  price() = custom_price ?? catalog_price      (None = price on request) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Editing a line never touches the catalog, so a quotation can diverge from
//! list prices while the catalog stays shared and immutable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::pricing::{PriceOrigin, ResolvedPrice};
use crate::types::{CatalogItem, ComboArity, ComboCatalogItem, ItemId, Route};

/// One line of a quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectedLineItem {
    /// Instance id of this line (UUID v4). The same catalog item may appear
    /// on several lines.
    pub line_id: String,

    /// Catalog item (or combination item) this line was created from.
    pub item_id: ItemId,

    /// Catalog name at time of adding (frozen).
    pub catalog_name: String,

    /// Catalog category at time of adding (frozen).
    pub category: String,

    /// Catalog duration label at time of adding (frozen).
    pub duration: String,

    /// Resolved catalog price at time of adding. `None` = price on request.
    pub catalog_price: Option<Money>,

    /// Which price source produced `catalog_price`.
    pub price_origin: Option<PriceOrigin>,

    /// Route the price was resolved for (regular items).
    pub route: Option<Route>,

    /// Arity the price was resolved for (combination items).
    #[ts(type = "number | null")]
    pub combo_arity: Option<ComboArity>,

    /// User-entered display name.
    pub custom_name: Option<String>,

    /// User-entered unit price.
    pub custom_price: Option<Money>,

    /// Dependent option of another line.
    pub is_option: bool,

    /// Line this option belongs to.
    pub parent_line_id: Option<String>,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl SelectedLineItem {
    /// Creates a line from a regular catalog item and its resolved price.
    pub fn from_catalog(item: &CatalogItem, route: Route, resolved: Option<ResolvedPrice>) -> Self {
        SelectedLineItem {
            line_id: Uuid::new_v4().to_string(),
            item_id: item.id.clone(),
            catalog_name: item.name.clone(),
            category: item.category.clone(),
            duration: item.duration.clone(),
            catalog_price: resolved.map(|r| r.price),
            price_origin: resolved.map(|r| r.origin),
            route: Some(route),
            combo_arity: None,
            custom_name: None,
            custom_price: None,
            is_option: false,
            parent_line_id: None,
            added_at: Utc::now(),
        }
    }

    /// Creates a line from a combination item and its resolved price.
    pub fn from_combo(combo: &ComboCatalogItem, arity: ComboArity, price: Option<Money>) -> Self {
        SelectedLineItem {
            line_id: Uuid::new_v4().to_string(),
            item_id: combo.id.clone(),
            catalog_name: format!("{} ({})", combo.name, arity),
            category: combo.category.clone(),
            duration: combo.duration.clone(),
            catalog_price: price,
            price_origin: price.map(|_| PriceOrigin::Combination),
            route: None,
            combo_arity: Some(arity),
            custom_name: None,
            custom_price: None,
            is_option: false,
            parent_line_id: None,
            added_at: Utc::now(),
        }
    }

    /// Marks this line as a dependent option of `parent_line_id`.
    pub fn into_option_of(mut self, parent_line_id: &str) -> Self {
        self.is_option = true;
        self.parent_line_id = Some(parent_line_id.to_string());
        self
    }

    /// Effective display name.
    pub fn name(&self) -> &str {
        self.custom_name.as_deref().unwrap_or(&self.catalog_name)
    }

    /// Effective unit price. `None` = price on request.
    pub fn price(&self) -> Option<Money> {
        self.custom_price.or(self.catalog_price)
    }

    /// Amount this line contributes to the subtotal.
    pub fn billable_price(&self) -> Money {
        self.price().unwrap_or_default()
    }

    /// Returns true if the line has no price from any source.
    pub fn is_price_on_request(&self) -> bool {
        self.price().is_none()
    }

    /// Returns true if either override is set.
    pub fn is_overridden(&self) -> bool {
        self.custom_name.is_some() || self.custom_price.is_some()
    }

    /// Returns true if this line is an option of `line_id`.
    pub fn belongs_to(&self, line_id: &str) -> bool {
        self.parent_line_id.as_deref() == Some(line_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoutePrices;

    fn catalog_item() -> CatalogItem {
        CatalogItem {
            id: ItemId::new("AT-SD"),
            name: "Single-dose toxicity".to_string(),
            category: "acute".to_string(),
            duration: "단회".to_string(),
            prices: RoutePrices::new().with(Route::Oral, Money::from_won(3_000_000)),
        }
    }

    fn resolved(won: i64) -> Option<ResolvedPrice> {
        Some(ResolvedPrice {
            price: Money::from_won(won),
            origin: PriceOrigin::Base,
        })
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut line = SelectedLineItem::from_catalog(&catalog_item(), Route::Oral, resolved(3_000_000));
        assert_eq!(line.name(), "Single-dose toxicity");
        assert_eq!(line.billable_price(), Money::from_won(3_000_000));
        assert!(!line.is_overridden());

        line.custom_name = Some("Acute tox (rat)".to_string());
        line.custom_price = Some(Money::from_won(2_500_000));
        assert_eq!(line.name(), "Acute tox (rat)");
        assert_eq!(line.price(), Some(Money::from_won(2_500_000)));
        assert!(line.is_overridden());
    }

    #[test]
    fn test_price_on_request_bills_zero() {
        let line = SelectedLineItem::from_catalog(&catalog_item(), Route::Dermal, None);
        assert!(line.is_price_on_request());
        assert_eq!(line.billable_price(), Money::zero());
        assert_eq!(line.price_origin, None);
    }

    #[test]
    fn test_custom_price_fills_price_on_request() {
        let mut line = SelectedLineItem::from_catalog(&catalog_item(), Route::Dermal, None);
        line.custom_price = Some(Money::from_won(1_200_000));
        assert!(!line.is_price_on_request());
        assert_eq!(line.billable_price(), Money::from_won(1_200_000));
    }

    #[test]
    fn test_combo_line_name_includes_arity() {
        let combo = ComboCatalogItem {
            id: ItemId::new("CB-AT"),
            name: "Combination acute".to_string(),
            category: "combination".to_string(),
            duration: "단회".to_string(),
            price_2: Some(Money::from_won(4_000_000)),
            price_3: None,
            price_4: None,
        };
        let line = SelectedLineItem::from_combo(&combo, ComboArity::Two, combo.price_2);
        assert_eq!(line.name(), "Combination acute (2종)");
        assert_eq!(line.price_origin, Some(PriceOrigin::Combination));
        assert_eq!(line.combo_arity, Some(ComboArity::Two));
    }

    #[test]
    fn test_line_ids_are_unique() {
        let a = SelectedLineItem::from_catalog(&catalog_item(), Route::Oral, resolved(1));
        let b = SelectedLineItem::from_catalog(&catalog_item(), Route::Oral, resolved(1));
        assert_ne!(a.line_id, b.line_id);
    }

    #[test]
    fn test_option_marking() {
        let parent = SelectedLineItem::from_catalog(&catalog_item(), Route::Oral, resolved(1));
        let option = SelectedLineItem::from_catalog(&catalog_item(), Route::Oral, resolved(1))
            .into_option_of(&parent.line_id);
        assert!(option.is_option);
        assert!(option.belongs_to(&parent.line_id));
        assert!(!parent.belongs_to(&option.line_id));
    }
}
