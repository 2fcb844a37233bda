//! # Quotation
//!
//! The editable aggregate a quotation screen works on: ordered line items
//! plus the selectors (standard, route, mode, discount) that price them.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quotation Operations                                 │
//! │                                                                         │
//! │  User Action             Method                  Line Change            │
//! │  ───────────             ──────                  ───────────            │
//! │  Pick test ─────────────► add_item() ──────────► push (price resolved) │
//! │  Pick combination ──────► add_combo_item() ────► push (arity price)    │
//! │  Attach option ─────────► add_option() ────────► insert after parent   │
//! │  Rename / reprice ──────► set_custom_*() ──────► override fields       │
//! │  Drag row ──────────────► move_line() ─────────► block reordered       │
//! │  Delete row ────────────► remove_line() ───────► line + its options    │
//! │                                                                         │
//! │  summary() ──► compute_surcharge() ──► compute_total() ──► formatted    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - An option line always sits after its parent, inside the parent's block
//! - Options never own options
//! - At most `MAX_QUOTATION_LINES` lines

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::catalog::{Catalog, OverlayTable};
use crate::config::PricingConfig;
use crate::error::{CoreError, CoreResult};
use crate::format::{format_abbreviated_with, format_full_with};
use crate::line_item::SelectedLineItem;
use crate::money::Money;
use crate::pricing::{resolve_combo_price, resolve_price_detailed};
use crate::surcharge::{compute_surcharge, FormulationRule, SurchargeBreakdown};
use crate::totals::{compute_total, Totals};
use crate::types::{CatalogItem, ComboArity, ComboCatalogItem, DiscountRate, ItemId, Mode, Route, Standard};
use crate::MAX_QUOTATION_LINES;
use crate::validation::{
    validate_custom_price, validate_discount_rate, validate_line_name, validate_quotation_size,
};

// =============================================================================
// Quotation
// =============================================================================

/// A quotation under construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub id: String,
    pub standard: Standard,
    /// Default route for lines added without an explicit one.
    pub route: Route,
    pub mode: Mode,
    discount_rate: DiscountRate,
    /// Surcharge typed in by hand; only used in `Mode::Manual`.
    manual_surcharge: Option<Money>,
    lines: Vec<SelectedLineItem>,
    pub created_at: DateTime<Utc>,
}

impl Quotation {
    /// Creates an empty quotation.
    pub fn new(standard: Standard, route: Route, mode: Mode) -> Self {
        Quotation {
            id: Uuid::new_v4().to_string(),
            standard,
            route,
            mode,
            discount_rate: DiscountRate::zero(),
            manual_surcharge: None,
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn lines(&self) -> &[SelectedLineItem] {
        &self.lines
    }

    pub fn line(&self, line_id: &str) -> Option<&SelectedLineItem> {
        self.lines.iter().find(|l| l.line_id == line_id)
    }

    pub fn discount_rate(&self) -> DiscountRate {
        self.discount_rate
    }

    pub fn manual_surcharge(&self) -> Option<Money> {
        self.manual_surcharge
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Sets the discount rate after checking it lies within 0..=100 %.
    pub fn set_discount_rate(&mut self, rate: DiscountRate) -> CoreResult<()> {
        validate_discount_rate(rate)?;
        self.discount_rate = rate;
        Ok(())
    }

    /// Sets (or clears) the hand-entered surcharge used in manual mode.
    pub fn set_manual_surcharge(&mut self, amount: Option<Money>) -> CoreResult<()> {
        if let Some(amount) = amount {
            validate_custom_price(amount)?;
        }
        self.manual_surcharge = amount;
        Ok(())
    }

    // =========================================================================
    // Adding Lines
    // =========================================================================

    /// Adds a regular catalog item, resolving its price for `route` under the
    /// quotation's standard.
    pub fn add_item(
        &mut self,
        item: &CatalogItem,
        route: Route,
        tier1: &OverlayTable,
        tier2: &OverlayTable,
    ) -> CoreResult<&SelectedLineItem> {
        self.ensure_room()?;

        let resolved = resolve_price_detailed(item, route, self.standard, tier1, tier2);
        self.lines.push(SelectedLineItem::from_catalog(item, route, resolved));
        debug!(item = %item.id, %route, "Added line");

        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Adds a combination item priced for `arity`.
    pub fn add_combo_item(
        &mut self,
        combo: &ComboCatalogItem,
        arity: ComboArity,
    ) -> CoreResult<&SelectedLineItem> {
        self.ensure_room()?;

        let price = resolve_combo_price(combo, arity);
        self.lines.push(SelectedLineItem::from_combo(combo, arity, price));
        debug!(item = %combo.id, %arity, "Added combination line");

        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Adds a catalog entry by id using the quotation's default route and the
    /// catalog's overlay tables. Combination items need an arity.
    pub fn add_from_catalog(
        &mut self,
        catalog: &Catalog,
        id: &ItemId,
        arity: Option<ComboArity>,
    ) -> CoreResult<&SelectedLineItem> {
        if let Some(item) = catalog.item(id) {
            let route = self.route;
            return self.add_item(item, route, &catalog.tier1, &catalog.tier2);
        }

        match (catalog.combo(id), arity) {
            (Some(combo), Some(arity)) => self.add_combo_item(combo, arity),
            // Combination item requested without an arity: default to 2종.
            (Some(combo), None) => self.add_combo_item(combo, ComboArity::Two),
            (None, _) => Err(CoreError::ItemNotFound(id.to_string())),
        }
    }

    /// Adds `item` as a dependent option of `parent_line_id`.
    ///
    /// The option is placed after the parent's existing options.
    pub fn add_option(
        &mut self,
        parent_line_id: &str,
        item: &CatalogItem,
        route: Route,
        tier1: &OverlayTable,
        tier2: &OverlayTable,
    ) -> CoreResult<&SelectedLineItem> {
        self.ensure_room()?;

        let parent_index = self.index_of(parent_line_id)?;
        if self.lines[parent_index].is_option {
            return Err(CoreError::NestedOption(parent_line_id.to_string()));
        }

        let resolved = resolve_price_detailed(item, route, self.standard, tier1, tier2);
        let option = SelectedLineItem::from_catalog(item, route, resolved).into_option_of(parent_line_id);

        let insert_at = parent_index + 1 + self.option_count(parent_line_id);
        self.lines.insert(insert_at, option);
        debug!(item = %item.id, parent = parent_line_id, "Added option line");

        Ok(&self.lines[insert_at])
    }

    // =========================================================================
    // Editing Lines
    // =========================================================================

    /// Overrides the display name of a line.
    pub fn set_custom_name(&mut self, line_id: &str, name: &str) -> CoreResult<()> {
        let name = validate_line_name(name)?;
        self.line_mut(line_id)?.custom_name = Some(name);
        Ok(())
    }

    /// Overrides the unit price of a line.
    pub fn set_custom_price(&mut self, line_id: &str, price: Money) -> CoreResult<()> {
        validate_custom_price(price)?;
        self.line_mut(line_id)?.custom_price = Some(price);
        Ok(())
    }

    /// Drops both overrides, restoring the catalog-derived name and price.
    pub fn clear_overrides(&mut self, line_id: &str) -> CoreResult<()> {
        let line = self.line_mut(line_id)?;
        line.custom_name = None;
        line.custom_price = None;
        Ok(())
    }

    /// Removes a line together with its options. Returns how many lines
    /// were removed.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<usize> {
        self.index_of(line_id)?;

        let before = self.lines.len();
        self.lines
            .retain(|l| l.line_id != line_id && !l.belongs_to(line_id));
        let removed = before - self.lines.len();

        debug!(line_id, removed, "Removed line");
        Ok(removed)
    }

    /// Moves a line to `new_index`.
    ///
    /// A top-level line moves with all its options and `new_index` counts
    /// top-level blocks. An option moves among its siblings and `new_index`
    /// counts the parent's options. Indices past the end move to the end.
    pub fn move_line(&mut self, line_id: &str, new_index: usize) -> CoreResult<()> {
        let index = self.index_of(line_id)?;

        match self.lines[index].parent_line_id.clone() {
            Some(parent_id) => self.move_option(&parent_id, line_id, new_index),
            None => self.move_block(line_id, new_index),
        }

        Ok(())
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Computes surcharge, totals and display strings for the current lines.
    pub fn summary(
        &self,
        catalog: &Catalog,
        config: &PricingConfig,
        rule: &dyn FormulationRule,
    ) -> QuotationSummary {
        let surcharge = compute_surcharge(
            &self.lines,
            self.mode,
            catalog,
            &catalog.metadata,
            &config.surcharge,
            rule,
        );

        let surcharge_total = match self.mode {
            Mode::Manual => self.manual_surcharge.unwrap_or_default(),
            _ => surcharge.total(),
        };

        let totals = compute_total(&self.lines, surcharge_total, self.discount_rate);
        let price_on_request = self.lines.iter().filter(|l| l.is_price_on_request()).count();

        info!(
            quotation = %self.id,
            lines = self.lines.len(),
            mode = %self.mode,
            total = totals.total.won(),
            price_on_request,
            "Quotation priced"
        );

        QuotationSummary {
            quotation_id: self.id.clone(),
            standard: self.standard,
            mode: self.mode,
            lines: self.lines.clone(),
            surcharge,
            totals,
            price_on_request_lines: price_on_request,
            total_full: format_full_with(totals.total, &config.display.full),
            total_abbreviated: format_abbreviated_with(totals.total, &config.display.abbreviated),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ensure_room(&self) -> CoreResult<()> {
        validate_quotation_size(self.lines.len()).map_err(|_| CoreError::QuotationTooLarge {
            max: MAX_QUOTATION_LINES,
        })
    }

    fn index_of(&self, line_id: &str) -> CoreResult<usize> {
        self.lines
            .iter()
            .position(|l| l.line_id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))
    }

    fn line_mut(&mut self, line_id: &str) -> CoreResult<&mut SelectedLineItem> {
        self.lines
            .iter_mut()
            .find(|l| l.line_id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))
    }

    fn option_count(&self, parent_line_id: &str) -> usize {
        self.lines.iter().filter(|l| l.belongs_to(parent_line_id)).count()
    }

    /// Splits the lines into blocks of `[parent, options...]`.
    fn take_blocks(&mut self) -> Vec<Vec<SelectedLineItem>> {
        let mut blocks: Vec<Vec<SelectedLineItem>> = Vec::new();
        for line in self.lines.drain(..) {
            let joins_last = match (&line.parent_line_id, blocks.last()) {
                (Some(parent), Some(block)) => block[0].line_id == *parent,
                _ => false,
            };
            if joins_last {
                if let Some(block) = blocks.last_mut() {
                    block.push(line);
                    continue;
                }
            }
            blocks.push(vec![line]);
        }
        blocks
    }

    fn move_block(&mut self, line_id: &str, new_index: usize) {
        let mut blocks = self.take_blocks();
        if let Some(from) = blocks.iter().position(|b| b[0].line_id == line_id) {
            let block = blocks.remove(from);
            let to = new_index.min(blocks.len());
            blocks.insert(to, block);
        }
        self.lines = blocks.into_iter().flatten().collect();
    }

    fn move_option(&mut self, parent_id: &str, line_id: &str, new_index: usize) {
        let mut blocks = self.take_blocks();
        if let Some(block) = blocks.iter_mut().find(|b| b[0].line_id == parent_id) {
            if let Some(from) = block.iter().position(|l| l.line_id == line_id) {
                let option = block.remove(from);
                let to = new_index.saturating_add(1).min(block.len());
                block.insert(to, option);
            }
        }
        self.lines = blocks.into_iter().flatten().collect();
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Everything a quotation document needs from the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuotationSummary {
    pub quotation_id: String,
    pub standard: Standard,
    pub mode: Mode,
    pub lines: Vec<SelectedLineItem>,
    pub surcharge: SurchargeBreakdown,
    pub totals: Totals,
    /// Lines billed at zero because no price is configured.
    pub price_on_request_lines: usize,
    pub total_full: String,
    pub total_abbreviated: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
