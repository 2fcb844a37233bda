//! # Formulation/Validation Surcharge
//!
//! Computes the add-on charge layered over the per-item prices.
//!
//! ## Branches
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Mode::AutoSingle                                                      │
//! │    validation_base = X · [any in-vivo item] + X · [any in-vitro item]  │
//! │    analysis_total  = Σ cycles(duration) · Y   over analysis-required   │
//! │    alternate       = 0                                                  │
//! │                                                                         │
//! │  Mode::AutoCombination | AutoHealthFood | AutoCosmetic                 │
//! │    validation_base = 0, analysis_total = 0                              │
//! │    alternate       = FormulationRule::charge(mode)                      │
//! │                                                                         │
//! │  Mode::Manual                                                          │
//! │    all zero (surcharge is entered by hand outside the engine)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! X is the validation unit charge and Y the per-cycle analysis charge from
//! [`SurchargeRates`]. The computation is a pure sum over the selection, so
//! the order of the lines does not matter.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::catalog::{Catalog, MetadataTable};
use crate::config::SurchargeRates;
use crate::duration::parse_analysis_cycles;
use crate::line_item::SelectedLineItem;
use crate::money::Money;
use crate::types::{BiologicalSystem, Mode};

// =============================================================================
// Formulation Rule
// =============================================================================

/// Source of the alternate-catalog formulation charge.
///
/// The tiering is catalog configuration, so it is injected rather than
/// encoded here. [`crate::config::FormulationCharges`] is the table-backed
/// implementation; any `Fn(Mode) -> Money` also works.
pub trait FormulationRule {
    fn charge(&self, mode: Mode) -> Money;
}

impl<F> FormulationRule for F
where
    F: Fn(Mode) -> Money,
{
    fn charge(&self, mode: Mode) -> Money {
        self(mode)
    }
}

/// Rule that charges nothing for every mode.
pub struct NoFormulationCharge;

impl FormulationRule for NoFormulationCharge {
    fn charge(&self, _mode: Mode) -> Money {
        Money::zero()
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Result of the surcharge computation. Every field is non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SurchargeBreakdown {
    pub validation_base: Money,
    pub analysis_total: Money,
    pub alternate_formulation_charge: Money,
}

impl SurchargeBreakdown {
    /// Sum of the three components.
    pub fn total(&self) -> Money {
        self.validation_base + self.analysis_total + self.alternate_formulation_charge
    }
}

// =============================================================================
// Computation
// =============================================================================

/// Computes the surcharge for a selection under `mode`.
///
/// Items without metadata contribute nothing. An analysis-required item whose
/// catalog entry is missing is billed one cycle.
pub fn compute_surcharge(
    selected: &[SelectedLineItem],
    mode: Mode,
    catalog: &Catalog,
    metadata: &MetadataTable,
    rates: &SurchargeRates,
    rule: &dyn FormulationRule,
) -> SurchargeBreakdown {
    let breakdown = match mode {
        Mode::AutoSingle => single_item_surcharge(selected, catalog, metadata, rates),
        Mode::AutoCombination | Mode::AutoHealthFood | Mode::AutoCosmetic => {
            SurchargeBreakdown {
                alternate_formulation_charge: non_negative("formulation charge", rule.charge(mode)),
                ..SurchargeBreakdown::default()
            }
        }
        Mode::Manual => SurchargeBreakdown::default(),
    };

    debug!(
        %mode,
        lines = selected.len(),
        validation_base = breakdown.validation_base.won(),
        analysis_total = breakdown.analysis_total.won(),
        alternate = breakdown.alternate_formulation_charge.won(),
        "Computed surcharge"
    );

    breakdown
}

fn single_item_surcharge(
    selected: &[SelectedLineItem],
    catalog: &Catalog,
    metadata: &MetadataTable,
    rates: &SurchargeRates,
) -> SurchargeBreakdown {
    let mut has_in_vivo = false;
    let mut has_in_vitro = false;
    let mut cycles: i64 = 0;

    for line in selected {
        let Some(meta) = metadata.get(&line.item_id) else {
            continue;
        };

        match meta.system {
            BiologicalSystem::InVivo => has_in_vivo = true,
            BiologicalSystem::InVitro => has_in_vitro = true,
        }

        if meta.analysis_required {
            let duration = catalog.duration_of(&line.item_id).unwrap_or_else(|| {
                warn!(item = %line.item_id, "Analysis-required item missing from catalog, billing one cycle");
                ""
            });
            cycles += i64::from(parse_analysis_cycles(duration));
        }
    }

    let system_types = i64::from(has_in_vivo) + i64::from(has_in_vitro);

    let unit = non_negative("validation unit charge", rates.validation_unit_charge);
    let per_cycle = non_negative("analysis cycle charge", rates.analysis_cycle_charge);

    SurchargeBreakdown {
        validation_base: unit.multiply_quantity(system_types),
        analysis_total: per_cycle.multiply_quantity(cycles),
        alternate_formulation_charge: Money::zero(),
    }
}

/// Negative charges are billed as zero.
fn non_negative(what: &str, amount: Money) -> Money {
    if amount.is_negative() {
        warn!(charge = amount.won(), "Negative {}, using zero", what);
        Money::zero()
    } else {
        amount
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OverlayTable;
    use crate::config::FormulationCharges;
    use crate::types::{CatalogItem, ItemId, ItemMetadata, Route, RoutePrices};

    fn catalog_item(id: &str, duration: &str) -> CatalogItem {
        CatalogItem {
            id: ItemId::new(id),
            name: id.to_string(),
            category: "general".to_string(),
            duration: duration.to_string(),
            prices: RoutePrices::new().with(Route::Oral, Money::from_won(1_000_000)),
        }
    }

    fn fixture() -> (Catalog, MetadataTable) {
        let catalog = Catalog::from_parts(
            vec![
                catalog_item("RD-13W", "13주"),
                catalog_item("RD-6M", "6개월"),
                catalog_item("AMES", "-"),
                catalog_item("CHROM", "-"),
                catalog_item("PLAIN", "4주"),
            ],
            vec![],
            OverlayTable::new(),
            OverlayTable::new(),
            MetadataTable::new(),
        )
        .unwrap();

        let metadata = MetadataTable::new()
            .with("RD-13W", ItemMetadata { system: BiologicalSystem::InVivo, analysis_required: true })
            .with("RD-6M", ItemMetadata { system: BiologicalSystem::InVivo, analysis_required: true })
            .with("AMES", ItemMetadata { system: BiologicalSystem::InVitro, analysis_required: false })
            .with("CHROM", ItemMetadata { system: BiologicalSystem::InVitro, analysis_required: false });

        (catalog, metadata)
    }

    fn lines(catalog: &Catalog, ids: &[&str]) -> Vec<SelectedLineItem> {
        ids.iter()
            .map(|id| {
                let item = catalog.item(&ItemId::new(*id)).unwrap();
                SelectedLineItem::from_catalog(item, Route::Oral, None)
            })
            .collect()
    }

    fn run(ids: &[&str], mode: Mode) -> SurchargeBreakdown {
        let (catalog, metadata) = fixture();
        let selected = lines(&catalog, ids);
        compute_surcharge(
            &selected,
            mode,
            &catalog,
            &metadata,
            &SurchargeRates::default(),
            &NoFormulationCharge,
        )
    }

    #[test]
    fn test_empty_selection_is_zero() {
        assert_eq!(run(&[], Mode::AutoSingle), SurchargeBreakdown::default());
    }

    #[test]
    fn test_validation_base_gated_by_presence_not_count() {
        // Two in-vitro items: still one unit charge.
        let breakdown = run(&["AMES", "CHROM"], Mode::AutoSingle);
        assert_eq!(breakdown.validation_base.won(), 10_000_000);
        assert_eq!(breakdown.analysis_total, Money::zero());
    }

    #[test]
    fn test_both_system_types_charge_twice() {
        let breakdown = run(&["RD-13W", "AMES"], Mode::AutoSingle);
        assert_eq!(breakdown.validation_base.won(), 20_000_000);
    }

    #[test]
    fn test_analysis_total_sums_cycles() {
        // 13주 → 4 cycles, 6개월 → 6 cycles
        let breakdown = run(&["RD-13W", "RD-6M"], Mode::AutoSingle);
        assert_eq!(breakdown.validation_base.won(), 10_000_000);
        assert_eq!(breakdown.analysis_total.won(), 10_000_000);
        assert_eq!(breakdown.total().won(), 20_000_000);
    }

    #[test]
    fn test_items_without_metadata_contribute_nothing() {
        assert_eq!(run(&["PLAIN"], Mode::AutoSingle), SurchargeBreakdown::default());
    }

    #[test]
    fn test_duplicate_analysis_lines_each_count() {
        let breakdown = run(&["RD-13W", "RD-13W"], Mode::AutoSingle);
        assert_eq!(breakdown.analysis_total.won(), 8_000_000);
        assert_eq!(breakdown.validation_base.won(), 10_000_000);
    }

    #[test]
    fn test_manual_mode_is_zero() {
        assert_eq!(run(&["RD-13W", "AMES"], Mode::Manual), SurchargeBreakdown::default());
    }

    #[test]
    fn test_alternate_mode_uses_rule_only() {
        let (catalog, metadata) = fixture();
        let selected = lines(&catalog, &["RD-13W", "AMES"]);
        let rule = FormulationCharges::new().with(Mode::AutoCombination, Money::from_won(5_000_000));

        let breakdown = compute_surcharge(
            &selected,
            Mode::AutoCombination,
            &catalog,
            &metadata,
            &SurchargeRates::default(),
            &rule,
        );
        assert_eq!(breakdown.validation_base, Money::zero());
        assert_eq!(breakdown.analysis_total, Money::zero());
        assert_eq!(breakdown.alternate_formulation_charge.won(), 5_000_000);

        // No table entry → zero.
        let breakdown = compute_surcharge(
            &selected,
            Mode::AutoHealthFood,
            &catalog,
            &metadata,
            &SurchargeRates::default(),
            &rule,
        );
        assert_eq!(breakdown, SurchargeBreakdown::default());
    }

    #[test]
    fn test_closure_rule_and_negative_guard() {
        let (catalog, metadata) = fixture();
        let rule = |mode: Mode| match mode {
            Mode::AutoCosmetic => Money::from_won(-1),
            _ => Money::from_won(3_000_000),
        };

        let cosmetic = compute_surcharge(&[], Mode::AutoCosmetic, &catalog, &metadata, &SurchargeRates::default(), &rule);
        assert_eq!(cosmetic.alternate_formulation_charge, Money::zero());

        let food = compute_surcharge(&[], Mode::AutoHealthFood, &catalog, &metadata, &SurchargeRates::default(), &rule);
        assert_eq!(food.alternate_formulation_charge.won(), 3_000_000);
    }

    #[test]
    fn test_negative_rates_bill_zero() {
        let (catalog, metadata) = fixture();
        let selected = lines(&catalog, &["RD-13W", "AMES"]);
        let rates = SurchargeRates {
            validation_unit_charge: Money::from_won(-10_000_000),
            analysis_cycle_charge: Money::from_won(-1),
        };

        let breakdown =
            compute_surcharge(&selected, Mode::AutoSingle, &catalog, &metadata, &rates, &NoFormulationCharge);
        assert_eq!(breakdown, SurchargeBreakdown::default());
    }

    #[test]
    fn test_huge_rates_saturate() {
        let (catalog, metadata) = fixture();
        let selected = lines(&catalog, &["RD-13W", "AMES"]);
        let rates = SurchargeRates {
            validation_unit_charge: Money::from_won(i64::MAX),
            analysis_cycle_charge: Money::from_won(i64::MAX),
        };

        let breakdown =
            compute_surcharge(&selected, Mode::AutoSingle, &catalog, &metadata, &rates, &NoFormulationCharge);
        assert_eq!(breakdown.validation_base.won(), i64::MAX);
        assert_eq!(breakdown.total().won(), i64::MAX);
    }

    #[test]
    fn test_missing_catalog_entry_bills_one_cycle() {
        let (catalog, _) = fixture();
        let metadata = MetadataTable::new()
            .with("GHOST", ItemMetadata { system: BiologicalSystem::InVivo, analysis_required: true });
        let mut line = lines(&catalog, &["PLAIN"]).remove(0);
        line.item_id = ItemId::new("GHOST");

        let breakdown = compute_surcharge(
            &[line],
            Mode::AutoSingle,
            &catalog,
            &metadata,
            &SurchargeRates::default(),
            &NoFormulationCharge,
        );
        assert_eq!(breakdown.analysis_total.won(), 1_000_000);
    }
}
