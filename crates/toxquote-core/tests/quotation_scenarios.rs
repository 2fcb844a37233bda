//! End-to-end quotation scenarios.

use toxquote_core::catalog::{Catalog, MetadataTable, OverlayTable};
use toxquote_core::config::{FormulationCharges, PricingConfig};
use toxquote_core::duration::parse_analysis_cycles;
use toxquote_core::format::{format_abbreviated, format_full};
use toxquote_core::pricing::{resolve_in_catalog, PriceOrigin};
use toxquote_core::totals::compute_total_from_subtotal;
use toxquote_core::{
    BiologicalSystem, CatalogItem, ComboArity, ComboCatalogItem, DiscountRate, ItemId,
    ItemMetadata, Mode, Money, NoFormulationCharge, Quotation, Route, RoutePrices, Standard,
};

fn won(amount: i64) -> Money {
    Money::from_won(amount)
}

fn study_catalog() -> Catalog {
    let items = vec![
        CatalogItem {
            id: ItemId::new("SD-ROD"),
            name: "Single dose toxicity (rodent)".to_string(),
            category: "single-dose".to_string(),
            duration: "단회".to_string(),
            prices: RoutePrices::new()
                .with(Route::Oral, won(500_000))
                .with(Route::Intravenous, won(800_000)),
        },
        CatalogItem {
            id: ItemId::new("RD-13W"),
            name: "13-week repeat dose toxicity".to_string(),
            category: "repeat-dose".to_string(),
            duration: "13주 (회복 4주)".to_string(),
            prices: RoutePrices::new().with(Route::Oral, won(60_000_000)),
        },
        CatalogItem {
            id: ItemId::new("RD-6M"),
            name: "6-month repeat dose toxicity".to_string(),
            category: "repeat-dose".to_string(),
            duration: "6개월".to_string(),
            prices: RoutePrices::new().with(Route::Oral, won(150_000_000)),
        },
        CatalogItem {
            id: ItemId::new("AMES"),
            name: "Bacterial reverse mutation".to_string(),
            category: "genotoxicity".to_string(),
            duration: "-".to_string(),
            prices: RoutePrices::new().with(Route::Oral, won(4_000_000)),
        },
        CatalogItem {
            id: ItemId::new("INH-4W"),
            name: "4-week inhalation toxicity".to_string(),
            category: "repeat-dose".to_string(),
            duration: "4주".to_string(),
            prices: RoutePrices::new(),
        },
    ];

    let combos = vec![ComboCatalogItem {
        id: ItemId::new("HF-SD"),
        name: "Health food single dose".to_string(),
        category: "combination".to_string(),
        duration: "단회".to_string(),
        price_2: Some(won(7_000_000)),
        price_3: Some(won(9_000_000)),
        price_4: None,
    }];

    let tier1 = OverlayTable::new().with("RD-13W", Route::Oral, won(72_000_000));
    let tier2 = OverlayTable::new()
        .with("RD-13W", Route::Oral, won(70_000_000))
        .with("AMES", Route::Oral, won(5_000_000));

    let metadata = MetadataTable::new()
        .with("RD-13W", ItemMetadata { system: BiologicalSystem::InVivo, analysis_required: true })
        .with("RD-6M", ItemMetadata { system: BiologicalSystem::InVivo, analysis_required: true })
        .with("SD-ROD", ItemMetadata { system: BiologicalSystem::InVivo, analysis_required: false })
        .with("AMES", ItemMetadata { system: BiologicalSystem::InVitro, analysis_required: false });

    Catalog::from_parts(items, combos, tier1, tier2, metadata).unwrap()
}

#[test]
fn route_selects_base_price() {
    let catalog = study_catalog();
    let id = ItemId::new("SD-ROD");

    let oral = resolve_in_catalog(&catalog, &id, Route::Oral, Standard::Baseline).unwrap();
    let iv = resolve_in_catalog(&catalog, &id, Route::Intravenous, Standard::Baseline).unwrap();

    assert_eq!(oral.price, won(500_000));
    assert_eq!(iv.price, won(800_000));
    assert_eq!(oral.origin, PriceOrigin::Base);
    assert!(resolve_in_catalog(&catalog, &id, Route::Dermal, Standard::Baseline).is_none());
}

#[test]
fn overlay_precedence_under_global_standard() {
    let catalog = study_catalog();

    let rd = resolve_in_catalog(&catalog, &ItemId::new("RD-13W"), Route::Oral, Standard::Global).unwrap();
    assert_eq!(rd.price, won(72_000_000));
    assert_eq!(rd.origin, PriceOrigin::Tier1Overlay);

    let ames = resolve_in_catalog(&catalog, &ItemId::new("AMES"), Route::Oral, Standard::Global).unwrap();
    assert_eq!(ames.price, won(5_000_000));
    assert_eq!(ames.origin, PriceOrigin::Tier2Overlay);

    let sd = resolve_in_catalog(&catalog, &ItemId::new("SD-ROD"), Route::Oral, Standard::Global).unwrap();
    assert_eq!(sd.origin, PriceOrigin::Base);
}

#[test]
fn thirteen_weeks_is_four_cycles() {
    assert_eq!(parse_analysis_cycles("13주"), 4);
}

#[test]
fn ten_percent_discount_scenario() {
    let totals = compute_total_from_subtotal(won(10_000_000), won(2_000_000), DiscountRate::from_percent(10));
    assert_eq!(totals.discount_amount, won(1_200_000));
    assert_eq!(totals.total, won(10_800_000));
    assert_eq!(format_full(totals.total), "10,800,000원");
}

#[test]
fn abbreviated_format_scenario() {
    assert_eq!(format_abbreviated(won(1_230_000)), "123만원");
}

#[test]
fn full_quotation_auto_single() {
    let catalog = study_catalog();
    let mut quotation = Quotation::new(Standard::Baseline, Route::Oral, Mode::AutoSingle);

    let rd = quotation
        .add_from_catalog(&catalog, &ItemId::new("RD-13W"), None)
        .unwrap()
        .line_id
        .clone();
    quotation.add_from_catalog(&catalog, &ItemId::new("RD-6M"), None).unwrap();
    quotation.add_from_catalog(&catalog, &ItemId::new("AMES"), None).unwrap();

    let sd = catalog.item(&ItemId::new("SD-ROD")).unwrap().clone();
    quotation
        .add_option(&rd, &sd, Route::Intravenous, &catalog.tier1, &catalog.tier2)
        .unwrap();

    // Price on request: no route prices at all.
    quotation.add_from_catalog(&catalog, &ItemId::new("INH-4W"), None).unwrap();
    quotation.set_discount_rate(DiscountRate::from_bps(500)).unwrap();

    let summary = quotation.summary(&catalog, &PricingConfig::default(), &NoFormulationCharge);

    // 60,000,000 + 800,000 (option) + 150,000,000 + 4,000,000 + 0
    assert_eq!(summary.totals.subtotal, won(214_800_000));
    // in vivo + in vitro
    assert_eq!(summary.surcharge.validation_base, won(20_000_000));
    // 13주 → 4, 6개월 → 6
    assert_eq!(summary.surcharge.analysis_total, won(10_000_000));
    assert_eq!(summary.totals.surcharge, won(30_000_000));
    // 5% of 244,800,000
    assert_eq!(summary.totals.discount_amount, won(12_240_000));
    assert_eq!(summary.totals.total, won(232_560_000));
    assert_eq!(summary.price_on_request_lines, 1);
    assert_eq!(summary.total_full, "232,560,000원");
    assert_eq!(summary.total_abbreviated, "23,256만원");
}

#[test]
fn combination_quotation_with_formulation_charge() {
    let catalog = study_catalog();
    let mut config = PricingConfig::default();
    config.formulation = FormulationCharges::new().with(Mode::AutoHealthFood, won(3_000_000));

    let mut quotation = Quotation::new(Standard::Baseline, Route::Oral, Mode::from_label("auto_health_food"));
    quotation
        .add_from_catalog(&catalog, &ItemId::new("HF-SD"), Some(ComboArity::Three))
        .unwrap();
    let four = quotation
        .add_from_catalog(&catalog, &ItemId::new("HF-SD"), Some(ComboArity::Four))
        .unwrap()
        .line_id
        .clone();

    let summary = quotation.summary(&catalog, &config, &config.formulation);
    assert_eq!(summary.totals.subtotal, won(9_000_000));
    assert_eq!(summary.surcharge.alternate_formulation_charge, won(3_000_000));
    assert_eq!(summary.totals.total, won(12_000_000));

    quotation.set_custom_price(&four, won(11_000_000)).unwrap();
    let summary = quotation.summary(&catalog, &config, &config.formulation);
    assert_eq!(summary.totals.total, won(23_000_000));
    assert_eq!(summary.price_on_request_lines, 0);
}

#[test]
fn unknown_mode_label_never_charges_surcharge() {
    let catalog = study_catalog();
    let mut quotation = Quotation::new(Standard::Baseline, Route::Oral, Mode::from_label("legacy-mode"));
    quotation.add_from_catalog(&catalog, &ItemId::new("RD-13W"), None).unwrap();

    let summary = quotation.summary(&catalog, &PricingConfig::default(), &NoFormulationCharge);
    assert_eq!(quotation.mode, Mode::Manual);
    assert_eq!(summary.totals.surcharge, Money::zero());
    assert_eq!(summary.totals.total, won(60_000_000));
}
