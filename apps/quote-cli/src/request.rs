//! Quotation request file.
//!
//! ```json
//! {
//!   "standard": "global",
//!   "route": "oral",
//!   "mode": "auto_single",
//!   "discount_percent": 7.5,
//!   "items": [
//!     { "id": "RD-13W", "key": "main" },
//!     { "id": "TK", "option_of": "main", "route": "intravenous" },
//!     { "id": "HF-SD", "arity": 3, "custom_price": 8500000 },
//!     { "id": "AMES", "custom_name": "Ames (OECD 471)" }
//!   ]
//! }
//! ```
//!
//! `option_of` names an earlier line by its `key`, or by item id when the
//! earlier line has no key.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use tracing::debug;

use toxquote_core::{
    Catalog, ComboArity, DiscountRate, ItemId, Mode, Money, Quotation, Route, Standard,
};

#[derive(Debug, Clone, Deserialize)]
pub struct QuotationRequest {
    #[serde(default = "default_standard")]
    pub standard: String,

    #[serde(default = "default_route")]
    pub route: String,

    #[serde(default = "default_mode")]
    pub mode: String,

    #[serde(default)]
    pub discount_percent: f64,

    /// Surcharge entered by hand; used in manual mode only.
    #[serde(default)]
    pub manual_surcharge: Option<i64>,

    #[serde(default)]
    pub items: Vec<RequestItem>,
}

fn default_standard() -> String {
    Standard::Baseline.to_string()
}

fn default_route() -> String {
    Route::Oral.to_string()
}

fn default_mode() -> String {
    Mode::AutoSingle.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestItem {
    pub id: String,
    #[serde(default)]
    pub key: Option<String>,
    /// Per-line route; defaults to the request route.
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub arity: Option<u8>,
    #[serde(default)]
    pub custom_name: Option<String>,
    #[serde(default)]
    pub custom_price: Option<i64>,
    #[serde(default)]
    pub option_of: Option<String>,
}

impl QuotationRequest {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request {}", path.display()))?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Malformed quotation request")
    }

    /// Discount converted to basis points, rounded to the nearest bp.
    pub fn discount_rate(&self) -> DiscountRate {
        DiscountRate::from_bps((self.discount_percent * 100.0).round() as i64)
    }

    /// Builds a quotation against `catalog`.
    pub fn build(&self, catalog: &Catalog) -> Result<Quotation> {
        let standard: Standard = self.standard.parse()?;
        let route: Route = self.route.parse()?;
        let mode = Mode::from_label(&self.mode);

        let mut quotation = Quotation::new(standard, route, mode);
        quotation.set_discount_rate(self.discount_rate())?;
        quotation.set_manual_surcharge(self.manual_surcharge.map(Money::from_won))?;

        // key (or item id) → line id
        let mut lines: HashMap<String, String> = HashMap::new();

        for (index, entry) in self.items.iter().enumerate() {
            let line_id = add_entry(&mut quotation, catalog, entry, &lines)
                .with_context(|| format!("Request item #{} ({})", index + 1, entry.id))?;

            if let Some(name) = &entry.custom_name {
                quotation.set_custom_name(&line_id, name)?;
            }
            if let Some(price) = entry.custom_price {
                quotation.set_custom_price(&line_id, Money::from_won(price))?;
            }

            let handle = entry.key.clone().unwrap_or_else(|| entry.id.clone());
            lines.entry(handle).or_insert(line_id);
        }

        debug!(lines = quotation.line_count(), "Quotation built from request");
        Ok(quotation)
    }
}

fn add_entry(
    quotation: &mut Quotation,
    catalog: &Catalog,
    entry: &RequestItem,
    lines: &HashMap<String, String>,
) -> Result<String> {
    let id = ItemId::new(entry.id.as_str());
    let route = match &entry.route {
        Some(label) => label.parse::<Route>()?,
        None => quotation.route,
    };

    if let Some(parent) = &entry.option_of {
        let parent_line = lines
            .get(parent)
            .ok_or_else(|| anyhow!("option_of '{}' does not name an earlier line", parent))?;
        let item = catalog
            .item(&id)
            .ok_or_else(|| anyhow!("Option must be a regular catalog item"))?;

        let line = quotation.add_option(parent_line, item, route, &catalog.tier1, &catalog.tier2)?;
        return Ok(line.line_id.clone());
    }

    if let Some(item) = catalog.item(&id) {
        let line = quotation.add_item(item, route, &catalog.tier1, &catalog.tier2)?;
        return Ok(line.line_id.clone());
    }

    let arity = match entry.arity {
        Some(n) => Some(ComboArity::try_from(n)?),
        None => None,
    };
    if catalog.combo(&id).is_some() && arity.is_none() {
        bail!("Combination item needs an arity (2, 3 or 4)");
    }

    let line = quotation.add_from_catalog(catalog, &id, arity)?;
    Ok(line.line_id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use toxquote_catalog::sample_catalog;

    #[test]
    fn test_defaults() {
        let request = QuotationRequest::from_json_str("{}").unwrap();
        assert_eq!(request.standard, "baseline");
        assert_eq!(request.route, "oral");
        assert_eq!(request.mode, "auto_single");
        assert_eq!(request.discount_rate(), DiscountRate::zero());
    }

    #[test]
    fn test_fractional_discount() {
        let request = QuotationRequest::from_json_str(r#"{ "discount_percent": 7.5 }"#).unwrap();
        assert_eq!(request.discount_rate(), DiscountRate::from_bps(750));
    }

    #[test]
    fn test_build_with_option_and_overrides() {
        let catalog = sample_catalog().unwrap();
        let request = QuotationRequest::from_json_str(
            r#"{
                "standard": "global",
                "discount_percent": 10,
                "items": [
                    { "id": "RD-13W", "key": "main" },
                    { "id": "AMES", "custom_name": "Ames (OECD 471)" },
                    { "id": "TK", "option_of": "main", "route": "iv" },
                    { "id": "HF-SD", "arity": 3, "custom_price": 8500000 }
                ]
            }"#,
        )
        .unwrap();

        let quotation = request.build(&catalog).unwrap();
        let lines = quotation.lines();

        let ids: Vec<&str> = lines.iter().map(|l| l.item_id.as_str()).collect();
        assert_eq!(ids, vec!["RD-13W", "TK", "AMES", "HF-SD"]);
        assert!(lines[1].is_option);
        assert_eq!(lines[1].route, Some(Route::Intravenous));
        assert_eq!(lines[0].price(), Some(Money::from_won(72_000_000)));
        assert_eq!(lines[2].name(), "Ames (OECD 471)");
        assert_eq!(lines[3].price(), Some(Money::from_won(8_500_000)));
        assert_eq!(quotation.discount_rate(), DiscountRate::from_percent(10));
    }

    #[test]
    fn test_unknown_mode_is_manual() {
        let catalog = sample_catalog().unwrap();
        let request = QuotationRequest::from_json_str(r#"{ "mode": "mystery" }"#).unwrap();
        assert_eq!(request.build(&catalog).unwrap().mode, Mode::Manual);
    }

    #[test]
    fn test_build_errors() {
        let catalog = sample_catalog().unwrap();

        let unknown = QuotationRequest::from_json_str(r#"{ "items": [ { "id": "NOPE" } ] }"#).unwrap();
        assert!(unknown.build(&catalog).is_err());

        let no_arity = QuotationRequest::from_json_str(r#"{ "items": [ { "id": "HF-SD" } ] }"#).unwrap();
        assert!(no_arity.build(&catalog).is_err());

        let bad_parent =
            QuotationRequest::from_json_str(r#"{ "items": [ { "id": "TK", "option_of": "missing" } ] }"#).unwrap();
        assert!(bad_parent.build(&catalog).is_err());

        let bad_standard = QuotationRequest::from_json_str(r#"{ "standard": "mars" }"#).unwrap();
        assert!(bad_standard.build(&catalog).is_err());

        let too_much = QuotationRequest::from_json_str(r#"{ "discount_percent": 120 }"#).unwrap();
        assert!(too_much.build(&catalog).is_err());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, r#"{ "items": [ { "id": "AMES" } ] }"#).unwrap();

        let request = QuotationRequest::from_path(&path).unwrap();
        assert_eq!(request.items.len(), 1);
        assert!(QuotationRequest::from_path(&dir.path().join("missing.json")).is_err());
    }
}
