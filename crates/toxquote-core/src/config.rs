//! # Pricing Configuration
//!
//! Tunable amounts the engine reads but never hard-codes.
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! [surcharge]
//! validation_unit_charge = 10000000   # per biological-system type present
//! analysis_cycle_charge = 1000000     # per analysis cycle
//!
//! [[formulation.charges]]
//! mode = "auto_combination"
//! charge = 5000000
//!
//! [display]
//! full = "원"
//! abbreviated = "만원"
//! ```
//!
//! Only the types live here; reading the file and applying environment
//! overrides belongs to the catalog crate.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::format::DisplayUnits;
use crate::money::Money;
use crate::surcharge::FormulationRule;
use crate::types::Mode;

/// Default charge per biological-system type present in a selection.
pub const DEFAULT_VALIDATION_UNIT_CHARGE: Money = Money::from_won(10_000_000);

/// Default charge per analysis cycle.
pub const DEFAULT_ANALYSIS_CYCLE_CHARGE: Money = Money::from_won(1_000_000);

// =============================================================================
// Surcharge Rates
// =============================================================================

/// Unit charges of the automatic single-item surcharge branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeRates {
    /// Added once per biological-system type present.
    #[serde(default = "default_validation_unit_charge")]
    pub validation_unit_charge: Money,

    /// Multiplied by the analysis cycles of each analysis-required item.
    #[serde(default = "default_analysis_cycle_charge")]
    pub analysis_cycle_charge: Money,
}

fn default_validation_unit_charge() -> Money {
    DEFAULT_VALIDATION_UNIT_CHARGE
}

fn default_analysis_cycle_charge() -> Money {
    DEFAULT_ANALYSIS_CYCLE_CHARGE
}

impl Default for SurchargeRates {
    fn default() -> Self {
        SurchargeRates {
            validation_unit_charge: default_validation_unit_charge(),
            analysis_cycle_charge: default_analysis_cycle_charge(),
        }
    }
}

// =============================================================================
// Formulation Charges
// =============================================================================

/// Fixed formulation charge of one alternate-catalog mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulationCharge {
    pub mode: Mode,
    pub charge: Money,
}

/// Catalog-supplied formulation charge table, keyed by mode only.
///
/// Modes without an entry are charged zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulationCharges {
    #[serde(default)]
    pub charges: Vec<FormulationCharge>,
}

impl FormulationCharges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; replaces an existing entry for `mode`.
    pub fn with(mut self, mode: Mode, charge: Money) -> Self {
        self.charges.retain(|entry| entry.mode != mode);
        self.charges.push(FormulationCharge { mode, charge });
        self
    }

    pub fn get(&self, mode: Mode) -> Option<Money> {
        self.charges
            .iter()
            .find(|entry| entry.mode == mode)
            .map(|entry| entry.charge)
    }
}

impl FormulationRule for FormulationCharges {
    fn charge(&self, mode: Mode) -> Money {
        self.get(mode).unwrap_or_default()
    }
}

// =============================================================================
// Pricing Config
// =============================================================================

/// Complete pricing configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub surcharge: SurchargeRates,

    #[serde(default)]
    pub formulation: FormulationCharges,

    #[serde(default)]
    pub display: DisplayUnits,
}

impl PricingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration.
    ///
    /// ## Rules
    /// - Unit charges are non-negative
    /// - Formulation entries name alternate-catalog modes only, once each,
    ///   with non-negative charges
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_negative("validation_unit_charge", self.surcharge.validation_unit_charge)?;
        non_negative("analysis_cycle_charge", self.surcharge.analysis_cycle_charge)?;

        let mut seen: Vec<Mode> = Vec::new();
        for entry in &self.formulation.charges {
            if !entry.mode.is_alternate() {
                return Err(ValidationError::InvalidFormat {
                    field: "formulation.charges.mode".to_string(),
                    reason: format!("'{}' is not an alternate-catalog mode", entry.mode),
                });
            }
            if seen.contains(&entry.mode) {
                return Err(ValidationError::Duplicate {
                    field: "formulation.charges.mode".to_string(),
                    value: entry.mode.to_string(),
                });
            }
            seen.push(entry.mode);
            non_negative("formulation.charges.charge", entry.charge)?;
        }

        Ok(())
    }
}

fn non_negative(field: &str, amount: Money) -> Result<(), ValidationError> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}
