//! # Pricing Configuration Loader
//!
//! Builds a [`PricingConfig`] from defaults, a TOML file and the environment.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TOXQUOTE_VALIDATION_UNIT_CHARGE=12000000                           │
//! │     TOXQUOTE_ANALYSIS_CYCLE_CHARGE=1200000                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     explicit path, or                                                  │
//! │     ~/.config/toxquote/pricing.toml (Linux)                            │
//! │     ~/Library/Application Support/com.toxquote.toxquote/pricing.toml   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     10,000,000원 per system type, 1,000,000원 per analysis cycle       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tracing::{debug, info, warn};

use toxquote_core::{Money, PricingConfig};

use crate::error::{CatalogError, CatalogResult};

/// Overrides the validation unit charge (whole won).
pub const ENV_VALIDATION_UNIT_CHARGE: &str = "TOXQUOTE_VALIDATION_UNIT_CHARGE";

/// Overrides the per-cycle analysis charge (whole won).
pub const ENV_ANALYSIS_CYCLE_CHARGE: &str = "TOXQUOTE_ANALYSIS_CYCLE_CHARGE";

const CONFIG_FILE_NAME: &str = "pricing.toml";

/// Loads and saves [`PricingConfig`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pricing.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<PricingConfig> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// [`ConfigLoader::load`] with an injectable environment lookup.
    pub fn load_with_env<F>(config_path: Option<PathBuf>, env: F) -> CatalogResult<PricingConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = PricingConfig::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading pricing config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| CatalogError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        Self::apply_env_overrides(&mut config, env);

        config
            .validate()
            .map_err(|e| CatalogError::InvalidConfig(e.to_string()))?;

        Ok(config)
    }

    /// Loads config or returns the defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> PricingConfig {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load pricing config: {}. Using defaults.", e);
            PricingConfig::default()
        })
    }

    /// Saves configuration to file, returning the path written.
    pub fn save(config: &PricingConfig, config_path: Option<PathBuf>) -> CatalogResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CatalogError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CatalogError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(config)?;
        std::fs::write(&path, contents).map_err(|e| CatalogError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Pricing config saved");
        Ok(path)
    }

    /// Returns the platform config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "toxquote", "toxquote")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn apply_env_overrides<F>(config: &mut PricingConfig, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(charge) = env_amount(&env, ENV_VALIDATION_UNIT_CHARGE) {
            debug!(charge = charge.won(), "Overriding validation unit charge from environment");
            config.surcharge.validation_unit_charge = charge;
        }

        if let Some(charge) = env_amount(&env, ENV_ANALYSIS_CYCLE_CHARGE) {
            debug!(charge = charge.won(), "Overriding analysis cycle charge from environment");
            config.surcharge.analysis_cycle_charge = charge;
        }
    }
}

fn env_amount<F>(env: &F, key: &str) -> Option<Money>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = env(key)?;
    match raw.trim().replace(',', "").parse::<i64>() {
        Ok(won) => Some(Money::from_won(won)),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring non-numeric amount in environment");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use toxquote_core::{FormulationCharges, Mode};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_with_env(Some(dir.path().join("none.toml")), no_env).unwrap();
        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn test_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
            [surcharge]
            validation_unit_charge = 12000000

            [[formulation.charges]]
            mode = "auto_cosmetic"
            charge = 2500000

            [display]
            abbreviated = " 만 KRW"
            "#,
        );

        let config = ConfigLoader::load_with_env(Some(path), no_env).unwrap();
        assert_eq!(config.surcharge.validation_unit_charge.won(), 12_000_000);
        // Omitted keys keep their defaults.
        assert_eq!(config.surcharge.analysis_cycle_charge.won(), 1_000_000);
        assert_eq!(config.formulation.get(Mode::AutoCosmetic), Some(Money::from_won(2_500_000)));
        assert_eq!(config.display.full, "원");
        assert_eq!(config.display.abbreviated, " 만 KRW");
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[surcharge]\nanalysis_cycle_charge = 900000\n");
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_ANALYSIS_CYCLE_CHARGE, "1,500,000"),
            (ENV_VALIDATION_UNIT_CHARGE, "lots"),
        ]);

        let config = ConfigLoader::load_with_env(Some(path), |key| env.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.surcharge.analysis_cycle_charge.won(), 1_500_000);
        // Non-numeric override is ignored.
        assert_eq!(config.surcharge.validation_unit_charge.won(), 10_000_000);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[surcharge]\nvalidation_unit_charge = -1\n");
        let err = ConfigLoader::load_with_env(Some(path), no_env).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[surcharge\n");
        let err = ConfigLoader::load_with_env(Some(path), no_env).unwrap_err();
        assert!(matches!(err, CatalogError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = PricingConfig::default();
        config.formulation = FormulationCharges::new().with(Mode::AutoCombination, Money::from_won(4_000_000));

        let written = ConfigLoader::save(&config, Some(path.clone())).unwrap();
        assert_eq!(written, path);

        let loaded = ConfigLoader::load_with_env(Some(path), no_env).unwrap();
        assert_eq!(loaded, config);
    }
}
