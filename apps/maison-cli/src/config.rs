//! # Application Configuration
//!
//! Store presentation, pricing parameters and paths.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority)                              │
//! │     --data-dir DIR  --catalog FILE                                     │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     MAISON_TAX_RATE=8.25  MAISON_DATA_DIR=/tmp/maison                  │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/maison/maison.toml (Linux)                               │
//! │     ~/Library/Application Support/com.maison.storefront/maison.toml    │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     free shipping at $100.00, $10.00 flat fee, 8% tax                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Maison"
//! currency_symbol = "$"
//! currency_decimals = 2
//!
//! [pricing]
//! free_shipping_threshold_cents = 10000
//! flat_shipping_fee_cents = 1000
//! tax_rate_bps = 800
//!
//! [paths]
//! data_dir = "/var/lib/maison"
//! catalog = "/etc/maison/catalog.json"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use maison_core::validation::cents_from_units;
use maison_core::{Money, PricingConfig, TaxRate};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine a data directory; set --data-dir or MAISON_DATA_DIR")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// How the store presents itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Number of decimal places for currency
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

fn default_store_name() -> String {
    "Maison".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for StoreSection {
    fn default() -> Self {
        StoreSection {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

/// Pricing parameters, in integer cents and basis points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSection {
    #[serde(default = "default_threshold")]
    pub free_shipping_threshold_cents: i64,

    #[serde(default = "default_fee")]
    pub flat_shipping_fee_cents: i64,

    /// e.g., 800 = 8%
    #[serde(default = "default_tax_bps")]
    pub tax_rate_bps: u32,
}

fn default_threshold() -> i64 {
    PricingConfig::default().free_shipping_threshold.cents()
}

fn default_fee() -> i64 {
    PricingConfig::default().flat_shipping_fee.cents()
}

fn default_tax_bps() -> u32 {
    PricingConfig::DEFAULT_TAX_RATE.bps()
}

impl Default for PricingSection {
    fn default() -> Self {
        PricingSection {
            free_shipping_threshold_cents: default_threshold(),
            flat_shipping_fee_cents: default_fee(),
            tax_rate_bps: default_tax_bps(),
        }
    }
}

/// Where state and the catalog live. Unset means platform default and the
/// built-in sample catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsSection {
    pub data_dir: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

// =============================================================================
// App Config
// =============================================================================

/// Effective application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub pricing: PricingSection,

    #[serde(default)]
    pub paths: PathsSection,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (maison.toml)
    /// 3. Environment variables
    ///
    /// Command line overrides and validation happen in the caller.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                config = Self::from_file(&path)?;
            } else if explicit {
                return Err(ConfigError::Invalid(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name cannot be empty".into()));
        }

        if self.store.currency_decimals > 4 {
            return Err(ConfigError::Invalid(
                "store.currency_decimals must be between 0 and 4".into(),
            ));
        }

        self.pricing()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an environment lookup.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("MAISON_STORE_NAME") {
            self.store.name = name;
        }

        // Percentage, e.g. "8.25"
        if let Some(rate) = lookup("MAISON_TAX_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(pct) if pct.is_finite() && pct >= 0.0 => {
                    debug!(rate = %rate, "Overriding tax rate from environment");
                    self.pricing.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(value = %rate, "Ignoring invalid MAISON_TAX_RATE"),
            }
        }

        // Currency units, e.g. "75" or "75.50"
        if let Some(threshold) = lookup("MAISON_FREE_SHIPPING_THRESHOLD") {
            match parse_units("MAISON_FREE_SHIPPING_THRESHOLD", &threshold) {
                Some(cents) => self.pricing.free_shipping_threshold_cents = cents,
                None => warn!(value = %threshold, "Ignoring invalid MAISON_FREE_SHIPPING_THRESHOLD"),
            }
        }

        if let Some(fee) = lookup("MAISON_SHIPPING_FEE") {
            match parse_units("MAISON_SHIPPING_FEE", &fee) {
                Some(cents) => self.pricing.flat_shipping_fee_cents = cents,
                None => warn!(value = %fee, "Ignoring invalid MAISON_SHIPPING_FEE"),
            }
        }

        if let Some(dir) = lookup("MAISON_DATA_DIR") {
            debug!(dir = %dir, "Overriding data directory from environment");
            self.paths.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(catalog) = lookup("MAISON_CATALOG") {
            self.paths.catalog = Some(PathBuf::from(catalog));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("maison.toml"))
    }

    /// Resolves the directory holding persisted cart and wishlist state.
    pub fn data_dir(&self) -> ConfigResult<PathBuf> {
        match &self.paths.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or(ConfigError::NoDataDir),
        }
    }

    /// Pricing parameters for the pricing engine.
    pub fn pricing(&self) -> PricingConfig {
        PricingConfig {
            free_shipping_threshold: Money::from_cents(self.pricing.free_shipping_threshold_cents),
            flat_shipping_fee: Money::from_cents(self.pricing.flat_shipping_fee_cents),
            tax_rate: TaxRate::from_bps(self.pricing.tax_rate_bps),
        }
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use maison_cli::config::AppConfig;
    /// use maison_core::Money;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let decimals = self.store.currency_decimals.min(2) as u32;
        // Amounts are held in cents; fewer displayed decimals truncate
        let scaled = cents / 10_i64.pow(2 - decimals);
        let divisor = 10_i64.pow(decimals);
        let whole = scaled / divisor;
        let frac = (scaled % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.store.currency_symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole.abs(), frac, width = decimals as usize)
            } else {
                whole.abs().to_string()
            }
        )
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "maison", "storefront")
}

fn parse_units(field: &str, raw: &str) -> Option<i64> {
    let units = raw.trim().parse::<f64>().ok()?;
    cents_from_units(field, units).ok().filter(|cents| *cents >= 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store.name, "Maison");
        assert_eq!(config.pricing(), PricingConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_currency_positive() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(18_360)), "$183.60");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_format_currency_custom_symbol() {
        let mut config = AppConfig::default();
        config.store.currency_symbol = "€".to_string();
        config.store.currency_decimals = 0;
        assert_eq!(config.format_currency(Money::from_units(1299)), "€1299");
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [pricing]
            tax_rate_bps = 825
            "#,
        )
        .unwrap();
        assert_eq!(config.pricing.tax_rate_bps, 825);
        assert_eq!(config.pricing.flat_shipping_fee_cents, 1000);
        assert_eq!(config.store.name, "Maison");
        assert_eq!(config.paths.catalog, None);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[
            ("MAISON_STORE_NAME", "Maison Paris"),
            ("MAISON_TAX_RATE", "8.25"),
            ("MAISON_FREE_SHIPPING_THRESHOLD", "75"),
            ("MAISON_SHIPPING_FEE", "4.50"),
            ("MAISON_DATA_DIR", "/tmp/maison-state"),
        ]));

        assert_eq!(config.store.name, "Maison Paris");
        assert_eq!(config.pricing.tax_rate_bps, 825);
        assert_eq!(config.pricing.free_shipping_threshold_cents, 7500);
        assert_eq!(config.pricing.flat_shipping_fee_cents, 450);
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/maison-state"));
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[
            ("MAISON_TAX_RATE", "lots"),
            ("MAISON_SHIPPING_FEE", "-3"),
        ]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_pricing() {
        let mut config = AppConfig::default();
        config.pricing.tax_rate_bps = 20_000;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.pricing.flat_shipping_fee_cents = -100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maison.toml");
        std::fs::write(&path, "[store]\nname = \"Test Store\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.store.name, "Test Store");
        assert_eq!(config.store.currency_symbol, "$");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(missing)).is_err());
    }

    #[test]
    fn test_to_toml() {
        let rendered = AppConfig::default().to_toml().unwrap();
        assert!(rendered.contains("tax_rate_bps = 800"));
        assert!(rendered.contains("[store]"));
    }
}
