//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{BenefitComponentConfig, PayrollPeriod};
use crate::store::{ComponentConfigLookup, PayrollPeriodResolver};

use super::types::{
    ArrearComponent, ComponentsConfig, EngineSettings, LedgerConfig, PayrollPeriodsConfig,
};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// serves as the component config lookup and payroll period resolver.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml         # Rounding precision
/// ├── components.yaml       # Benefit and arrear components
/// └── payroll_periods.yaml  # Payroll periods
/// ```
///
/// # Example
///
/// ```no_run
/// use benefit_ledger::config::ConfigLoader;
/// use benefit_ledger::store::PayrollPeriodResolver;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
///
/// let component = loader.get_benefit_component("Medical Allowance").unwrap();
/// println!("Payout method: {:?}", component.payout_method);
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 31).unwrap();
/// let period = loader.resolve_period(date).unwrap();
/// println!("Payroll period: {}", period.name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: LedgerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// `settings.yaml` is optional and defaults to two decimal places;
    /// `components.yaml` and `payroll_periods.yaml` are required.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use benefit_ledger::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), benefit_ledger::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("settings.yaml");
        let settings = if settings_path.exists() {
            Self::load_yaml::<EngineSettings>(&settings_path)?
        } else {
            EngineSettings::default()
        };

        let components = Self::load_yaml::<ComponentsConfig>(&path.join("components.yaml"))?;
        let periods = Self::load_yaml::<PayrollPeriodsConfig>(&path.join("payroll_periods.yaml"))?;

        Ok(Self::from_config(LedgerConfig::new(
            settings,
            components.benefit_components,
            components.arrear_components,
            periods.payroll_periods,
        )))
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: LedgerConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Returns the rounding precision for monetary results.
    pub fn precision(&self) -> u32 {
        self.config.settings().precision
    }

    /// Returns the arrear components used by payroll corrections.
    pub fn arrear_components(&self) -> &[ArrearComponent] {
        self.config.arrear_components()
    }

    /// Gets a benefit component by salary component name.
    ///
    /// Returns `ComponentNotFound` if the component is not configured.
    pub fn get_benefit_component(&self, name: &str) -> EngineResult<&BenefitComponentConfig> {
        self.config
            .benefit_components()
            .get(name)
            .ok_or_else(|| EngineError::ComponentNotFound {
                component: name.to_string(),
            })
    }
}

impl ComponentConfigLookup for ConfigLoader {
    fn get_config(&self, salary_component: &str) -> EngineResult<BenefitComponentConfig> {
        self.get_benefit_component(salary_component).cloned()
    }
}

impl PayrollPeriodResolver for ConfigLoader {
    fn resolve_period(&self, date: NaiveDate) -> EngineResult<PayrollPeriod> {
        self.config
            .period_containing(date)
            .cloned()
            .ok_or(EngineError::NoActivePeriod { date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComponentType;
    use crate::models::PayoutMethod;
    use rust_decimal::Decimal;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.precision(), 2);
        assert_eq!(loader.config().benefit_components().len(), 2);
        assert!(!loader.arrear_components().is_empty());
    }

    #[test]
    fn test_get_benefit_component() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let medical = loader.get_benefit_component("Medical Allowance").unwrap();
        assert_eq!(medical.payout_method, PayoutMethod::AccruePerCycleClaimOnly);
        assert_eq!(medical.period_limit_amount, Decimal::new(24000, 0));

        let lta = loader.get_benefit_component("Leave Travel Allowance").unwrap();
        assert_eq!(lta.payout_method, PayoutMethod::AllowClaimUpToFullPeriodLimit);
    }

    #[test]
    fn test_unknown_component_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let err = loader.get_config("Unknown").unwrap_err();
        assert!(matches!(err, EngineError::ComponentNotFound { component } if component == "Unknown"));
    }

    #[test]
    fn test_arrear_components_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let basic = loader
            .arrear_components()
            .iter()
            .find(|c| c.mapping_component == "Basic Salary")
            .unwrap();
        assert_eq!(basic.component_type, ComponentType::Earning);
        assert!(!basic.disabled);
    }

    #[test]
    fn test_resolve_period() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.resolve_period(date(2026, 4, 1)).unwrap().name, "FY 2026");
        assert_eq!(loader.resolve_period(date(2026, 3, 31)).unwrap().name, "FY 2025");
    }

    #[test]
    fn test_resolve_period_outside_any_period() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let err = loader.resolve_period(date(2040, 1, 1)).unwrap_err();
        assert!(matches!(err, EngineError::NoActivePeriod { .. }));
    }

    #[test]
    fn test_missing_directory_returns_config_not_found() {
        let err = ConfigLoader::load("./config/does-not-exist").unwrap_err();
        assert!(matches!(err, EngineError::ConfigNotFound { path } if path.contains("components.yaml")));
    }

    #[test]
    fn test_periods_sorted_by_start_date() {
        let config = LedgerConfig::new(
            EngineSettings::default(),
            vec![],
            vec![],
            vec![
                PayrollPeriod {
                    name: "FY 2026".to_string(),
                    start_date: date(2026, 4, 1),
                    end_date: date(2027, 3, 31),
                },
                PayrollPeriod {
                    name: "FY 2025".to_string(),
                    start_date: date(2025, 4, 1),
                    end_date: date(2026, 3, 31),
                },
            ],
        );
        assert_eq!(config.payroll_periods()[0].name, "FY 2025");
    }

    #[test]
    fn test_settings_parse_with_default_precision() {
        let settings: EngineSettings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings.precision, 2);
    }
}
