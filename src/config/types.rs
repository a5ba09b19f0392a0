//! Configuration types for the benefit ledger engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::DEFAULT_PRECISION;
use crate::models::{BenefitComponentConfig, PayrollPeriod};

/// Engine-wide settings from settings.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineSettings {
    /// Decimal places monetary results are rounded to.
    #[serde(default = "default_precision")]
    pub precision: u32,
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Which section of a salary slip a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    /// An earning line.
    Earning,
    /// A deduction line.
    Deduction,
}

/// An arrear salary component and the regular component it pays back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrearComponent {
    /// The arrear component name.
    pub name: String,
    /// The regular component whose reversed days this arrear pays.
    pub mapping_component: String,
    /// Earning or deduction.
    pub component_type: ComponentType,
    /// Disabled components are skipped.
    #[serde(default)]
    pub disabled: bool,
}

/// Components configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentsConfig {
    /// Flexible benefit components.
    pub benefit_components: Vec<BenefitComponentConfig>,
    /// Arrear components used by payroll corrections.
    #[serde(default)]
    pub arrear_components: Vec<ArrearComponent>,
}

/// Payroll periods configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollPeriodsConfig {
    /// The defined payroll periods.
    pub payroll_periods: Vec<PayrollPeriod>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    settings: EngineSettings,
    benefit_components: HashMap<String, BenefitComponentConfig>,
    arrear_components: Vec<ArrearComponent>,
    /// Sorted by start date.
    payroll_periods: Vec<PayrollPeriod>,
}

impl LedgerConfig {
    /// Creates a new LedgerConfig from its component parts.
    pub fn new(
        settings: EngineSettings,
        benefit_components: Vec<BenefitComponentConfig>,
        arrear_components: Vec<ArrearComponent>,
        payroll_periods: Vec<PayrollPeriod>,
    ) -> Self {
        let benefit_components = benefit_components
            .into_iter()
            .map(|c| (c.name.clone(), c))
            .collect();
        let mut sorted_periods = payroll_periods;
        sorted_periods.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        Self {
            settings,
            benefit_components,
            arrear_components,
            payroll_periods: sorted_periods,
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns all benefit components keyed by name.
    pub fn benefit_components(&self) -> &HashMap<String, BenefitComponentConfig> {
        &self.benefit_components
    }

    /// Returns all arrear components.
    pub fn arrear_components(&self) -> &[ArrearComponent] {
        &self.arrear_components
    }

    /// Returns all payroll periods, oldest first.
    pub fn payroll_periods(&self) -> &[PayrollPeriod] {
        &self.payroll_periods
    }

    /// Returns the first period containing `date`.
    pub fn period_containing(&self, date: NaiveDate) -> Option<&PayrollPeriod> {
        self.payroll_periods.iter().find(|p| p.contains_date(date))
    }
}
