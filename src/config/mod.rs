//! Configuration loading and management for the benefit ledger engine.
//!
//! This module provides functionality to load engine configuration from YAML
//! files: rounding settings, benefit and arrear components, and payroll
//! periods.
//!
//! # Example
//!
//! ```no_run
//! use benefit_ledger::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Rounding to {} places", config.precision());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ArrearComponent, ComponentType, ComponentsConfig, EngineSettings, LedgerConfig,
    PayrollPeriodsConfig,
};
