//! Calculation logic for the benefit ledger engine.
//!
//! This module contains the pure calculations behind claims and payroll
//! corrections: balance aggregation, maximum claimable amount, claim
//! validation rules, arrear pro-ration and monetary rounding.

mod arrear;
mod balance;
mod claim_validation;
mod eligibility;
mod rounding;

pub use arrear::{
    ArrearBreakup, build_arrear_breakup, daily_amount, prorate_arrear, validate_reversible_days,
};
pub use balance::{BenefitBalances, aggregate_balances, aggregate_entries};
pub use claim_validation::validate_claim;
pub use eligibility::{EligibilityResult, calculate_max_claim_eligible};
pub use rounding::{DEFAULT_PRECISION, round_money};
