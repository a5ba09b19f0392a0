//! Benefit component configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a benefit component pays out against claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutMethod {
    /// Benefit accrues every payroll cycle and is paid only when claimed.
    /// Claims are capped by what has accrued so far.
    AccruePerCycleClaimOnly,
    /// Claims may draw on the full period limit up front.
    AllowClaimUpToFullPeriodLimit,
}

/// Configuration of a flexible benefit salary component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitComponentConfig {
    /// The salary component name.
    pub name: String,
    /// How the component pays out.
    pub payout_method: PayoutMethod,
    /// The full-period cap. Used as the claim cap for
    /// [`PayoutMethod::AllowClaimUpToFullPeriodLimit`] and as the default
    /// yearly benefit snapshot when a posting does not supply one.
    pub period_limit_amount: Decimal,
}
