//! Maximum claimable amount calculation.
//!
//! This module derives how much an employee may claim against a benefit
//! component from the aggregated ledger balances and the component's payout
//! method.

use rust_decimal::Decimal;
use tracing::error;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, BalanceKey, BenefitComponentConfig, PayoutMethod};

use super::balance::BenefitBalances;
use super::rounding::round_money;

/// The result of an eligibility calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct EligibilityResult {
    /// The maximum amount currently claimable. May be negative for
    /// full-period-limit components that are already over-claimed.
    pub eligible: Decimal,
    /// The balances the calculation started from.
    pub balances: BenefitBalances,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the maximum amount claimable for a balance key.
///
/// - Accrue per cycle, claim only: `accrued + preview - paid`. Paid exceeding
///   accrued plus preview means the ledger is corrupt and yields
///   [`EngineError::InconsistentLedger`].
/// - Allow claim up to full period limit: `period_limit_amount - paid`.
///
/// The result is rounded half-up to `precision` once, after all terms are
/// combined. `accrual_preview` is ignored for full-period-limit components.
/// Terms whose sum leaves the decimal range yield
/// [`EngineError::AmountOverflow`].
///
/// # Examples
///
/// ```
/// use benefit_ledger::calculation::{calculate_max_claim_eligible, BenefitBalances};
/// use benefit_ledger::models::{BalanceKey, BenefitComponentConfig, PayoutMethod};
/// use rust_decimal::Decimal;
///
/// let config = BenefitComponentConfig {
///     name: "Medical Allowance".to_string(),
///     payout_method: PayoutMethod::AccruePerCycleClaimOnly,
///     period_limit_amount: Decimal::new(24000, 0),
/// };
/// let balances = BenefitBalances {
///     accrued: Decimal::new(1200, 0),
///     paid: Decimal::new(300, 0),
/// };
/// let key = BalanceKey::new("EMP-0001", "Medical Allowance", "FY 2026");
///
/// let result = calculate_max_claim_eligible(&key, &balances, &config, Decimal::ZERO, 2, 1).unwrap();
/// assert_eq!(result.eligible, Decimal::new(900, 0));
/// ```
pub fn calculate_max_claim_eligible(
    key: &BalanceKey,
    balances: &BenefitBalances,
    config: &BenefitComponentConfig,
    accrual_preview: Decimal,
    precision: u32,
    step_number: u32,
) -> EngineResult<EligibilityResult> {
    let (eligible, reasoning) = match config.payout_method {
        PayoutMethod::AccruePerCycleClaimOnly => {
            let available = balances
                .accrued
                .checked_add(accrual_preview)
                .ok_or(EngineError::AmountOverflow {
                    context: "available benefit",
                })?;
            if available < balances.paid {
                error!(
                    employee = %key.employee,
                    salary_component = %key.salary_component,
                    payroll_period = %key.payroll_period,
                    accrued = %balances.accrued,
                    preview = %accrual_preview,
                    paid = %balances.paid,
                    "Benefit ledger paid total exceeds accrued total"
                );
                return Err(EngineError::InconsistentLedger {
                    employee: key.employee.clone(),
                    salary_component: key.salary_component.clone(),
                    payroll_period: key.payroll_period.clone(),
                    accrued: available,
                    paid: balances.paid,
                });
            }
            let unpaid = available
                .checked_sub(balances.paid)
                .ok_or(EngineError::AmountOverflow {
                    context: "maximum claim eligible",
                })?;
            let eligible = round_money(unpaid, precision);
            let reasoning = format!(
                "${} accrued + ${} current cycle - ${} paid = ${}",
                balances.accrued.normalize(),
                accrual_preview.normalize(),
                balances.paid.normalize(),
                eligible
            );
            (eligible, reasoning)
        }
        PayoutMethod::AllowClaimUpToFullPeriodLimit => {
            let remaining = config
                .period_limit_amount
                .checked_sub(balances.paid)
                .ok_or(EngineError::AmountOverflow {
                    context: "maximum claim eligible",
                })?;
            let eligible = round_money(remaining, precision);
            let reasoning = format!(
                "${} period limit - ${} paid = ${}",
                config.period_limit_amount.normalize(),
                balances.paid.normalize(),
                eligible
            );
            (eligible, reasoning)
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "max_claim_eligible".to_string(),
        rule_name: "Maximum Claim Eligible".to_string(),
        input: serde_json::json!({
            "employee": key.employee,
            "salary_component": key.salary_component,
            "payroll_period": key.payroll_period,
            "payout_method": config.payout_method,
            "accrued": balances.accrued.normalize().to_string(),
            "paid": balances.paid.normalize().to_string(),
            "accrual_preview": accrual_preview.normalize().to_string(),
            "period_limit_amount": config.period_limit_amount.normalize().to_string(),
        }),
        output: serde_json::json!({
            "eligible": eligible.to_string(),
        }),
        reasoning,
    };

    Ok(EligibilityResult {
        eligible,
        balances: *balances,
        audit_step,
    })
}
