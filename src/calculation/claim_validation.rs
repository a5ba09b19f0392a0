//! Benefit claim validation rules.
//!
//! Rules are checked in a fixed order and the first violation wins:
//! positive amount, within eligibility, no other submitted claim in the same
//! month, and no retroactive payroll date.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, BenefitClaim, DocStatus};

/// Validates a claim against its computed eligibility.
///
/// `submitted_claims` holds the finalized claims of the same employee and
/// component; the claim itself may appear in it and is skipped.
///
/// Returns an audit step recording the checks on success.
///
/// # Examples
///
/// ```
/// use benefit_ledger::calculation::validate_claim;
/// use benefit_ledger::models::{BenefitClaim, ClaimRequest};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let claim = BenefitClaim::new(ClaimRequest {
///     employee: "EMP-0001".to_string(),
///     salary_component: "Medical Allowance".to_string(),
///     payroll_date: NaiveDate::from_ymd_opt(2026, 10, 31).unwrap(),
///     claimed_amount: Decimal::new(900, 0),
///     current_cycle_accrual_preview: None,
/// });
/// let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
///
/// assert!(validate_claim(&claim, Decimal::new(900, 0), &[], today, 2).is_ok());
/// assert!(validate_claim(&claim, Decimal::new(899, 0), &[], today, 2).is_err());
/// ```
pub fn validate_claim(
    claim: &BenefitClaim,
    eligible: Decimal,
    submitted_claims: &[BenefitClaim],
    processing_date: NaiveDate,
    step_number: u32,
) -> EngineResult<AuditStep> {
    if claim.claimed_amount <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount {
            employee: claim.employee.clone(),
            amount: claim.claimed_amount,
        });
    }

    if claim.claimed_amount > eligible {
        return Err(EngineError::ExceedsEligibleAmount {
            employee: claim.employee.clone(),
            claimed: claim.claimed_amount,
            eligible,
        });
    }

    if let Some(conflict) = find_conflicting_claim(claim, submitted_claims) {
        let (year, month) = claim.claim_month();
        return Err(EngineError::DuplicateClaim {
            employee: claim.employee.clone(),
            salary_component: claim.salary_component.clone(),
            conflicting_claim: conflict.id.to_string(),
            year,
            month,
        });
    }

    if claim.payroll_date < processing_date {
        return Err(EngineError::RetroactiveClaim {
            payroll_date: claim.payroll_date,
            processing_date,
        });
    }

    Ok(AuditStep {
        step_number,
        rule_id: "benefit_claim_validation".to_string(),
        rule_name: "Benefit Claim Validation".to_string(),
        input: serde_json::json!({
            "claimed_amount": claim.claimed_amount.normalize().to_string(),
            "eligible": eligible.normalize().to_string(),
            "payroll_date": claim.payroll_date,
            "processing_date": processing_date,
            "submitted_claims": submitted_claims.len(),
        }),
        output: serde_json::json!({
            "valid": true,
        }),
        reasoning: format!(
            "${} claimed is within ${} eligible, no other claim submitted for {}-{:02}",
            claim.claimed_amount.normalize(),
            eligible.normalize(),
            claim.claim_month().0,
            claim.claim_month().1
        ),
    })
}

fn find_conflicting_claim<'a>(
    claim: &BenefitClaim,
    submitted_claims: &'a [BenefitClaim],
) -> Option<&'a BenefitClaim> {
    submitted_claims.iter().find(|other| {
        other.id != claim.id
            && other.status == DocStatus::Submitted
            && other.employee == claim.employee
            && other.salary_component == claim.salary_component
            && other.claim_month() == claim.claim_month()
    })
}
