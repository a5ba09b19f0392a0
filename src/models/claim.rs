//! Benefit claim models.
//!
//! A [`ClaimRequest`] is what a caller submits; a [`BenefitClaim`] is the
//! document that tracks it through validation and submission.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DocStatus;

/// Document type used for claims in errors, logs and ledger references.
pub const CLAIM_DOCTYPE: &str = "Employee Benefit Claim";

/// A request to claim benefit against the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// The employee making the claim.
    pub employee: String,
    /// The benefit salary component claimed against.
    pub salary_component: String,
    /// The payroll date the claim will be paid with.
    pub payroll_date: NaiveDate,
    /// The amount claimed.
    pub claimed_amount: Decimal,
    /// Accrual of the current cycle that has not been posted yet. Only used
    /// for accrue-per-cycle components.
    #[serde(default)]
    pub current_cycle_accrual_preview: Option<Decimal>,
}

/// A benefit claim document.
///
/// # Example
///
/// ```
/// use benefit_ledger::models::{BenefitClaim, ClaimRequest, DocStatus};
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
/// assert_eq!(claim.status, DocStatus::Draft);
/// assert_eq!(claim.claim_month(), (2026, 10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitClaim {
    /// Unique identifier of the claim.
    pub id: Uuid,
    /// The employee making the claim.
    pub employee: String,
    /// The benefit salary component claimed against.
    pub salary_component: String,
    /// The payroll date the claim will be paid with.
    pub payroll_date: NaiveDate,
    /// The amount claimed.
    pub claimed_amount: Decimal,
    /// Unposted accrual of the current cycle.
    #[serde(default)]
    pub current_cycle_accrual_preview: Option<Decimal>,
    /// The payroll period resolved from the payroll date.
    #[serde(default)]
    pub payroll_period: Option<String>,
    /// The maximum claimable amount computed at the last validation.
    #[serde(default)]
    pub max_amount_eligible: Option<Decimal>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: DocStatus,
}

impl BenefitClaim {
    /// Creates a draft claim from a request.
    pub fn new(request: ClaimRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee: request.employee,
            salary_component: request.salary_component,
            payroll_date: request.payroll_date,
            claimed_amount: request.claimed_amount,
            current_cycle_accrual_preview: request.current_cycle_accrual_preview,
            payroll_period: None,
            max_amount_eligible: None,
            status: DocStatus::Draft,
        }
    }

    /// The (year, month) payroll cycle the claim falls in.
    pub fn claim_month(&self) -> (i32, u32) {
        (self.payroll_date.year(), self.payroll_date.month())
    }

    /// The unposted accrual preview, defaulting to zero.
    pub fn accrual_preview(&self) -> Decimal {
        self.current_cycle_accrual_preview.unwrap_or(Decimal::ZERO)
    }

    /// The reference written on ledger entries posted for this claim.
    pub fn source_reference(&self) -> String {
        format!("{CLAIM_DOCTYPE}/{}", self.id)
    }
}
