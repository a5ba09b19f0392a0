//! Request types for the benefit ledger API.
//!
//! Salary slips and payroll corrections are accepted in their model form;
//! claims and balance queries have their own shapes defined here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ClaimRequest;

/// Request body for `POST /claims`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimSubmissionRequest {
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
    /// The date payroll is being processed on. Defaults to today (UTC).
    #[serde(default)]
    pub processing_date: Option<NaiveDate>,
}

impl From<ClaimSubmissionRequest> for ClaimRequest {
    fn from(req: ClaimSubmissionRequest) -> Self {
        ClaimRequest {
            employee: req.employee,
            salary_component: req.salary_component,
            payroll_date: req.payroll_date,
            claimed_amount: req.claimed_amount,
            current_cycle_accrual_preview: req.current_cycle_accrual_preview,
        }
    }
}

/// Query string for `GET /benefits/:employee/:component`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitDetailsQuery {
    /// The date whose payroll period is reported.
    pub payroll_date: NaiveDate,
    /// Unposted accrual of the current cycle.
    #[serde(default)]
    pub accrual_preview: Option<Decimal>,
}
