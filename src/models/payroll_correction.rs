//! Payroll correction models.
//!
//! A payroll correction reverses leave-without-pay days of an already
//! processed salary slip and pays the difference as arrears.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DocStatus;

/// Document type used for corrections in errors, logs and ledger references.
pub const CORRECTION_DOCTYPE: &str = "Payroll Correction";

/// A request to reverse days of a processed salary slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCorrectionRequest {
    /// The employee the slip belongs to.
    pub employee: String,
    /// The salary slip being corrected.
    pub salary_slip_reference: String,
    /// The number of days to pay back.
    pub days_to_reverse: Decimal,
    /// The payroll date the arrears are paid with.
    pub additional_salary_date: NaiveDate,
}

/// One pro-rated arrear row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrearDetail {
    /// The component the arrear is booked against.
    pub salary_component: String,
    /// The pro-rated amount.
    pub amount: Decimal,
}

/// A payroll correction document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCorrection {
    /// Unique identifier of the correction.
    pub id: Uuid,
    /// The employee the slip belongs to.
    pub employee: String,
    /// The salary slip being corrected.
    pub salary_slip_reference: String,
    /// The number of days to pay back.
    pub days_to_reverse: Decimal,
    /// The payroll date the arrears are paid with.
    pub additional_salary_date: NaiveDate,
    /// The payroll period of the corrected slip.
    #[serde(default)]
    pub payroll_period: Option<String>,
    /// Working days of the corrected slip.
    #[serde(default)]
    pub working_days: Decimal,
    /// Absent plus LWP days of the corrected slip.
    #[serde(default)]
    pub total_lwp_applied: Decimal,
    /// Arrears for earning components.
    #[serde(default)]
    pub earning_arrears: Vec<ArrearDetail>,
    /// Arrears for deduction components.
    #[serde(default)]
    pub deduction_arrears: Vec<ArrearDetail>,
    /// Arrears for accrued benefit components.
    #[serde(default)]
    pub accrual_arrears: Vec<ArrearDetail>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: DocStatus,
}

impl PayrollCorrection {
    /// Creates a draft correction from a request.
    pub fn new(request: PayrollCorrectionRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee: request.employee,
            salary_slip_reference: request.salary_slip_reference,
            days_to_reverse: request.days_to_reverse,
            additional_salary_date: request.additional_salary_date,
            payroll_period: None,
            working_days: Decimal::ZERO,
            total_lwp_applied: Decimal::ZERO,
            earning_arrears: Vec::new(),
            deduction_arrears: Vec::new(),
            accrual_arrears: Vec::new(),
            status: DocStatus::Draft,
        }
    }

    /// The reference written on ledger entries posted for this correction.
    pub fn source_reference(&self) -> String {
        format!("{CORRECTION_DOCTYPE}/{}", self.id)
    }
}
