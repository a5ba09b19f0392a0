//! Salary slip model.
//!
//! A [`SalarySlip`] is the summary of a processed payroll run that the
//! ledger and payroll corrections need: the day counts, the full-period
//! amount of each component, and the benefit accruals the run posts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Document type used for salary slips in errors, logs and ledger references.
pub const SALARY_SLIP_DOCTYPE: &str = "Salary Slip";

/// A salary component line with its full-period amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryDetail {
    /// The salary component.
    pub salary_component: String,
    /// The full-period (default) amount before any LWP deduction.
    pub amount: Decimal,
}

/// A benefit accrual posted by a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitAccrual {
    /// The benefit salary component.
    pub salary_component: String,
    /// The amount accrued this cycle.
    pub amount: Decimal,
    /// The yearly entitlement in force. Falls back to the component's
    /// period limit when absent or zero.
    #[serde(default)]
    pub yearly_benefit: Option<Decimal>,
}

/// A processed payroll run for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalarySlip {
    /// The slip identifier.
    pub id: String,
    /// The employee paid by this slip.
    pub employee: String,
    /// The posting date of the slip.
    pub posting_date: NaiveDate,
    /// Total working days in the cycle.
    pub total_working_days: Decimal,
    /// Days marked absent.
    #[serde(default)]
    pub absent_days: Decimal,
    /// Days of leave without pay.
    #[serde(default)]
    pub leave_without_pay: Decimal,
    /// Earning lines.
    #[serde(default)]
    pub earnings: Vec<SalaryDetail>,
    /// Deduction lines.
    #[serde(default)]
    pub deductions: Vec<SalaryDetail>,
    /// Benefit accruals posted to the ledger on submit.
    #[serde(default)]
    pub benefit_accruals: Vec<BenefitAccrual>,
}

impl SalarySlip {
    /// Absent plus leave-without-pay days: the most a correction may reverse.
    pub fn reversible_days(&self) -> EngineResult<Decimal> {
        self.absent_days
            .checked_add(self.leave_without_pay)
            .ok_or(EngineError::AmountOverflow {
                context: "reversible days",
            })
    }

    /// The reference written on ledger entries posted for this slip.
    pub fn source_reference(&self) -> String {
        format!("{SALARY_SLIP_DOCTYPE}/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversible_days_sums_absent_and_lwp() {
        let json = r#"{
            "id": "Sal Slip/EMP-0001/00001",
            "employee": "EMP-0001",
            "posting_date": "2026-04-30",
            "total_working_days": "27",
            "absent_days": "1",
            "leave_without_pay": "1.5"
        }"#;
        let slip: SalarySlip = serde_json::from_str(json).unwrap();
        assert_eq!(slip.reversible_days().unwrap(), Decimal::new(25, 1));
        assert_eq!(slip.source_reference(), "Salary Slip/Sal Slip/EMP-0001/00001");
        assert!(slip.earnings.is_empty());
        assert!(slip.benefit_accruals.is_empty());
    }
}
