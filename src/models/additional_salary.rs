//! Compensation instructions produced by submitted documents.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An instruction for the compensation poster to add a one-off amount to an
/// employee's next payroll run.
///
/// The engine only authorizes these; creating the actual payment is the
/// poster's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalSalary {
    /// The employee to pay.
    pub employee: String,
    /// The salary component the amount is booked against.
    pub salary_component: String,
    /// The payroll date the amount applies to.
    pub payroll_date: NaiveDate,
    /// The amount.
    pub amount: Decimal,
    /// The kind of document that produced this instruction.
    pub ref_doctype: String,
    /// The identifier of that document.
    pub ref_docname: String,
}
