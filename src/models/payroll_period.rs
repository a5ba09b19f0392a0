//! Payroll period model.
//!
//! This module contains the [`PayrollPeriod`] type: the fiscal window over
//! which accrual and payout totals are aggregated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A payroll period with its inclusive date range.
///
/// # Example
///
/// ```
/// use benefit_ledger::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod {
///     name: "FY 2026".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2027, 3, 31).unwrap(),
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap())); // start date
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2027, 3, 31).unwrap())); // end date
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap())); // before
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// The period name (e.g., "FY 2026").
    pub name: String,
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PayrollPeriod {
    /// Checks if a given date falls within this payroll period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
