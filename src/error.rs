//! Error types for the benefit ledger engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every business-rule and data-integrity violation the engine reports.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the benefit ledger engine.
///
/// Every variant is terminal for the operation that raised it. Only
/// [`EngineError::InconsistentLedger`] signals corrupted data; the rest are
/// expected validation outcomes carrying the offending values for display.
///
/// # Example
///
/// ```
/// use benefit_ledger::error::EngineError;
/// use rust_decimal::Decimal;
///
/// let error = EngineError::InvalidAmount {
///     employee: "EMP-0001".to_string(),
///     amount: Decimal::ZERO,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Claimed amount of employee EMP-0001 should be greater than 0 (got 0)"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The claimed amount was zero or negative.
    #[error("Claimed amount of employee {employee} should be greater than 0 (got {amount})")]
    InvalidAmount {
        /// The employee making the claim.
        employee: String,
        /// The rejected amount.
        amount: Decimal,
    },

    /// The claimed amount exceeds what the ledger allows.
    #[error(
        "Claimed amount {claimed} of employee {employee} exceeds the maximum amount eligible {eligible}"
    )]
    ExceedsEligibleAmount {
        /// The employee making the claim.
        employee: String,
        /// The amount claimed.
        claimed: Decimal,
        /// The maximum amount currently claimable.
        eligible: Decimal,
    },

    /// A submitted claim already covers the same employee, component and month.
    #[error(
        "Employee {employee} already has claim {conflicting_claim} for {salary_component} in {year}-{month:02}"
    )]
    DuplicateClaim {
        /// The employee making the claim.
        employee: String,
        /// The benefit salary component.
        salary_component: String,
        /// The identifier of the submitted claim in the same month.
        conflicting_claim: String,
        /// Calendar year of the conflicting month.
        year: i32,
        /// Calendar month of the conflicting month.
        month: u32,
    },

    /// The claim's payroll date is before the processing date.
    #[error("Payroll date {payroll_date} is before the processing date {processing_date}")]
    RetroactiveClaim {
        /// The claim's payroll date.
        payroll_date: NaiveDate,
        /// The current processing date.
        processing_date: NaiveDate,
    },

    /// Paid benefit exceeds what was accrued. Indicates corrupted ledger data.
    #[error(
        "Accrued amount {accrued} is less than paid amount {paid} for benefit {salary_component} of employee {employee} in payroll period {payroll_period}"
    )]
    InconsistentLedger {
        /// The employee whose ledger is inconsistent.
        employee: String,
        /// The benefit salary component.
        salary_component: String,
        /// The payroll period.
        payroll_period: String,
        /// Accrued total, including any current-cycle preview.
        accrued: Decimal,
        /// Paid total.
        paid: Decimal,
    },

    /// The requested reversal would exceed the slip's unpaid days.
    #[error(
        "You cannot reverse more than the total LWP days {reversible}. You have already reversed {already_reversed} days for this employee (requested {requested})"
    )]
    ExceedsReversibleDays {
        /// Days requested by the new correction.
        requested: Decimal,
        /// Days reversed by earlier submitted corrections.
        already_reversed: Decimal,
        /// Absent plus leave-without-pay days on the source slip.
        reversible: Decimal,
    },

    /// A correction asked to reverse zero or negative days.
    #[error("Days to reverse must be greater than 0 (got {days})")]
    InvalidDaysToReverse {
        /// The rejected day count.
        days: Decimal,
    },

    /// No payroll period contains the given date.
    #[error("{date} is not in a valid Payroll Period")]
    NoActivePeriod {
        /// The date that could not be resolved.
        date: NaiveDate,
    },

    /// The salary component has no benefit configuration.
    #[error("Benefit component not found: {component}")]
    ComponentNotFound {
        /// The unknown component.
        component: String,
    },

    /// A referenced document does not exist.
    #[error("{kind} not found: {id}")]
    DocumentNotFound {
        /// The document kind (e.g. "Salary Slip").
        kind: &'static str,
        /// The missing identifier.
        id: String,
    },

    /// A document lifecycle transition is not allowed from its current state.
    #[error("Cannot {action} document {id} in status {status}")]
    InvalidTransition {
        /// The document identifier.
        id: String,
        /// The attempted action.
        action: &'static str,
        /// The current status.
        status: String,
    },

    /// An amount calculation exceeded the representable decimal range.
    #[error("Amount out of range while computing {context}")]
    AmountOverflow {
        /// What was being computed.
        context: &'static str,
    },

    /// A ledger entry was rejected at append time.
    #[error("Invalid ledger entry: {message}")]
    InvalidLedgerEntry {
        /// Why the entry was rejected.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns true when the error signals corrupted ledger data rather than
    /// a rejected request.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, EngineError::InconsistentLedger { .. })
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
