//! Benefit ledger entry model.
//!
//! This module contains the [`LedgerEntry`] type and the [`TransactionType`]
//! that determines the sign of its amount.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned to a ledger entry when it is appended.
pub type EntryId = Uuid;

/// The kind of movement a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Benefit earned by the employee but not yet paid.
    Accrual,
    /// Benefit actually paid out.
    Payout,
}

impl TransactionType {
    /// Returns the label used in audit output and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Accrual => "accrual",
            TransactionType::Payout => "payout",
        }
    }
}

/// The (employee, salary component, payroll period) key balances are
/// aggregated over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BalanceKey {
    /// The employee identifier.
    pub employee: String,
    /// The benefit salary component.
    pub salary_component: String,
    /// The payroll period name.
    pub payroll_period: String,
}

impl BalanceKey {
    /// Creates a new balance key.
    pub fn new(
        employee: impl Into<String>,
        salary_component: impl Into<String>,
        payroll_period: impl Into<String>,
    ) -> Self {
        Self {
            employee: employee.into(),
            salary_component: salary_component.into(),
            payroll_period: payroll_period.into(),
        }
    }
}

/// An entry waiting to be appended to the ledger.
///
/// The store assigns the [`EntryId`] on append; after that the entry is
/// never edited, only deleted together with everything else posted by the
/// same source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLedgerEntry {
    /// The employee identifier.
    pub employee: String,
    /// The benefit salary component.
    pub salary_component: String,
    /// The payroll period name.
    pub payroll_period: String,
    /// Whether this entry accrues or pays out benefit.
    pub transaction_type: TransactionType,
    /// The amount, always positive.
    pub amount: Decimal,
    /// The posting date.
    pub posting_date: NaiveDate,
    /// Snapshot of the yearly entitlement when the entry was created.
    pub yearly_benefit: Decimal,
    /// The document that posted this entry.
    pub source_reference: String,
}

impl NewLedgerEntry {
    /// Returns the balance key this entry aggregates under.
    pub fn key(&self) -> BalanceKey {
        BalanceKey::new(
            &self.employee,
            &self.salary_component,
            &self.payroll_period,
        )
    }
}

/// A persisted, immutable ledger entry.
///
/// # Example
///
/// ```
/// use benefit_ledger::models::{LedgerEntry, TransactionType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let entry = LedgerEntry {
///     id: Uuid::new_v4(),
///     employee: "EMP-0001".to_string(),
///     salary_component: "Medical Allowance".to_string(),
///     payroll_period: "FY 2026".to_string(),
///     transaction_type: TransactionType::Accrual,
///     amount: Decimal::new(200000, 2),
///     posting_date: NaiveDate::from_ymd_opt(2026, 4, 30).unwrap(),
///     yearly_benefit: Decimal::new(2400000, 2),
///     source_reference: "Sal Slip/EMP-0001/00001".to_string(),
/// };
/// assert_eq!(entry.signed_amount(), Decimal::new(200000, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Identifier assigned by the store.
    pub id: EntryId,
    /// The employee identifier.
    pub employee: String,
    /// The benefit salary component.
    pub salary_component: String,
    /// The payroll period name.
    pub payroll_period: String,
    /// Whether this entry accrues or pays out benefit.
    pub transaction_type: TransactionType,
    /// The amount, always positive.
    pub amount: Decimal,
    /// The posting date.
    pub posting_date: NaiveDate,
    /// Snapshot of the yearly entitlement when the entry was created.
    pub yearly_benefit: Decimal,
    /// The document that posted this entry.
    pub source_reference: String,
}

impl LedgerEntry {
    /// Materializes a pending entry under the given identifier.
    pub fn from_new(id: EntryId, entry: NewLedgerEntry) -> Self {
        Self {
            id,
            employee: entry.employee,
            salary_component: entry.salary_component,
            payroll_period: entry.payroll_period,
            transaction_type: entry.transaction_type,
            amount: entry.amount,
            posting_date: entry.posting_date,
            yearly_benefit: entry.yearly_benefit,
            source_reference: entry.source_reference,
        }
    }

    /// Returns true if the entry belongs to the given balance key.
    pub fn matches(&self, key: &BalanceKey) -> bool {
        self.employee == key.employee
            && self.salary_component == key.salary_component
            && self.payroll_period == key.payroll_period
    }

    /// The amount with the sign implied by the transaction type: positive
    /// for accruals, negative for payouts.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Accrual => self.amount,
            TransactionType::Payout => -self.amount,
        }
    }
}
