//! Benefit balance aggregation.
//!
//! Balances are always derived from the ledger by summing entry amounts per
//! transaction type. Nothing here caches or mutates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{BalanceKey, LedgerEntry, TransactionType};
use crate::store::LedgerStore;

/// Accrued and paid totals for one (employee, component, period) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BenefitBalances {
    /// Sum of all accrual entries.
    pub accrued: Decimal,
    /// Sum of all payout entries.
    pub paid: Decimal,
}

impl BenefitBalances {
    /// Returns the total for one transaction type.
    pub fn total(&self, transaction_type: TransactionType) -> Decimal {
        match transaction_type {
            TransactionType::Accrual => self.accrued,
            TransactionType::Payout => self.paid,
        }
    }

    /// Accrued but not yet paid.
    pub fn unpaid(&self) -> Decimal {
        self.accrued - self.paid
    }
}

/// Sums a set of ledger entries by transaction type.
///
/// An empty iterator yields all-zero balances. A total outside the decimal
/// range yields [`EngineError::AmountOverflow`].
///
/// # Examples
///
/// ```
/// use benefit_ledger::calculation::aggregate_entries;
/// use benefit_ledger::models::LedgerEntry;
/// use rust_decimal::Decimal;
///
/// let entries: Vec<LedgerEntry> = Vec::new();
/// let balances = aggregate_entries(&entries).unwrap();
/// assert_eq!(balances.accrued, Decimal::ZERO);
/// assert_eq!(balances.paid, Decimal::ZERO);
/// ```
pub fn aggregate_entries<'a, I>(entries: I) -> EngineResult<BenefitBalances>
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    entries
        .into_iter()
        .try_fold(BenefitBalances::default(), |mut balances, entry| {
            let total = match entry.transaction_type {
                TransactionType::Accrual => &mut balances.accrued,
                TransactionType::Payout => &mut balances.paid,
            };
            *total = total
                .checked_add(entry.amount)
                .ok_or(EngineError::AmountOverflow {
                    context: "benefit balance",
                })?;
            Ok(balances)
        })
}

/// Reads every entry for `key` from the store and aggregates it.
pub fn aggregate_balances(
    store: &dyn LedgerStore,
    key: &BalanceKey,
) -> EngineResult<BenefitBalances> {
    aggregate_entries(&store.query(key))
}
