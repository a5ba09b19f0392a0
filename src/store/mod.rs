//! Collaborator interfaces consumed by the engine.
//!
//! Persistence, component configuration and payroll period resolution are
//! owned elsewhere; the engine only talks to them through these traits. The
//! [`memory`] submodule provides in-memory implementations.

pub mod memory;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    BalanceKey, BenefitClaim, BenefitComponentConfig, EntryId, LedgerEntry, NewLedgerEntry,
    PayrollCorrection, PayrollPeriod, SalarySlip,
};

pub use memory::{
    InMemoryClaimStore, InMemoryCorrectionStore, InMemoryLedgerStore, InMemorySalarySlipStore,
};

/// Append-only storage of benefit ledger entries.
pub trait LedgerStore: Send + Sync {
    /// Appends an entry and returns its new identifier.
    fn append(&self, entry: NewLedgerEntry) -> EngineResult<EntryId>;

    /// Returns every entry for the key, ordered by posting date.
    fn query(&self, key: &BalanceKey) -> Vec<LedgerEntry>;

    /// Removes every entry posted by the given source document and returns
    /// how many were removed.
    fn delete_by_source_reference(&self, source_reference: &str) -> usize;
}

/// Lookup of benefit component configuration.
pub trait ComponentConfigLookup: Send + Sync {
    /// Returns the configuration of a benefit salary component.
    fn get_config(&self, salary_component: &str) -> EngineResult<BenefitComponentConfig>;
}

/// Resolution of dates to payroll periods.
pub trait PayrollPeriodResolver: Send + Sync {
    /// Returns the period containing `date`, or `NoActivePeriod`.
    fn resolve_period(&self, date: NaiveDate) -> EngineResult<PayrollPeriod>;
}

/// Storage of benefit claim documents.
pub trait ClaimStore: Send + Sync {
    /// Inserts or replaces a claim.
    fn save(&self, claim: BenefitClaim);

    /// Returns a claim by identifier.
    fn get(&self, id: Uuid) -> Option<BenefitClaim>;

    /// Returns the submitted claims of an employee for a component.
    fn submitted_claims(&self, employee: &str, salary_component: &str) -> Vec<BenefitClaim>;
}

/// Storage of processed salary slips.
pub trait SalarySlipStore: Send + Sync {
    /// Inserts or replaces a slip.
    fn save(&self, slip: SalarySlip);

    /// Returns a slip by identifier.
    fn get(&self, id: &str) -> Option<SalarySlip>;

    /// Removes a slip and returns it.
    fn remove(&self, id: &str) -> Option<SalarySlip>;
}

/// Storage of payroll correction documents.
pub trait CorrectionStore: Send + Sync {
    /// Inserts or replaces a correction.
    fn save(&self, correction: PayrollCorrection);

    /// Returns a correction by identifier.
    fn get(&self, id: Uuid) -> Option<PayrollCorrection>;

    /// Returns the submitted corrections of an employee against a slip.
    fn submitted_for_slip(&self, employee: &str, salary_slip: &str) -> Vec<PayrollCorrection>;
}

/// Rejects entries that would break the ledger's invariants.
///
/// Amounts are recorded positive; the transaction type carries the sign.
pub fn validate_new_entry(entry: &NewLedgerEntry) -> EngineResult<()> {
    if entry.amount <= Decimal::ZERO {
        return Err(EngineError::InvalidLedgerEntry {
            message: format!(
                "{} amount must be positive, got {}",
                entry.transaction_type.as_str(),
                entry.amount
            ),
        });
    }
    if entry.source_reference.is_empty() {
        return Err(EngineError::InvalidLedgerEntry {
            message: "source reference is required".to_string(),
        });
    }
    Ok(())
}
