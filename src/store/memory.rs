//! In-memory store implementations.
//!
//! Each store guards its own data with a lock and holds no cross-store
//! transaction; serializing check-then-act sequences is the engine's job.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    BalanceKey, BenefitClaim, DocStatus, EntryId, LedgerEntry, NewLedgerEntry, PayrollCorrection,
    SalarySlip,
};

use super::{ClaimStore, CorrectionStore, LedgerStore, SalarySlipStore, validate_new_entry};

/// A ledger kept in a vector, in append order.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    entries: RwLock<Vec<LedgerEntry>>,
}

impl InMemoryLedgerStore {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries in the ledger.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if the ledger has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn append(&self, entry: NewLedgerEntry) -> EngineResult<EntryId> {
        validate_new_entry(&entry)?;
        let id = Uuid::new_v4();
        debug!(
            entry_id = %id,
            employee = %entry.employee,
            salary_component = %entry.salary_component,
            transaction_type = entry.transaction_type.as_str(),
            amount = %entry.amount,
            "Appending ledger entry"
        );
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LedgerEntry::from_new(id, entry));
        Ok(id)
    }

    fn query(&self, key: &BalanceKey) -> Vec<LedgerEntry> {
        let mut matching: Vec<LedgerEntry> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.matches(key))
            .cloned()
            .collect();
        // Stable sort keeps append order within a posting date.
        matching.sort_by_key(|e| e.posting_date);
        matching
    }

    fn delete_by_source_reference(&self, source_reference: &str) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|e| e.source_reference != source_reference);
        before - entries.len()
    }
}

/// Claims keyed by identifier.
#[derive(Debug, Default)]
pub struct InMemoryClaimStore {
    claims: RwLock<HashMap<Uuid, BenefitClaim>>,
}

impl InMemoryClaimStore {
    /// Creates an empty claim store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored claims, in any status.
    pub fn len(&self) -> usize {
        self.claims
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no claim is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ClaimStore for InMemoryClaimStore {
    fn save(&self, claim: BenefitClaim) {
        self.claims
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(claim.id, claim);
    }

    fn get(&self, id: Uuid) -> Option<BenefitClaim> {
        self.claims
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn submitted_claims(&self, employee: &str, salary_component: &str) -> Vec<BenefitClaim> {
        self.claims
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|c| {
                c.status == DocStatus::Submitted
                    && c.employee == employee
                    && c.salary_component == salary_component
            })
            .cloned()
            .collect()
    }
}

/// Salary slips keyed by identifier.
#[derive(Debug, Default)]
pub struct InMemorySalarySlipStore {
    slips: RwLock<HashMap<String, SalarySlip>>,
}

impl InMemorySalarySlipStore {
    /// Creates an empty slip store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SalarySlipStore for InMemorySalarySlipStore {
    fn save(&self, slip: SalarySlip) {
        self.slips
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(slip.id.clone(), slip);
    }

    fn get(&self, id: &str) -> Option<SalarySlip> {
        self.slips
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn remove(&self, id: &str) -> Option<SalarySlip> {
        self.slips
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }
}

/// Payroll corrections keyed by identifier.
#[derive(Debug, Default)]
pub struct InMemoryCorrectionStore {
    corrections: RwLock<HashMap<Uuid, PayrollCorrection>>,
}

impl InMemoryCorrectionStore {
    /// Creates an empty correction store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CorrectionStore for InMemoryCorrectionStore {
    fn save(&self, correction: PayrollCorrection) {
        self.corrections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(correction.id, correction);
    }

    fn get(&self, id: Uuid) -> Option<PayrollCorrection> {
        self.corrections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn submitted_for_slip(&self, employee: &str, salary_slip: &str) -> Vec<PayrollCorrection> {
        self.corrections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|c| {
                c.status == DocStatus::Submitted
                    && c.employee == employee
                    && c.salary_slip_reference == salary_slip
            })
            .cloned()
            .collect()
    }
}
