//! Salary slip posting.
//!
//! Submitting a slip posts one accrual per benefit line to the ledger;
//! cancelling it removes them again.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calculation::aggregate_entries;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BalanceKey, CORRECTION_DOCTYPE, EntryId, NewLedgerEntry, SalarySlip, TransactionType,
};
use crate::store::{
    ComponentConfigLookup, CorrectionStore, LedgerStore, PayrollPeriodResolver, SalarySlipStore,
};

use super::locks::KeyedLocks;

pub use crate::models::SALARY_SLIP_DOCTYPE;

/// Posts and reverses the benefit accruals of salary slips.
pub struct SalarySlipService {
    ledger: Arc<dyn LedgerStore>,
    slips: Arc<dyn SalarySlipStore>,
    corrections: Arc<dyn CorrectionStore>,
    components: Arc<dyn ComponentConfigLookup>,
    periods: Arc<dyn PayrollPeriodResolver>,
    locks: Arc<KeyedLocks<BalanceKey>>,
    slip_locks: Arc<KeyedLocks<String>>,
}

impl SalarySlipService {
    /// Creates a slip service over the given collaborators.
    ///
    /// `slip_locks` must be shared with the payroll correction service so a
    /// slip cannot be cancelled while a correction of it is being posted.
    pub fn new(
        ledger: Arc<dyn LedgerStore>,
        slips: Arc<dyn SalarySlipStore>,
        corrections: Arc<dyn CorrectionStore>,
        components: Arc<dyn ComponentConfigLookup>,
        periods: Arc<dyn PayrollPeriodResolver>,
        locks: Arc<KeyedLocks<BalanceKey>>,
        slip_locks: Arc<KeyedLocks<String>>,
    ) -> Self {
        Self {
            ledger,
            slips,
            corrections,
            components,
            periods,
            locks,
            slip_locks,
        }
    }

    /// Returns a submitted slip by identifier.
    pub fn get(&self, id: &str) -> Option<SalarySlip> {
        self.slips.get(id)
    }

    /// Submits a slip, posting an accrual for each non-zero benefit line.
    ///
    /// Every line is checked before anything is posted. If an append still
    /// fails, the entries already posted for the slip are removed. The
    /// duplicate check, the posting and the save run under the slip's lock.
    pub fn submit(&self, slip: SalarySlip) -> EngineResult<Vec<EntryId>> {
        let slip_id = slip.id.clone();
        self.slip_locks.with_lock(&slip_id, || {
            if self.slips.get(&slip.id).is_some() {
                return Err(EngineError::InvalidTransition {
                    id: slip.id,
                    action: "submit",
                    status: "submitted".to_string(),
                });
            }

            let period = self.periods.resolve_period(slip.posting_date)?;
            let source_reference = slip.source_reference();
            let mut pending = Vec::with_capacity(slip.benefit_accruals.len());
            for accrual in slip.benefit_accruals.iter().filter(|a| !a.amount.is_zero()) {
                let config = self.components.get_config(&accrual.salary_component)?;
                let yearly_benefit = accrual
                    .yearly_benefit
                    .filter(|b| !b.is_zero())
                    .unwrap_or(config.period_limit_amount);
                pending.push(NewLedgerEntry {
                    employee: slip.employee.clone(),
                    salary_component: accrual.salary_component.clone(),
                    payroll_period: period.name.clone(),
                    transaction_type: TransactionType::Accrual,
                    amount: accrual.amount,
                    posting_date: slip.posting_date,
                    yearly_benefit,
                    source_reference: source_reference.clone(),
                });
            }

            let keys: Vec<BalanceKey> = pending.iter().map(NewLedgerEntry::key).collect();
            let ids = self.locks.with_locks(&keys, || {
                let mut ids = Vec::with_capacity(pending.len());
                for entry in pending {
                    match self.ledger.append(entry) {
                        Ok(id) => ids.push(id),
                        Err(err) => {
                            let removed = self.ledger.delete_by_source_reference(&source_reference);
                            warn!(
                                salary_slip = %slip.id,
                                entries_removed = removed,
                                error = %err,
                                "Salary slip accrual posting failed, rolled back"
                            );
                            return Err(err);
                        }
                    }
                }
                Ok(ids)
            })?;

            info!(
                salary_slip = %slip.id,
                employee = %slip.employee,
                payroll_period = %period.name,
                accruals_posted = ids.len(),
                "Salary slip submitted"
            );
            self.slips.save(slip);
            Ok(ids)
        })
    }

    /// Cancels a submitted slip, removing its accruals. Returns the number
    /// of ledger entries removed.
    ///
    /// A slip cannot be cancelled while a submitted payroll correction
    /// references it, or while removing its accruals would leave a balance
    /// with more paid than accrued.
    pub fn cancel(&self, id: &str) -> EngineResult<usize> {
        self.slip_locks.with_lock(&id.to_string(), || {
            let slip = self
                .slips
                .get(id)
                .ok_or_else(|| EngineError::DocumentNotFound {
                    kind: SALARY_SLIP_DOCTYPE,
                    id: id.to_string(),
                })?;

            if let Some(correction) = self
                .corrections
                .submitted_for_slip(&slip.employee, &slip.id)
                .first()
            {
                warn!(
                    salary_slip = %slip.id,
                    correction_id = %correction.id,
                    "Salary slip cancel refused, submitted correction references it"
                );
                return Err(EngineError::InvalidTransition {
                    id: slip.id,
                    action: "cancel",
                    status: format!("submitted, linked to {CORRECTION_DOCTYPE} {}", correction.id),
                });
            }

            let period = self.periods.resolve_period(slip.posting_date)?;
            let keys: Vec<BalanceKey> = slip
                .benefit_accruals
                .iter()
                .map(|a| BalanceKey::new(&slip.employee, &a.salary_component, &period.name))
                .collect();
            let source_reference = slip.source_reference();

            let removed = self.locks.with_locks(&keys, || {
                for key in &keys {
                    self.ensure_accruals_unclaimed(&slip, key, &source_reference)?;
                }
                let removed = self.ledger.delete_by_source_reference(&source_reference);
                self.slips.remove(&slip.id);
                Ok(removed)
            })?;

            info!(
                salary_slip = %slip.id,
                employee = %slip.employee,
                entries_removed = removed,
                "Salary slip cancelled"
            );
            Ok(removed)
        })
    }

    /// Fails when the slip's accruals for `key` are needed to cover what was
    /// already paid. Callers must hold the lock for `key`.
    fn ensure_accruals_unclaimed(
        &self,
        slip: &SalarySlip,
        key: &BalanceKey,
        source_reference: &str,
    ) -> EngineResult<()> {
        let entries = self.ledger.query(key);
        let balances = aggregate_entries(&entries)?;
        let from_slip = aggregate_entries(
            entries
                .iter()
                .filter(|e| e.source_reference == source_reference),
        )?;

        let remaining = balances.accrued - from_slip.accrued;
        if remaining < balances.paid && from_slip.accrued > Decimal::ZERO {
            warn!(
                salary_slip = %slip.id,
                salary_component = %key.salary_component,
                remaining_accrued = %remaining,
                paid = %balances.paid,
                "Salary slip cancel refused, accruals already paid out"
            );
            return Err(EngineError::InvalidTransition {
                id: slip.id.clone(),
                action: "cancel",
                status: format!(
                    "submitted, {} paid out against its {} accrual",
                    balances.paid, key.salary_component
                ),
            });
        }
        Ok(())
    }
}
