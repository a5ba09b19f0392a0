//! Payroll correction lifecycle.
//!
//! A correction reverses leave-without-pay days of a processed slip. It is
//! validated against the running total of days already reversed for that
//! slip, then submitted: earning and deduction arrears become compensation
//! instructions, accrual arrears are posted to the benefit ledger.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{build_arrear_breakup, validate_reversible_days};
use crate::config::ArrearComponent;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdditionalSalary, AuditStep, BalanceKey, DocStatus, EntryId, NewLedgerEntry, PayrollCorrection,
    PayrollCorrectionRequest, SalarySlip, TransactionType,
};
use crate::store::{
    ComponentConfigLookup, CorrectionStore, LedgerStore, PayrollPeriodResolver, SalarySlipStore,
};

use super::locks::KeyedLocks;
use super::salary_slips::SALARY_SLIP_DOCTYPE;

pub use crate::models::CORRECTION_DOCTYPE;

/// The outcome of submitting a correction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionPosting {
    /// The correction, now submitted.
    pub correction: PayrollCorrection,
    /// One instruction per earning and deduction arrear.
    pub additional_salaries: Vec<AdditionalSalary>,
    /// Accrual entries posted for accrual arrears.
    pub ledger_entries: Vec<EntryId>,
    /// Audit steps from the final validation.
    pub audit_steps: Vec<AuditStep>,
}

/// Validates, submits and cancels payroll corrections.
pub struct PayrollCorrectionService {
    ledger: Arc<dyn LedgerStore>,
    slips: Arc<dyn SalarySlipStore>,
    corrections: Arc<dyn CorrectionStore>,
    components: Arc<dyn ComponentConfigLookup>,
    periods: Arc<dyn PayrollPeriodResolver>,
    arrear_components: Vec<ArrearComponent>,
    locks: Arc<KeyedLocks<BalanceKey>>,
    slip_locks: Arc<KeyedLocks<String>>,
    precision: u32,
}

impl PayrollCorrectionService {
    /// Creates a correction service over the given collaborators.
    ///
    /// `slip_locks` must be shared with the salary slip service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ledger: Arc<dyn LedgerStore>,
        slips: Arc<dyn SalarySlipStore>,
        corrections: Arc<dyn CorrectionStore>,
        components: Arc<dyn ComponentConfigLookup>,
        periods: Arc<dyn PayrollPeriodResolver>,
        arrear_components: Vec<ArrearComponent>,
        locks: Arc<KeyedLocks<BalanceKey>>,
        slip_locks: Arc<KeyedLocks<String>>,
        precision: u32,
    ) -> Self {
        Self {
            ledger,
            slips,
            corrections,
            components,
            periods,
            arrear_components,
            locks,
            slip_locks,
            precision,
        }
    }

    /// Returns a correction by identifier.
    pub fn get(&self, id: Uuid) -> Option<PayrollCorrection> {
        self.corrections.get(id)
    }

    /// Validates a correction, fills in its arrear breakup and stores it as
    /// `Validated`.
    pub fn validate(&self, correction: &mut PayrollCorrection) -> EngineResult<Vec<AuditStep>> {
        let audit_steps = self.mark_validated(correction)?;
        self.corrections.save(correction.clone());
        Ok(audit_steps)
    }

    /// Submits a validated correction.
    ///
    /// The running total is re-checked while holding the slip's lock, so two
    /// corrections of one slip cannot both reverse its last day.
    pub fn submit(&self, correction: &mut PayrollCorrection) -> EngineResult<CorrectionPosting> {
        if !correction.status.can_submit() {
            return Err(invalid_transition(correction, "submit"));
        }
        let slip_id = correction.salary_slip_reference.clone();
        self.slip_locks.with_lock(&slip_id, || {
            let slip = self.load_slip(correction)?;
            let audit_steps = self.check(correction, &slip)?;
            let ledger_entries = self.post_accrual_arrears(correction, &slip)?;

            let additional_salaries: Vec<AdditionalSalary> = correction
                .earning_arrears
                .iter()
                .chain(&correction.deduction_arrears)
                .filter(|a| !a.amount.is_zero())
                .map(|a| AdditionalSalary {
                    employee: correction.employee.clone(),
                    salary_component: a.salary_component.clone(),
                    payroll_date: correction.additional_salary_date,
                    amount: a.amount,
                    ref_doctype: CORRECTION_DOCTYPE.to_string(),
                    ref_docname: correction.id.to_string(),
                })
                .collect();

            correction.status = DocStatus::Submitted;
            self.corrections.save(correction.clone());

            info!(
                correction_id = %correction.id,
                employee = %correction.employee,
                salary_slip = %slip.id,
                days_to_reverse = %correction.days_to_reverse,
                additional_salaries = additional_salaries.len(),
                accrual_entries = ledger_entries.len(),
                "Payroll correction submitted"
            );

            Ok(CorrectionPosting {
                correction: correction.clone(),
                additional_salaries,
                ledger_entries,
                audit_steps,
            })
        })
    }

    /// Creates a correction from a request, validates it and submits it.
    pub fn submit_request(
        &self,
        request: PayrollCorrectionRequest,
    ) -> EngineResult<CorrectionPosting> {
        let mut correction = PayrollCorrection::new(request);
        self.mark_validated(&mut correction)?;
        self.submit(&mut correction)
    }

    /// Cancels a submitted correction, removing its accrual arrears from the
    /// ledger. Its reversed days become available again.
    pub fn cancel(&self, id: Uuid) -> EngineResult<PayrollCorrection> {
        let mut correction =
            self.corrections
                .get(id)
                .ok_or_else(|| EngineError::DocumentNotFound {
                    kind: CORRECTION_DOCTYPE,
                    id: id.to_string(),
                })?;
        if !correction.status.can_cancel() {
            return Err(invalid_transition(&correction, "cancel"));
        }

        let period = correction.payroll_period.clone().unwrap_or_default();
        let keys: Vec<BalanceKey> = correction
            .accrual_arrears
            .iter()
            .map(|a| BalanceKey::new(&correction.employee, &a.salary_component, &period))
            .collect();

        let removed = self
            .slip_locks
            .with_lock(&correction.salary_slip_reference.clone(), || {
                self.locks.with_locks(&keys, || {
                    let removed = self
                        .ledger
                        .delete_by_source_reference(&correction.source_reference());
                    correction.status = DocStatus::Cancelled;
                    self.corrections.save(correction.clone());
                    removed
                })
            });

        info!(
            correction_id = %correction.id,
            employee = %correction.employee,
            entries_removed = removed,
            "Payroll correction cancelled"
        );
        Ok(correction)
    }

    fn mark_validated(&self, correction: &mut PayrollCorrection) -> EngineResult<Vec<AuditStep>> {
        if !correction.status.can_validate() {
            return Err(invalid_transition(correction, "validate"));
        }
        let slip_id = correction.salary_slip_reference.clone();
        let audit_steps = self.slip_locks.with_lock(&slip_id, || {
            let slip = self.load_slip(correction)?;
            self.check(correction, &slip)
        })?;

        correction.status = DocStatus::Validated;
        Ok(audit_steps)
    }

    fn load_slip(&self, correction: &PayrollCorrection) -> EngineResult<SalarySlip> {
        self.slips
            .get(&correction.salary_slip_reference)
            .filter(|slip| slip.employee == correction.employee)
            .ok_or_else(|| EngineError::DocumentNotFound {
                kind: SALARY_SLIP_DOCTYPE,
                id: correction.salary_slip_reference.clone(),
            })
    }

    /// Applies the running-total guard and rebuilds the arrear breakup.
    /// Callers must hold the slip's lock.
    fn check(
        &self,
        correction: &mut PayrollCorrection,
        slip: &SalarySlip,
    ) -> EngineResult<Vec<AuditStep>> {
        let already_reversed: Decimal = self
            .corrections
            .submitted_for_slip(&correction.employee, &slip.id)
            .iter()
            .filter(|c| c.id != correction.id)
            .map(|c| c.days_to_reverse)
            .sum();

        let reversible = slip.reversible_days()?;
        validate_reversible_days(correction.days_to_reverse, already_reversed, reversible)
            .inspect_err(|err| {
                warn!(
                    correction_id = %correction.id,
                    employee = %correction.employee,
                    salary_slip = %slip.id,
                    error = %err,
                    "Payroll correction rejected"
                );
            })?;

        let period = self.periods.resolve_period(slip.posting_date)?;
        let breakup = build_arrear_breakup(
            slip,
            &self.arrear_components,
            correction.days_to_reverse,
            self.precision,
            1,
        )?;

        correction.payroll_period = Some(period.name);
        correction.working_days = slip.total_working_days;
        correction.total_lwp_applied = reversible;
        correction.earning_arrears = breakup.earning_arrears;
        correction.deduction_arrears = breakup.deduction_arrears;
        correction.accrual_arrears = breakup.accrual_arrears;
        Ok(breakup.audit_steps)
    }

    /// Posts one accrual per non-zero accrual arrear, dated at the arrear
    /// payment date and booked to the slip's payroll period.
    fn post_accrual_arrears(
        &self,
        correction: &PayrollCorrection,
        slip: &SalarySlip,
    ) -> EngineResult<Vec<EntryId>> {
        let period = correction.payroll_period.clone().unwrap_or_default();
        let mut pending = Vec::new();
        for arrear in correction.accrual_arrears.iter().filter(|a| !a.amount.is_zero()) {
            let config = self.components.get_config(&arrear.salary_component)?;
            let yearly_benefit = slip
                .benefit_accruals
                .iter()
                .find(|a| a.salary_component == arrear.salary_component)
                .and_then(|a| a.yearly_benefit)
                .filter(|b| !b.is_zero())
                .unwrap_or(config.period_limit_amount);
            pending.push(NewLedgerEntry {
                employee: correction.employee.clone(),
                salary_component: arrear.salary_component.clone(),
                payroll_period: period.clone(),
                transaction_type: TransactionType::Accrual,
                amount: arrear.amount,
                posting_date: correction.additional_salary_date,
                yearly_benefit,
                source_reference: correction.source_reference(),
            });
        }

        let keys: Vec<BalanceKey> = pending.iter().map(NewLedgerEntry::key).collect();
        self.locks.with_locks(&keys, || {
            let mut ids = Vec::with_capacity(pending.len());
            for entry in pending {
                match self.ledger.append(entry) {
                    Ok(id) => ids.push(id),
                    Err(err) => {
                        self.ledger
                            .delete_by_source_reference(&correction.source_reference());
                        return Err(err);
                    }
                }
            }
            Ok(ids)
        })
    }
}

fn invalid_transition(correction: &PayrollCorrection, action: &'static str) -> EngineError {
    EngineError::InvalidTransition {
        id: correction.id.to_string(),
        action,
        status: correction.status.to_string(),
    }
}
