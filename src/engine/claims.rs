//! Benefit claim lifecycle.
//!
//! [`BenefitClaimService`] moves claims through `Draft -> Validated ->
//! Submitted -> Cancelled`. Validation and posting for one balance key run
//! under that key's lock, so a submission always sees every payout posted
//! before it.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{aggregate_entries, calculate_max_claim_eligible, validate_claim};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdditionalSalary, AuditStep, BalanceKey, BenefitClaim, BenefitComponentConfig, ClaimRequest,
    DocStatus, EntryId, LedgerEntry, NewLedgerEntry, PayoutMethod, TransactionType,
};
use crate::store::{ClaimStore, ComponentConfigLookup, LedgerStore, PayrollPeriodResolver};

use super::locks::KeyedLocks;

pub use crate::models::CLAIM_DOCTYPE;

/// Current benefit position of an employee for one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitDetails {
    /// The employee.
    pub employee: String,
    /// The benefit salary component.
    pub salary_component: String,
    /// The payroll period resolved from the requested date.
    pub payroll_period: String,
    /// How the component pays out.
    pub payout_method: PayoutMethod,
    /// The yearly entitlement: the latest ledger snapshot, else the
    /// component's period limit.
    pub yearly_benefit: Decimal,
    /// Total accrued in the period.
    pub accrued_benefit: Decimal,
    /// Total paid in the period.
    pub paid_benefit: Decimal,
    /// The maximum amount currently claimable.
    pub max_amount_eligible: Decimal,
}

/// The outcome of submitting a claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedClaim {
    /// The claim, now submitted.
    pub claim: BenefitClaim,
    /// The payout entry posted to the ledger.
    pub entry_id: EntryId,
    /// The instruction handed to the compensation poster.
    pub additional_salary: AdditionalSalary,
    /// Audit steps from the final validation.
    pub audit_steps: Vec<AuditStep>,
}

/// Validates, submits and cancels benefit claims.
pub struct BenefitClaimService {
    ledger: Arc<dyn LedgerStore>,
    claims: Arc<dyn ClaimStore>,
    components: Arc<dyn ComponentConfigLookup>,
    periods: Arc<dyn PayrollPeriodResolver>,
    locks: Arc<KeyedLocks<BalanceKey>>,
    precision: u32,
}

impl BenefitClaimService {
    /// Creates a claim service over the given collaborators.
    ///
    /// `locks` should be shared with every other service that posts to or
    /// deletes from the same ledger.
    pub fn new(
        ledger: Arc<dyn LedgerStore>,
        claims: Arc<dyn ClaimStore>,
        components: Arc<dyn ComponentConfigLookup>,
        periods: Arc<dyn PayrollPeriodResolver>,
        locks: Arc<KeyedLocks<BalanceKey>>,
        precision: u32,
    ) -> Self {
        Self {
            ledger,
            claims,
            components,
            periods,
            locks,
            precision,
        }
    }

    /// Returns a claim by identifier.
    pub fn get(&self, id: Uuid) -> Option<BenefitClaim> {
        self.claims.get(id)
    }

    /// Reports the accrued, paid and claimable amounts of a component for
    /// the payroll period containing `payroll_date`.
    pub fn benefit_details(
        &self,
        employee: &str,
        salary_component: &str,
        payroll_date: NaiveDate,
        accrual_preview: Decimal,
    ) -> EngineResult<BenefitDetails> {
        let period = self.periods.resolve_period(payroll_date)?;
        let config = self.components.get_config(salary_component)?;
        let key = BalanceKey::new(employee, salary_component, period.name);

        let entries = self.ledger.query(&key);
        let balances = aggregate_entries(&entries)?;
        let eligibility = calculate_max_claim_eligible(
            &key,
            &balances,
            &config,
            accrual_preview,
            self.precision,
            1,
        )?;

        Ok(BenefitDetails {
            yearly_benefit: current_yearly_benefit(&entries, &config),
            payout_method: config.payout_method,
            accrued_benefit: balances.accrued,
            paid_benefit: balances.paid,
            max_amount_eligible: eligibility.eligible,
            employee: key.employee,
            salary_component: key.salary_component,
            payroll_period: key.payroll_period,
        })
    }

    /// Validates a draft or previously validated claim and stores it as
    /// `Validated`.
    ///
    /// On failure the claim is left untouched and nothing is stored.
    pub fn validate(
        &self,
        claim: &mut BenefitClaim,
        processing_date: NaiveDate,
    ) -> EngineResult<Vec<AuditStep>> {
        let audit_steps = self.mark_validated(claim, processing_date)?;
        self.claims.save(claim.clone());
        Ok(audit_steps)
    }

    /// Submits a validated claim: re-validates it against the current
    /// ledger and posts the payout, all under the balance key's lock.
    pub fn submit(
        &self,
        claim: &mut BenefitClaim,
        processing_date: NaiveDate,
    ) -> EngineResult<SubmittedClaim> {
        if !claim.status.can_submit() {
            return Err(invalid_transition(claim, "submit"));
        }
        let (key, config) = self.resolve(claim)?;

        self.locks.with_lock(&key, || {
            let audit_steps = self.check(claim, &key, &config, processing_date)?;
            let entries = self.ledger.query(&key);

            let entry_id = self.ledger.append(NewLedgerEntry {
                employee: claim.employee.clone(),
                salary_component: claim.salary_component.clone(),
                payroll_period: key.payroll_period.clone(),
                transaction_type: TransactionType::Payout,
                amount: claim.claimed_amount,
                posting_date: claim.payroll_date,
                yearly_benefit: current_yearly_benefit(&entries, &config),
                source_reference: claim.source_reference(),
            })?;

            claim.status = DocStatus::Submitted;
            self.claims.save(claim.clone());

            info!(
                claim_id = %claim.id,
                employee = %claim.employee,
                salary_component = %claim.salary_component,
                payroll_period = %key.payroll_period,
                claimed_amount = %claim.claimed_amount,
                "Benefit claim submitted"
            );

            Ok(SubmittedClaim {
                additional_salary: AdditionalSalary {
                    employee: claim.employee.clone(),
                    salary_component: claim.salary_component.clone(),
                    payroll_date: claim.payroll_date,
                    amount: claim.claimed_amount,
                    ref_doctype: CLAIM_DOCTYPE.to_string(),
                    ref_docname: claim.id.to_string(),
                },
                claim: claim.clone(),
                entry_id,
                audit_steps,
            })
        })
    }

    /// Creates a claim from a request, validates it and submits it.
    ///
    /// The claim is only stored once submitted; a rejected request leaves
    /// nothing behind.
    pub fn submit_request(
        &self,
        request: ClaimRequest,
        processing_date: NaiveDate,
    ) -> EngineResult<SubmittedClaim> {
        let mut claim = BenefitClaim::new(request);
        self.mark_validated(&mut claim, processing_date)?;
        self.submit(&mut claim, processing_date)
    }

    /// Cancels a submitted claim and removes its payout from the ledger.
    pub fn cancel(&self, claim_id: Uuid) -> EngineResult<BenefitClaim> {
        let mut claim = self
            .claims
            .get(claim_id)
            .ok_or_else(|| EngineError::DocumentNotFound {
                kind: CLAIM_DOCTYPE,
                id: claim_id.to_string(),
            })?;
        if !claim.status.can_cancel() {
            return Err(invalid_transition(&claim, "cancel"));
        }

        let key = BalanceKey::new(
            &claim.employee,
            &claim.salary_component,
            claim.payroll_period.clone().unwrap_or_default(),
        );
        let removed = self.locks.with_lock(&key, || {
            let removed = self.ledger.delete_by_source_reference(&claim.source_reference());
            claim.status = DocStatus::Cancelled;
            self.claims.save(claim.clone());
            removed
        });

        info!(
            claim_id = %claim.id,
            employee = %claim.employee,
            entries_removed = removed,
            "Benefit claim cancelled"
        );
        Ok(claim)
    }

    fn mark_validated(
        &self,
        claim: &mut BenefitClaim,
        processing_date: NaiveDate,
    ) -> EngineResult<Vec<AuditStep>> {
        if !claim.status.can_validate() {
            return Err(invalid_transition(claim, "validate"));
        }
        let (key, config) = self.resolve(claim)?;

        let audit_steps = self.locks.with_lock(&key, || {
            self.check(claim, &key, &config, processing_date)
        })?;

        claim.status = DocStatus::Validated;
        Ok(audit_steps)
    }

    fn resolve(&self, claim: &BenefitClaim) -> EngineResult<(BalanceKey, BenefitComponentConfig)> {
        let period = self.periods.resolve_period(claim.payroll_date)?;
        let config = self.components.get_config(&claim.salary_component)?;
        Ok((
            BalanceKey::new(&claim.employee, &claim.salary_component, period.name),
            config,
        ))
    }

    /// Aggregates, computes eligibility and applies the claim rules. Callers
    /// must hold the lock for `key`.
    fn check(
        &self,
        claim: &mut BenefitClaim,
        key: &BalanceKey,
        config: &BenefitComponentConfig,
        processing_date: NaiveDate,
    ) -> EngineResult<Vec<AuditStep>> {
        let balances = aggregate_entries(&self.ledger.query(key))?;
        let eligibility = calculate_max_claim_eligible(
            key,
            &balances,
            config,
            claim.accrual_preview(),
            self.precision,
            1,
        )?;

        let submitted = self
            .claims
            .submitted_claims(&claim.employee, &claim.salary_component);
        let validation_step =
            validate_claim(claim, eligibility.eligible, &submitted, processing_date, 2).inspect_err(
                |err| {
                    warn!(
                        claim_id = %claim.id,
                        employee = %claim.employee,
                        salary_component = %claim.salary_component,
                        error = %err,
                        "Benefit claim rejected"
                    );
                },
            )?;

        claim.payroll_period = Some(key.payroll_period.clone());
        claim.max_amount_eligible = Some(eligibility.eligible);
        Ok(vec![eligibility.audit_step, validation_step])
    }
}

/// The yearly benefit in force: the snapshot on the latest entry by posting
/// date, else the component's period limit.
fn current_yearly_benefit(entries: &[LedgerEntry], config: &BenefitComponentConfig) -> Decimal {
    entries
        .iter()
        .max_by_key(|e| e.posting_date)
        .map(|e| e.yearly_benefit)
        .filter(|b| !b.is_zero())
        .unwrap_or(config.period_limit_amount)
}

fn invalid_transition(claim: &BenefitClaim, action: &'static str) -> EngineError {
    EngineError::InvalidTransition {
        id: claim.id.to_string(),
        action,
        status: claim.status.to_string(),
    }
}
