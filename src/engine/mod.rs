//! Document lifecycle services over the benefit ledger.
//!
//! [`BenefitEngine`] wires the stores, configuration and per-key locks
//! together and hands out one service per document type:
//!
//! - [`BenefitClaimService`] for employee benefit claims
//! - [`SalarySlipService`] for the accruals posted by payroll runs
//! - [`PayrollCorrectionService`] for leave-without-pay reversals
//!
//! All services share one [`KeyedLocks`] over [`BalanceKey`], so every
//! post or delete against a balance is serialized with claim validation.

mod claims;
mod corrections;
mod locks;
mod salary_slips;

use std::sync::Arc;

use crate::calculation::{BenefitBalances, aggregate_balances};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::BalanceKey;
use crate::store::{
    ClaimStore, ComponentConfigLookup, CorrectionStore, InMemoryClaimStore,
    InMemoryCorrectionStore, InMemoryLedgerStore, InMemorySalarySlipStore, LedgerStore,
    PayrollPeriodResolver, SalarySlipStore,
};

pub use claims::{BenefitClaimService, BenefitDetails, CLAIM_DOCTYPE, SubmittedClaim};
pub use corrections::{CORRECTION_DOCTYPE, CorrectionPosting, PayrollCorrectionService};
pub use locks::KeyedLocks;
pub use salary_slips::{SALARY_SLIP_DOCTYPE, SalarySlipService};

/// The benefit ledger engine.
///
/// # Example
///
/// ```no_run
/// use benefit_ledger::config::ConfigLoader;
/// use benefit_ledger::engine::BenefitEngine;
/// use benefit_ledger::models::ClaimRequest;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let engine = BenefitEngine::in_memory(ConfigLoader::load("./config/default")?);
/// let processing_date = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
///
/// let result = engine.claims().submit_request(
///     ClaimRequest {
///         employee: "EMP-0001".to_string(),
///         salary_component: "Leave Travel Allowance".to_string(),
///         payroll_date: NaiveDate::from_ymd_opt(2026, 10, 31).unwrap(),
///         claimed_amount: Decimal::new(1500, 0),
///         current_cycle_accrual_preview: None,
///     },
///     processing_date,
/// )?;
/// println!("Posted payout {}", result.entry_id);
/// # Ok::<(), benefit_ledger::error::EngineError>(())
/// ```
pub struct BenefitEngine {
    ledger: Arc<dyn LedgerStore>,
    claims: BenefitClaimService,
    salary_slips: SalarySlipService,
    corrections: PayrollCorrectionService,
}

impl BenefitEngine {
    /// Creates an engine backed by in-memory stores.
    pub fn in_memory(config: ConfigLoader) -> Self {
        Self::with_stores(
            config,
            Arc::new(InMemoryLedgerStore::new()),
            Arc::new(InMemoryClaimStore::new()),
            Arc::new(InMemorySalarySlipStore::new()),
            Arc::new(InMemoryCorrectionStore::new()),
        )
    }

    /// Creates an engine over the given stores. The configuration serves as
    /// both the component lookup and the payroll period resolver.
    pub fn with_stores(
        config: ConfigLoader,
        ledger: Arc<dyn LedgerStore>,
        claims: Arc<dyn ClaimStore>,
        slips: Arc<dyn SalarySlipStore>,
        corrections: Arc<dyn CorrectionStore>,
    ) -> Self {
        let precision = config.precision();
        let arrear_components = config.arrear_components().to_vec();
        let config = Arc::new(config);
        let components: Arc<dyn ComponentConfigLookup> = config.clone();
        let periods: Arc<dyn PayrollPeriodResolver> = config;
        let locks = Arc::new(KeyedLocks::new());
        let slip_locks = Arc::new(KeyedLocks::new());

        Self {
            claims: BenefitClaimService::new(
                Arc::clone(&ledger),
                claims,
                Arc::clone(&components),
                Arc::clone(&periods),
                Arc::clone(&locks),
                precision,
            ),
            salary_slips: SalarySlipService::new(
                Arc::clone(&ledger),
                Arc::clone(&slips),
                Arc::clone(&corrections),
                Arc::clone(&components),
                Arc::clone(&periods),
                Arc::clone(&locks),
                Arc::clone(&slip_locks),
            ),
            corrections: PayrollCorrectionService::new(
                Arc::clone(&ledger),
                slips,
                corrections,
                components,
                periods,
                arrear_components,
                locks,
                slip_locks,
                precision,
            ),
            ledger,
        }
    }

    /// The benefit claim service.
    pub fn claims(&self) -> &BenefitClaimService {
        &self.claims
    }

    /// The salary slip service.
    pub fn salary_slips(&self) -> &SalarySlipService {
        &self.salary_slips
    }

    /// The payroll correction service.
    pub fn corrections(&self) -> &PayrollCorrectionService {
        &self.corrections
    }

    /// Current accrued and paid totals for a balance key.
    pub fn balances(&self, key: &BalanceKey) -> EngineResult<BenefitBalances> {
        aggregate_balances(self.ledger.as_ref(), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{
        BenefitAccrual, ClaimRequest, DocStatus, EntryId, LedgerEntry, NewLedgerEntry,
        PayrollCorrectionRequest, SalaryDetail, SalarySlip, TransactionType,
    };
    use std::sync::Barrier;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::thread;

    const MEDICAL: &str = "Medical Allowance";
    const LTA: &str = "Leave Travel Allowance";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_engine() -> BenefitEngine {
        BenefitEngine::in_memory(ConfigLoader::load("./config/default").unwrap())
    }

    fn medical_key() -> BalanceKey {
        BalanceKey::new("EMP-0001", MEDICAL, "FY 2026")
    }

    fn create_slip(id: &str, posting_date: NaiveDate, accrual: &str) -> SalarySlip {
        SalarySlip {
            id: id.to_string(),
            employee: "EMP-0001".to_string(),
            posting_date,
            total_working_days: dec("27"),
            absent_days: Decimal::ZERO,
            leave_without_pay: dec("2"),
            earnings: vec![SalaryDetail {
                salary_component: "Basic Salary".to_string(),
                amount: dec("65000"),
            }],
            deductions: Vec::new(),
            benefit_accruals: vec![BenefitAccrual {
                salary_component: MEDICAL.to_string(),
                amount: dec(accrual),
                yearly_benefit: None,
            }],
        }
    }

    fn claim(component: &str, payroll_date: NaiveDate, amount: &str) -> ClaimRequest {
        ClaimRequest {
            employee: "EMP-0001".to_string(),
            salary_component: component.to_string(),
            payroll_date,
            claimed_amount: dec(amount),
            current_cycle_accrual_preview: None,
        }
    }

    fn correction(slip: &str, days: &str) -> PayrollCorrectionRequest {
        PayrollCorrectionRequest {
            employee: "EMP-0001".to_string(),
            salary_slip_reference: slip.to_string(),
            days_to_reverse: dec(days),
            additional_salary_date: date(2026, 5, 31),
        }
    }

    #[test]
    fn test_claim_up_to_accrued_balance() {
        let engine = create_engine();
        let processing_date = date(2026, 9, 1);
        engine
            .salary_slips()
            .submit(create_slip("slip-1", date(2026, 9, 30), "1200"))
            .unwrap();
        engine
            .claims()
            .submit_request(claim(MEDICAL, date(2026, 9, 30), "300"), processing_date)
            .unwrap();

        let details = engine
            .claims()
            .benefit_details("EMP-0001", MEDICAL, date(2026, 10, 31), Decimal::ZERO)
            .unwrap();
        assert_eq!(details.accrued_benefit, dec("1200"));
        assert_eq!(details.paid_benefit, dec("300"));
        assert_eq!(details.max_amount_eligible, dec("900"));
        assert_eq!(details.yearly_benefit, dec("24000"));

        let result = engine
            .claims()
            .submit_request(claim(MEDICAL, date(2026, 10, 31), "900"), processing_date)
            .unwrap();
        assert_eq!(result.claim.status, DocStatus::Submitted);
        assert_eq!(result.claim.max_amount_eligible, Some(dec("900")));
        assert_eq!(result.additional_salary.ref_doctype, CLAIM_DOCTYPE);
        assert_eq!(result.additional_salary.amount, dec("900"));

        let balances = engine.balances(&medical_key()).unwrap();
        assert_eq!(balances.paid, dec("1200"));
        let details = engine
            .claims()
            .benefit_details("EMP-0001", MEDICAL, date(2026, 11, 30), Decimal::ZERO)
            .unwrap();
        assert_eq!(details.max_amount_eligible, Decimal::ZERO);
    }

    #[test]
    fn test_full_period_limit_exhausted() {
        let engine = create_engine();
        let processing_date = date(2026, 4, 1);
        engine
            .claims()
            .submit_request(claim(LTA, date(2026, 4, 30), "5000"), processing_date)
            .unwrap();

        let err = engine
            .claims()
            .submit_request(claim(LTA, date(2026, 5, 31), "1"), processing_date)
            .unwrap_err();
        match err {
            EngineError::ExceedsEligibleAmount {
                claimed, eligible, ..
            } => {
                assert_eq!(claimed, dec("1"));
                assert_eq!(eligible, Decimal::ZERO);
            }
            other => panic!("expected ExceedsEligibleAmount, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_claim_in_same_month() {
        let engine = create_engine();
        let processing_date = date(2026, 4, 1);
        let first = engine
            .claims()
            .submit_request(claim(LTA, date(2026, 6, 10), "100"), processing_date)
            .unwrap();

        let err = engine
            .claims()
            .submit_request(claim(LTA, date(2026, 6, 25), "100"), processing_date)
            .unwrap_err();
        match err {
            EngineError::DuplicateClaim {
                conflicting_claim,
                year,
                month,
                ..
            } => {
                assert_eq!(conflicting_claim, first.claim.id.to_string());
                assert_eq!((year, month), (2026, 6));
            }
            other => panic!("expected DuplicateClaim, got {other:?}"),
        }

        assert!(
            engine
                .claims()
                .submit_request(claim(LTA, date(2026, 7, 1), "100"), processing_date)
                .is_ok()
        );
    }

    #[test]
    fn test_cancelled_claim_frees_month_and_balance() {
        let engine = create_engine();
        let processing_date = date(2026, 4, 1);
        let first = engine
            .claims()
            .submit_request(claim(LTA, date(2026, 6, 10), "5000"), processing_date)
            .unwrap();

        let cancelled = engine.claims().cancel(first.claim.id).unwrap();
        assert_eq!(cancelled.status, DocStatus::Cancelled);
        assert_eq!(
            engine.balances(&BalanceKey::new("EMP-0001", LTA, "FY 2026")).unwrap(),
            BenefitBalances::default()
        );

        assert!(
            engine
                .claims()
                .submit_request(claim(LTA, date(2026, 6, 20), "5000"), processing_date)
                .is_ok()
        );

        let err = engine.claims().cancel(first.claim.id).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
    }

    #[test]
    fn test_retroactive_claim_rejected() {
        let engine = create_engine();
        let err = engine
            .claims()
            .submit_request(claim(LTA, date(2026, 4, 30), "100"), date(2026, 5, 1))
            .unwrap_err();
        assert!(matches!(err, EngineError::RetroactiveClaim { .. }));
    }

    #[test]
    fn test_claim_outside_any_period() {
        let engine = create_engine();
        let err = engine
            .claims()
            .submit_request(claim(LTA, date(2030, 1, 31), "100"), date(2026, 5, 1))
            .unwrap_err();
        assert!(matches!(err, EngineError::NoActivePeriod { .. }));
    }

    #[test]
    fn test_submit_requires_validation() {
        let engine = create_engine();
        let mut draft = crate::models::BenefitClaim::new(claim(LTA, date(2026, 6, 10), "100"));
        let err = engine
            .claims()
            .submit(&mut draft, date(2026, 4, 1))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
        assert!(engine.claims().get(draft.id).is_none());
    }

    #[test]
    fn test_slip_cancel_and_resubmit_restores_balances() {
        let engine = create_engine();
        let slip = create_slip("slip-1", date(2026, 4, 30), "2000");
        engine.salary_slips().submit(slip.clone()).unwrap();
        engine
            .salary_slips()
            .submit(create_slip("slip-2", date(2026, 5, 31), "2000"))
            .unwrap();
        let before = engine.balances(&medical_key()).unwrap();

        assert_eq!(engine.salary_slips().cancel("slip-1").unwrap(), 1);
        assert_eq!(engine.balances(&medical_key()).unwrap().accrued, dec("2000"));

        engine.salary_slips().submit(slip).unwrap();
        assert_eq!(engine.balances(&medical_key()).unwrap(), before);
    }

    #[test]
    fn test_slip_submitted_twice_rejected() {
        let engine = create_engine();
        let slip = create_slip("slip-1", date(2026, 4, 30), "2000");
        engine.salary_slips().submit(slip.clone()).unwrap();
        let err = engine.salary_slips().submit(slip).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
        assert_eq!(engine.balances(&medical_key()).unwrap().accrued, dec("2000"));
    }

    #[test]
    fn test_slip_with_unknown_component_posts_nothing() {
        let engine = create_engine();
        let mut slip = create_slip("slip-1", date(2026, 4, 30), "2000");
        slip.benefit_accruals.push(BenefitAccrual {
            salary_component: "Gym Allowance".to_string(),
            amount: dec("500"),
            yearly_benefit: None,
        });

        let err = engine.salary_slips().submit(slip).unwrap_err();
        assert!(matches!(err, EngineError::ComponentNotFound { .. }));
        assert_eq!(engine.balances(&medical_key()).unwrap(), BenefitBalances::default());
        assert!(engine.salary_slips().get("slip-1").is_none());
    }

    #[test]
    fn test_cancel_unknown_slip() {
        let engine = create_engine();
        let err = engine.salary_slips().cancel("missing").unwrap_err();
        assert!(matches!(
            err,
            EngineError::DocumentNotFound {
                kind: SALARY_SLIP_DOCTYPE,
                ..
            }
        ));
    }

    #[test]
    fn test_correction_posts_arrears() {
        let engine = create_engine();
        engine
            .salary_slips()
            .submit(create_slip("slip-1", date(2026, 4, 30), "2000"))
            .unwrap();

        let posting = engine
            .corrections()
            .submit_request(correction("slip-1", "1"))
            .unwrap();

        assert_eq!(posting.correction.status, DocStatus::Submitted);
        assert_eq!(posting.correction.payroll_period.as_deref(), Some("FY 2026"));
        assert_eq!(posting.correction.total_lwp_applied, dec("2"));
        assert_eq!(posting.additional_salaries.len(), 1);
        assert_eq!(
            posting.additional_salaries[0].salary_component,
            "Arrear Basic Salary"
        );
        assert_eq!(posting.additional_salaries[0].amount, dec("2407.41"));
        assert_eq!(posting.additional_salaries[0].ref_doctype, CORRECTION_DOCTYPE);
        assert_eq!(posting.ledger_entries.len(), 1);
        assert_eq!(engine.balances(&medical_key()).unwrap().accrued, dec("2074.07"));
    }

    #[test]
    fn test_correction_running_total_guard() {
        let engine = create_engine();
        engine
            .salary_slips()
            .submit(create_slip("slip-1", date(2026, 4, 30), "2000"))
            .unwrap();

        let first = engine
            .corrections()
            .submit_request(correction("slip-1", "1.5"))
            .unwrap();
        let err = engine
            .corrections()
            .submit_request(correction("slip-1", "1"))
            .unwrap_err();
        match err {
            EngineError::ExceedsReversibleDays {
                requested,
                already_reversed,
                reversible,
            } => {
                assert_eq!(requested, dec("1"));
                assert_eq!(already_reversed, dec("1.5"));
                assert_eq!(reversible, dec("2"));
            }
            other => panic!("expected ExceedsReversibleDays, got {other:?}"),
        }

        engine.corrections().cancel(first.correction.id).unwrap();
        assert_eq!(engine.balances(&medical_key()).unwrap().accrued, dec("2000"));
        assert!(
            engine
                .corrections()
                .submit_request(correction("slip-1", "2"))
                .is_ok()
        );
    }

    #[test]
    fn test_correction_zero_working_days() {
        let engine = create_engine();
        let mut slip = create_slip("slip-1", date(2026, 4, 30), "2000");
        slip.total_working_days = Decimal::ZERO;
        slip.earnings[0].amount = dec("2700");
        engine.salary_slips().submit(slip).unwrap();

        let posting = engine
            .corrections()
            .submit_request(correction("slip-1", "1"))
            .unwrap();
        assert_eq!(posting.additional_salaries[0].amount, dec("2700"));
    }

    #[test]
    fn test_correction_for_unknown_slip() {
        let engine = create_engine();
        let err = engine
            .corrections()
            .submit_request(correction("missing", "1"))
            .unwrap_err();
        assert!(matches!(err, EngineError::DocumentNotFound { .. }));
    }

    #[test]
    fn test_concurrent_claims_serialize() {
        let engine = create_engine();
        let processing_date = date(2026, 4, 1);
        engine
            .salary_slips()
            .submit(create_slip("slip-1", date(2026, 4, 30), "1000"))
            .unwrap();

        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = [date(2026, 10, 31), date(2026, 11, 30)]
                .into_iter()
                .map(|payroll_date| {
                    let engine = &engine;
                    s.spawn(move || {
                        engine
                            .claims()
                            .submit_request(claim(MEDICAL, payroll_date, "600"), processing_date)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(succeeded, 1);
        let rejected = results.into_iter().find_map(Result::err).unwrap();
        match rejected {
            EngineError::ExceedsEligibleAmount { eligible, .. } => {
                assert_eq!(eligible, dec("400"));
            }
            other => panic!("expected ExceedsEligibleAmount, got {other:?}"),
        }
        assert_eq!(engine.balances(&medical_key()).unwrap().paid, dec("600"));
    }

    /// A ledger that accepts accruals but rejects every payout.
    struct ClosedForPayouts(InMemoryLedgerStore);

    impl LedgerStore for ClosedForPayouts {
        fn append(&self, entry: NewLedgerEntry) -> EngineResult<EntryId> {
            if entry.transaction_type == TransactionType::Payout {
                return Err(EngineError::InvalidLedgerEntry {
                    message: "payouts are closed".to_string(),
                });
            }
            self.0.append(entry)
        }

        fn query(&self, key: &BalanceKey) -> Vec<LedgerEntry> {
            self.0.query(key)
        }

        fn delete_by_source_reference(&self, source_reference: &str) -> usize {
            self.0.delete_by_source_reference(source_reference)
        }
    }

    #[test]
    fn test_preview_out_of_range_is_an_error() {
        let engine = create_engine();
        engine
            .salary_slips()
            .submit(create_slip("slip-1", date(2026, 4, 30), "1000"))
            .unwrap();

        let err = engine
            .claims()
            .benefit_details("EMP-0001", MEDICAL, date(2026, 5, 31), Decimal::MAX)
            .unwrap_err();
        assert!(matches!(err, EngineError::AmountOverflow { .. }));

        let mut request = claim(MEDICAL, date(2026, 5, 31), "100");
        request.current_cycle_accrual_preview = Some(Decimal::MAX);
        let err = engine
            .claims()
            .submit_request(request, date(2026, 5, 1))
            .unwrap_err();
        assert!(matches!(err, EngineError::AmountOverflow { .. }));
    }

    #[test]
    fn test_slip_cancel_refused_while_correction_submitted() {
        let engine = create_engine();
        engine
            .salary_slips()
            .submit(create_slip("slip-1", date(2026, 4, 30), "2000"))
            .unwrap();
        let posting = engine
            .corrections()
            .submit_request(correction("slip-1", "1"))
            .unwrap();

        let err = engine.salary_slips().cancel("slip-1").unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidTransition {
                action: "cancel",
                ..
            }
        ));
        assert!(engine.salary_slips().get("slip-1").is_some());
        assert_eq!(engine.balances(&medical_key()).unwrap().accrued, dec("2074.07"));

        engine.corrections().cancel(posting.correction.id).unwrap();
        assert_eq!(engine.salary_slips().cancel("slip-1").unwrap(), 1);
        assert_eq!(engine.balances(&medical_key()).unwrap(), BenefitBalances::default());
    }

    #[test]
    fn test_slip_cancel_refused_when_accrual_paid_out() {
        let engine = create_engine();
        let processing_date = date(2026, 4, 1);
        engine
            .salary_slips()
            .submit(create_slip("slip-1", date(2026, 4, 30), "1000"))
            .unwrap();
        let paid = engine
            .claims()
            .submit_request(claim(MEDICAL, date(2026, 5, 31), "1000"), processing_date)
            .unwrap();

        let err = engine.salary_slips().cancel("slip-1").unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));
        let balances = engine.balances(&medical_key()).unwrap();
        assert_eq!(balances.accrued, dec("1000"));
        assert_eq!(balances.paid, dec("1000"));
        assert!(
            engine
                .claims()
                .benefit_details("EMP-0001", MEDICAL, date(2026, 6, 30), Decimal::ZERO)
                .is_ok()
        );

        engine.claims().cancel(paid.claim.id).unwrap();
        assert_eq!(engine.salary_slips().cancel("slip-1").unwrap(), 1);
    }

    #[test]
    fn test_slip_cancel_allowed_when_other_accruals_cover_payout() {
        let engine = create_engine();
        engine
            .salary_slips()
            .submit(create_slip("slip-1", date(2026, 4, 30), "1000"))
            .unwrap();
        engine
            .salary_slips()
            .submit(create_slip("slip-2", date(2026, 5, 31), "1000"))
            .unwrap();
        engine
            .claims()
            .submit_request(claim(MEDICAL, date(2026, 6, 30), "1000"), date(2026, 6, 1))
            .unwrap();

        assert_eq!(engine.salary_slips().cancel("slip-2").unwrap(), 1);
        let balances = engine.balances(&medical_key()).unwrap();
        assert_eq!(balances.accrued, dec("1000"));
        assert_eq!(balances.paid, dec("1000"));
    }

    #[test]
    fn test_concurrent_slip_submits_post_once() {
        for _ in 0..20 {
            let engine = create_engine();
            let slip = create_slip("slip-1", date(2026, 4, 30), "1000");
            let barrier = Barrier::new(2);

            let results: Vec<_> = thread::scope(|s| {
                let handles: Vec<_> = (0..2)
                    .map(|_| {
                        let (engine, slip, barrier) = (&engine, slip.clone(), &barrier);
                        s.spawn(move || {
                            barrier.wait();
                            engine.salary_slips().submit(slip)
                        })
                    })
                    .collect();
                handles.into_iter().map(|h| h.join().unwrap()).collect()
            });

            assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
            assert!(matches!(
                results.into_iter().find_map(Result::err),
                Some(EngineError::InvalidTransition { .. })
            ));
            assert_eq!(engine.balances(&medical_key()).unwrap().accrued, dec("1000"));
        }
    }

    #[test]
    fn test_slip_named_like_a_claim_keeps_the_payout() {
        let engine = create_engine();
        let lta_key = BalanceKey::new("EMP-0001", LTA, "FY 2026");
        let paid = engine
            .claims()
            .submit_request(claim(LTA, date(2026, 6, 10), "500"), date(2026, 4, 1))
            .unwrap();

        let slip = create_slip(&paid.claim.id.to_string(), date(2026, 4, 30), "1000");
        engine.salary_slips().submit(slip).unwrap();
        assert_eq!(
            engine
                .salary_slips()
                .cancel(&paid.claim.id.to_string())
                .unwrap(),
            1
        );

        assert_eq!(engine.balances(&lta_key).unwrap().paid, dec("500"));
    }

    #[test]
    fn test_failed_submit_stores_no_claim() {
        let claims = Arc::new(InMemoryClaimStore::new());
        let engine = BenefitEngine::with_stores(
            ConfigLoader::load("./config/default").unwrap(),
            Arc::new(ClosedForPayouts(InMemoryLedgerStore::new())),
            claims.clone(),
            Arc::new(InMemorySalarySlipStore::new()),
            Arc::new(InMemoryCorrectionStore::new()),
        );

        let err = engine
            .claims()
            .submit_request(claim(LTA, date(2026, 6, 10), "500"), date(2026, 4, 1))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidLedgerEntry { .. }));
        assert!(claims.is_empty());
    }
}
