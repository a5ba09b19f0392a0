//! Core data models for the benefit ledger engine.
//!
//! This module contains all the domain models used throughout the engine.

mod additional_salary;
mod audit;
mod benefit_component;
mod claim;
mod doc_status;
mod ledger_entry;
mod payroll_correction;
mod payroll_period;
mod salary_slip;

pub use additional_salary::AdditionalSalary;
pub use audit::AuditStep;
pub use benefit_component::{BenefitComponentConfig, PayoutMethod};
pub use claim::{BenefitClaim, CLAIM_DOCTYPE, ClaimRequest};
pub use doc_status::DocStatus;
pub use ledger_entry::{BalanceKey, EntryId, LedgerEntry, NewLedgerEntry, TransactionType};
pub use payroll_correction::{
    ArrearDetail, CORRECTION_DOCTYPE, PayrollCorrection, PayrollCorrectionRequest,
};
pub use payroll_period::PayrollPeriod;
pub use salary_slip::{BenefitAccrual, SALARY_SLIP_DOCTYPE, SalaryDetail, SalarySlip};
