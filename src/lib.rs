//! Employee Benefit Ledger Engine
//!
//! This crate keeps an append-only ledger of benefit accruals and payouts per
//! (employee, salary component, payroll period), derives balances from it,
//! decides how much an employee may claim, and pro-rates arrears when
//! leave-without-pay days of a processed payroll are reversed.
//!
//! - [`calculation`]: pure balance, eligibility, claim and arrear rules
//! - [`engine`]: claim, salary slip and payroll correction lifecycles
//! - [`store`]: collaborator traits and in-memory implementations
//! - [`config`]: YAML configuration of components and payroll periods
//! - [`api`]: the HTTP interface

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
