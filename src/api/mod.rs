//! HTTP API module for the benefit ledger engine.
//!
//! This module exposes benefit balances, claims, salary slips and payroll
//! corrections over REST.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BenefitDetailsQuery, ClaimSubmissionRequest};
pub use response::{ApiError, ApiErrorResponse, SalarySlipCancelled, SalarySlipPosted};
pub use state::AppState;
