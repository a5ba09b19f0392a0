//! Response types for the benefit ledger API.
//!
//! This module defines the response bodies, the error response structure
//! and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::EntryId;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response carrying the given error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, code, details) = match &error {
            EngineError::InvalidAmount { .. } => (
                StatusCode::BAD_REQUEST,
                "INVALID_AMOUNT",
                "The claimed amount must be greater than zero",
            ),
            EngineError::ExceedsEligibleAmount { .. } => (
                StatusCode::BAD_REQUEST,
                "EXCEEDS_ELIGIBLE_AMOUNT",
                "The claim is larger than the unpaid benefit available",
            ),
            EngineError::DuplicateClaim { .. } => (
                StatusCode::CONFLICT,
                "DUPLICATE_CLAIM",
                "Only one claim per component may be submitted in a calendar month",
            ),
            EngineError::RetroactiveClaim { .. } => (
                StatusCode::BAD_REQUEST,
                "RETROACTIVE_CLAIM",
                "Claims cannot be paid with a payroll that has already been processed",
            ),
            EngineError::InconsistentLedger { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INCONSISTENT_LEDGER",
                "The benefit ledger records more paid than accrued",
            ),
            EngineError::ExceedsReversibleDays { .. } => (
                StatusCode::BAD_REQUEST,
                "EXCEEDS_REVERSIBLE_DAYS",
                "The correction would reverse more days than the slip deducted",
            ),
            EngineError::InvalidDaysToReverse { .. } => (
                StatusCode::BAD_REQUEST,
                "INVALID_DAYS_TO_REVERSE",
                "Days to reverse must be greater than zero",
            ),
            EngineError::NoActivePeriod { .. } => (
                StatusCode::BAD_REQUEST,
                "NO_ACTIVE_PERIOD",
                "No payroll period is configured for the requested date",
            ),
            EngineError::ComponentNotFound { .. } => (
                StatusCode::NOT_FOUND,
                "COMPONENT_NOT_FOUND",
                "The salary component is not configured as a benefit",
            ),
            EngineError::DocumentNotFound { .. } => (
                StatusCode::NOT_FOUND,
                "DOCUMENT_NOT_FOUND",
                "The referenced document does not exist",
            ),
            EngineError::InvalidTransition { .. } => (
                StatusCode::CONFLICT,
                "INVALID_TRANSITION",
                "The document is not in a state that allows this action",
            ),
            EngineError::AmountOverflow { .. } => (
                StatusCode::BAD_REQUEST,
                "AMOUNT_OVERFLOW",
                "An amount in the request is too large to process",
            ),
            EngineError::InvalidLedgerEntry { .. } => (
                StatusCode::BAD_REQUEST,
                "INVALID_LEDGER_ENTRY",
                "The ledger rejected an entry",
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                "The engine configuration could not be loaded",
            ),
        };

        ApiErrorResponse {
            status,
            error: ApiError::with_details(code, error.to_string(), details),
        }
    }
}

/// Response body for a submitted salary slip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalarySlipPosted {
    /// The slip identifier.
    pub salary_slip: String,
    /// The accrual entries posted.
    pub ledger_entries: Vec<EntryId>,
}

/// Response body for a cancelled salary slip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalarySlipCancelled {
    /// The slip identifier.
    pub salary_slip: String,
    /// How many ledger entries were removed.
    pub entries_removed: usize,
}
