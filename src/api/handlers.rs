//! HTTP request handlers for the benefit ledger API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{PayrollCorrectionRequest, SalarySlip};

use super::request::{BenefitDetailsQuery, ClaimSubmissionRequest};
use super::response::{ApiError, ApiErrorResponse, SalarySlipCancelled, SalarySlipPosted};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/benefits/:employee/:component",
            get(benefit_details_handler),
        )
        .route("/claims", post(submit_claim_handler))
        .route("/claims/:id/cancel", post(cancel_claim_handler))
        .route("/salary-slips", post(submit_salary_slip_handler))
        .route("/salary-slips/:id/cancel", post(cancel_salary_slip_handler))
        .route("/payroll-corrections", post(submit_correction_handler))
        .route(
            "/payroll-corrections/:id/cancel",
            post(cancel_correction_handler),
        )
        .with_state(state)
}

/// Handler for GET /benefits/:employee/:component.
///
/// Reports accrued, paid and claimable amounts for the payroll period
/// containing `payroll_date`.
async fn benefit_details_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
    query: Result<Query<BenefitDetailsQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing benefit details request");

    let (employee, component) = match path {
        Ok(Path(parts)) => parts,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Query string error"
            );
            return ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            ))
            .into_response();
        }
    };

    match state.engine().claims().benefit_details(
        &employee,
        &component,
        query.payroll_date,
        query.accrual_preview.unwrap_or(Decimal::ZERO),
    ) {
        Ok(details) => {
            info!(
                correlation_id = %correlation_id,
                employee = %details.employee,
                salary_component = %details.salary_component,
                max_amount_eligible = %details.max_amount_eligible,
                "Benefit details computed"
            );
            json_response(StatusCode::OK, details)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /claims.
///
/// Validates and submits a claim in one step; responds 201 with the posted
/// payout and its compensation instruction.
async fn submit_claim_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClaimSubmissionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing claim submission");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    let processing_date = request
        .processing_date
        .unwrap_or_else(|| Utc::now().date_naive());

    let start_time = Instant::now();
    match state
        .engine()
        .claims()
        .submit_request(request.into(), processing_date)
    {
        Ok(submitted) => {
            info!(
                correlation_id = %correlation_id,
                claim_id = %submitted.claim.id,
                entry_id = %submitted.entry_id,
                duration_us = start_time.elapsed().as_micros(),
                "Claim submitted successfully"
            );
            json_response(StatusCode::CREATED, submitted)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /claims/:id/cancel.
async fn cancel_claim_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, claim_id = %id, "Processing claim cancellation");

    match state.engine().claims().cancel(id) {
        Ok(claim) => json_response(StatusCode::OK, claim),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /salary-slips.
///
/// Stores the slip and posts its benefit accruals; responds 201 with the
/// posted entry identifiers.
async fn submit_salary_slip_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalarySlip>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary slip submission");

    let slip = match payload {
        Ok(Json(slip)) => slip,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    let salary_slip = slip.id.clone();

    match state.engine().salary_slips().submit(slip) {
        Ok(ledger_entries) => json_response(
            StatusCode::CREATED,
            SalarySlipPosted {
                salary_slip,
                ledger_entries,
            },
        ),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /salary-slips/:id/cancel.
async fn cancel_salary_slip_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, salary_slip = %id, "Processing salary slip cancellation");

    match state.engine().salary_slips().cancel(&id) {
        Ok(entries_removed) => json_response(
            StatusCode::OK,
            SalarySlipCancelled {
                salary_slip: id,
                entries_removed,
            },
        ),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /payroll-corrections.
///
/// Validates and submits a correction; responds 201 with its arrears.
async fn submit_correction_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollCorrectionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll correction");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    match state.engine().corrections().submit_request(request) {
        Ok(posting) => {
            info!(
                correlation_id = %correlation_id,
                correction_id = %posting.correction.id,
                "Payroll correction submitted successfully"
            );
            json_response(StatusCode::CREATED, posting)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /payroll-corrections/:id/cancel.
async fn cancel_correction_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, correction_id = %id, "Processing payroll correction cancellation");

    match state.engine().corrections().cancel(id) {
        Ok(correction) => json_response(StatusCode::OK, correction),
        Err(err) => engine_error(correlation_id, err),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Logs an engine error and converts it into an error response.
fn engine_error(correlation_id: Uuid, err: EngineError) -> Response {
    if err.is_integrity_violation() {
        error!(
            correlation_id = %correlation_id,
            error = %err,
            "Ledger integrity violation"
        );
    } else {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Request rejected"
        );
    }
    ApiErrorResponse::from(err).into_response()
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn path_rejection(correlation_id: Uuid, rejection: PathRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Path parameter error"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::engine::SubmittedClaim;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_claim_against_period_limit_returns_201() {
        let router = create_router(create_test_state());
        let body = json!({
            "employee": "EMP-0001",
            "salary_component": "Leave Travel Allowance",
            "payroll_date": "2026-10-31",
            "claimed_amount": "1500",
            "processing_date": "2026-10-01"
        });

        let response = router
            .oneshot(post_json("/claims", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let submitted: SubmittedClaim = serde_json::from_slice(&body).unwrap();
        assert_eq!(submitted.claim.max_amount_eligible, Some(Decimal::new(5000, 0)));
        assert_eq!(submitted.additional_salary.ref_doctype, "Employee Benefit Claim");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/claims", "{invalid json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_unknown_component_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/benefits/EMP-0001/Gym?payroll_date=2026-10-31")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "COMPONENT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_claim_id_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/claims/not-a-uuid/cancel", String::new()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }
}
