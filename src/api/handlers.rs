//! HTTP request handlers for the Site Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::reports::{compute_run, label_pay_lines};

use super::request::{PayLinesRequest, ReportQuery, TopPayrollQuery};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/pay-lines", post(pay_lines_handler))
        .route("/reports/payroll", get(payroll_report_handler))
        .route("/reports/weekly", get(weekly_report_handler))
        .route("/reports/master", get(master_report_handler))
        .route("/reports/employees/:employee_id", get(employee_report_handler))
        .route("/reports/top-payroll", get(top_payroll_handler))
        .with_state(state)
}

/// Handler for POST /pay-lines endpoint.
///
/// Accepts raw attendance, employee and rate card rows and returns the pay
/// lines, totals and skipped rows.
async fn pay_lines_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayLinesRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing pay lines request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let started = Instant::now();
    let roster = request.roster();
    let result = compute_run(
        &request.attendance,
        &roster,
        &request.rate_cards,
        state.config().config(),
    )
    .map(|mut run| {
        label_pay_lines(&mut run.pay_lines, &request.sites());
        run
    });

    if let Ok(run) = &result {
        info!(
            correlation_id = %correlation_id,
            records = request.attendance.len(),
            pay_lines = run.pay_lines.len(),
            skipped = run.skipped_count(),
            total_pay = %run.totals.total_pay,
            duration_us = started.elapsed().as_micros(),
            "Pay lines computed successfully"
        );
    }
    respond(correlation_id, "pay-lines", result)
}

/// Handler for GET /reports/payroll.
async fn payroll_report_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll report request");

    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    let result = match query.range() {
        Ok(range) => state.reports().payroll_report(range, query.filter(range)).await,
        Err(err) => Err(err),
    };
    respond(correlation_id, "payroll", result)
}

/// Handler for GET /reports/weekly.
async fn weekly_report_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing weekly report request");

    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    let result = match query.range() {
        Ok(range) => state.reports().weekly_report(range).await,
        Err(err) => Err(err),
    };
    respond(correlation_id, "weekly", result)
}

/// Handler for GET /reports/master.
async fn master_report_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing master report request");

    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    let result = match query.range() {
        Ok(range) => state.reports().master_report(range, query.filter(range)).await,
        Err(err) => Err(err),
    };
    respond(correlation_id, "master", result)
}

/// Handler for GET /reports/employees/:employee_id.
async fn employee_report_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Processing employee report request"
    );

    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    let result = match query.range() {
        Ok(range) => state.reports().employee_report(&employee_id, range).await,
        Err(err) => Err(err),
    };
    respond(correlation_id, "employee", result)
}

/// Handler for GET /reports/top-payroll.
async fn top_payroll_handler(
    State(state): State<AppState>,
    query: Result<Query<TopPayrollQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing top payroll request");

    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    if query.limit == Some(0) {
        return rejected(
            correlation_id,
            "top-payroll",
            ApiError::validation_error("limit must be at least 1"),
        );
    }

    let result = match query.range() {
        Ok(range) => state.reports().top_payroll(range, query.limit).await,
        Err(err) => Err(err),
    };
    respond(correlation_id, "top-payroll", result)
}

/// Serializes a result as JSON, mapping engine errors to their status code.
fn respond<T: Serialize>(correlation_id: Uuid, endpoint: &'static str, result: EngineResult<T>) -> Response {
    match result {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(body),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                endpoint = endpoint,
                error = %err,
                "Request failed"
            );
            error_response(err.into())
        }
    }
}

/// Logs and returns a 400 for a request the handler refused before calling
/// the engine.
fn rejected(correlation_id: Uuid, endpoint: &'static str, error: ApiError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        endpoint = endpoint,
        error = %error.message,
        "Request failed"
    );
    error_response(ApiErrorResponse::bad_request(error))
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
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
    error_response(ApiErrorResponse::bad_request(error))
}

fn query_rejection_response(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    error_response(ApiErrorResponse::bad_request(ApiError::validation_error(body_text)))
}
