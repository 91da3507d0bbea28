//! HTTP request handlers for the payroll API.
//!
//! This module contains the router and the handler functions for all API
//! endpoints. Handlers stay thin: they check the caller, validate the period
//! and delegate to the engine or the reporting aggregator.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{DepartmentCostRow, PayrollItemView, PayrollRun, PayrollSummary};

use super::request::{Caller, PeriodRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/payroll/runs", post(create_run).get(list_runs))
        .route("/api/v1/payroll/runs/:id", get(get_run).delete(delete_run))
        .route("/api/v1/payroll/runs/:id/process", post(process_run))
        .route("/api/v1/payroll/runs/:id/lock", post(lock_run))
        .route("/api/v1/payroll/runs/:id/items", get(list_items))
        .route("/api/v1/reports/payroll-summary", get(payroll_summary))
        .route("/api/v1/reports/department-cost", get(department_cost))
        .route("/api/v1/payroll/my/:year/:month", get(my_slip))
        .with_state(state)
}

/// Logs a rejected request and passes the error through.
fn rejected(correlation_id: Uuid, error: ApiErrorResponse) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        status = error.status.as_u16(),
        code = %error.error.code,
        message = %error.error.message,
        "Request rejected"
    );
    error
}

fn parse_run_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiErrorResponse::bad_request(format!("Invalid run id: {}", raw)))
}

fn json_rejection(rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message names the offending field
            ApiError::validation_error(err.body_text())
        }
        JsonRejection::JsonSyntaxError(err) => {
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
}

/// Handler for `POST /api/v1/payroll/runs`.
async fn create_run(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PeriodRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create run request");

    let result = async {
        Caller::from_headers(&headers).require_admin()?;
        let Json(request) = payload.map_err(json_rejection)?;
        let period = request.validate()?;
        Ok::<_, ApiErrorResponse>(state.engine().create_run(period.year, period.month).await?)
    }
    .await;

    match result {
        Ok(run) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %run.id,
                period = %run.period,
                "Run created"
            );
            Ok((StatusCode::CREATED, Json(run)))
        }
        Err(err) => Err(rejected(correlation_id, err)),
    }
}

/// Handler for `GET /api/v1/payroll/runs`.
async fn list_runs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<PayrollRun>>> {
    let correlation_id = Uuid::new_v4();
    let result = async {
        Caller::from_headers(&headers).require_admin()?;
        Ok::<_, ApiErrorResponse>(state.engine().list_runs().await?)
    }
    .await;

    result
        .map(|runs: Vec<PayrollRun>| {
            info!(correlation_id = %correlation_id, count = runs.len(), "Listed runs");
            Json(runs)
        })
        .map_err(|err| rejected(correlation_id, err))
}

/// Handler for `GET /api/v1/payroll/runs/:id`.
async fn get_run(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<PayrollRun>> {
    let correlation_id = Uuid::new_v4();
    let result = async {
        Caller::from_headers(&headers).require_admin()?;
        let run_id = parse_run_id(&id)?;
        Ok::<_, ApiErrorResponse>(state.engine().get_run(run_id).await?)
    }
    .await;

    result.map(Json).map_err(|err| rejected(correlation_id, err))
}

/// Handler for `POST /api/v1/payroll/runs/:id/process`.
async fn process_run(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<PayrollRun>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, run_id = %id, "Processing payroll run");

    let start_time = Instant::now();
    let result = async {
        Caller::from_headers(&headers).require_admin()?;
        let run_id = parse_run_id(&id)?;
        Ok::<_, ApiErrorResponse>(state.engine().process_run_detailed(run_id).await?)
    }
    .await;

    match result {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %outcome.run.id,
                created = outcome.created,
                skipped = outcome.skipped,
                duration_us = start_time.elapsed().as_micros(),
                "Run processed"
            );
            Ok(Json(outcome.run))
        }
        Err(err) => Err(rejected(correlation_id, err)),
    }
}

/// Handler for `POST /api/v1/payroll/runs/:id/lock`.
async fn lock_run(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<PayrollRun>> {
    let correlation_id = Uuid::new_v4();
    let result = async {
        Caller::from_headers(&headers).require_admin()?;
        let run_id = parse_run_id(&id)?;
        Ok::<_, ApiErrorResponse>(state.engine().lock_run(run_id).await?)
    }
    .await;

    match result {
        Ok(run) => {
            info!(correlation_id = %correlation_id, run_id = %run.id, "Run locked");
            Ok(Json(run))
        }
        Err(err) => Err(rejected(correlation_id, err)),
    }
}

/// Handler for `DELETE /api/v1/payroll/runs/:id`.
async fn delete_run(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    let result = async {
        Caller::from_headers(&headers).require_admin()?;
        let run_id = parse_run_id(&id)?;
        state.engine().delete_run(run_id).await?;
        Ok::<_, ApiErrorResponse>(run_id)
    }
    .await;

    match result {
        Ok(run_id) => {
            info!(correlation_id = %correlation_id, run_id = %run_id, "Run deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => Err(rejected(correlation_id, err)),
    }
}

/// Handler for `GET /api/v1/payroll/runs/:id/items`.
async fn list_items(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<PayrollItemView>>> {
    let correlation_id = Uuid::new_v4();
    let result = async {
        Caller::from_headers(&headers).require_admin()?;
        let run_id = parse_run_id(&id)?;
        Ok::<_, ApiErrorResponse>(state.engine().list_items(run_id).await?)
    }
    .await;

    result.map(Json).map_err(|err| rejected(correlation_id, err))
}

fn period_query(query: Result<Query<PeriodRequest>, QueryRejection>) -> ApiResult<PeriodRequest> {
    query
        .map(|Query(request)| request)
        .map_err(|rejection| ApiErrorResponse::bad_request(rejection.body_text()))
}

fn period_path(path: Result<Path<(i64, i64)>, PathRejection>) -> ApiResult<PeriodRequest> {
    path
        .map(|Path((year, month))| PeriodRequest { year, month })
        .map_err(|rejection| ApiErrorResponse::bad_request(rejection.body_text()))
}

/// Handler for `GET /api/v1/reports/payroll-summary?year&month`.
async fn payroll_summary(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<PeriodRequest>, QueryRejection>,
) -> ApiResult<Json<PayrollSummary>> {
    let correlation_id = Uuid::new_v4();
    let result = async {
        Caller::from_headers(&headers).require_admin()?;
        let period = period_query(query)?.validate()?;
        Ok::<_, ApiErrorResponse>(state
            .reports()
            .payroll_summary(period.year, period.month)
            .await?)
    }
    .await;

    match result {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                employee_count = summary.employee_count,
                total_net = %summary.totals.total_net,
                "Payroll summary built"
            );
            Ok(Json(summary))
        }
        Err(err) => Err(rejected(correlation_id, err)),
    }
}

/// Handler for `GET /api/v1/reports/department-cost?year&month`.
async fn department_cost(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<PeriodRequest>, QueryRejection>,
) -> ApiResult<Json<Vec<DepartmentCostRow>>> {
    let correlation_id = Uuid::new_v4();
    let result = async {
        Caller::from_headers(&headers).require_admin()?;
        let period = period_query(query)?.validate()?;
        Ok::<_, ApiErrorResponse>(state
            .reports()
            .department_cost(period.year, period.month)
            .await?)
    }
    .await;

    result.map(Json).map_err(|err| rejected(correlation_id, err))
}

/// Handler for `GET /api/v1/payroll/my/:year/:month`.
async fn my_slip(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<Json<PayrollItemView>> {
    let correlation_id = Uuid::new_v4();
    let result = async {
        let caller = Caller::from_headers(&headers);
        let employee_id = caller.require_employee_id()?;
        let period = period_path(path)?.validate()?;
        Ok::<_, ApiErrorResponse>(state
            .reports()
            .my_slip(period.year, period.month, employee_id)
            .await?)
    }
    .await;

    match result {
        Ok(slip) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %slip.employee_id,
                "Payslip served"
            );
            Ok(Json(slip))
        }
        Err(err) => Err(rejected(correlation_id, err)),
    }
}
