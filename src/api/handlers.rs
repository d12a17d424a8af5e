//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    PayrollCalculation, aggregate_leave, explain_payroll, generate_all_payrolls, resolve_allowance,
};
use crate::error::EngineError;
use crate::report::{
    EmployeeSummary, LeaveStatusSummary, MonthlySummary, YearlySummary, employee_summaries,
    leave_status_summary, monthly_summary, render_employee_summaries, render_leave_status,
    render_monthly, render_yearly, yearly_summary,
};

use super::request::{
    ApprovedLeaveDaysRequest, EmployeeReportRequest, GenerateAllPayrollsRequest,
    GeneratePayrollRequest, LeaveReportRequest, MonthlyReportRequest, ResolveAllowanceRequest,
    YearlyReportRequest,
};
use super::response::{
    AllowanceResponse, ApiError, ApiErrorResponse, ApprovedLeaveDaysResponse,
    BatchPayrollResponse, ReportResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/allowances/resolve", post(resolve_allowance_handler))
        .route("/leave/approved-days", post(approved_leave_days_handler))
        .route("/payroll/generate", post(generate_payroll_handler))
        .route("/payroll/generate-all", post(generate_all_payrolls_handler))
        .route("/reports/monthly", post(monthly_report_handler))
        .route("/reports/yearly", post(yearly_report_handler))
        .route("/reports/employees", post(employee_report_handler))
        .route("/reports/leave", post(leave_report_handler))
        .with_state(state)
}

/// Unwraps a JSON body or converts the rejection into a 400 response.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
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
            warn!(correlation_id = %correlation_id, "Missing JSON content type");
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    })
}

fn engine_failure(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    err.into()
}

fn report_date(generated_on: Option<NaiveDate>) -> NaiveDate {
    generated_on.unwrap_or_else(|| Utc::now().date_naive())
}

/// Handler for POST /allowances/resolve.
async fn resolve_allowance_handler(
    State(state): State<AppState>,
    payload: Result<Json<ResolveAllowanceRequest>, JsonRejection>,
) -> ApiResult<AllowanceResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing allowance resolution request");

    let request = parse_body(correlation_id, payload)?;
    let resolution = resolve_allowance(&request.employee, &request.allowances, state.rules(), 1);

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee.id,
        source = ?resolution.source,
        "Allowances resolved"
    );
    Ok(Json(AllowanceResponse {
        allowances: resolution.allowances,
        source: resolution.source,
        audit_step: resolution.audit_step,
    }))
}

/// Handler for POST /leave/approved-days.
async fn approved_leave_days_handler(
    payload: Result<Json<ApprovedLeaveDaysRequest>, JsonRejection>,
) -> ApiResult<ApprovedLeaveDaysResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing approved leave request");

    let request = parse_body(correlation_id, payload)?;
    let period = request
        .period
        .to_period()
        .map_err(|err| engine_failure(correlation_id, err))?;

    let aggregation = aggregate_leave(&request.employee_id, period, &request.leave_requests, 1);

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        leave_days = aggregation.leave_days,
        "Approved leave counted"
    );
    Ok(Json(ApprovedLeaveDaysResponse {
        employee_id: request.employee_id,
        period,
        leave_days: aggregation.leave_days,
        request_ids: aggregation.request_ids,
    }))
}

/// Handler for POST /payroll/generate.
///
/// Returns the payroll record together with its audit trace.
async fn generate_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePayrollRequest>, JsonRejection>,
) -> ApiResult<PayrollCalculation> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll generation request");

    let request = parse_body(correlation_id, payload)?;
    let period = request
        .period
        .to_period()
        .map_err(|err| engine_failure(correlation_id, err))?;

    let start_time = Instant::now();
    let calculation = explain_payroll(
        &request.employee,
        period,
        &request.leave_requests,
        &request.allowances,
        state.rules(),
        request.generated_at.unwrap_or_else(Utc::now),
    );

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee.id,
        net_salary = %calculation.record.net_salary,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll generated"
    );
    Ok(Json(calculation))
}

/// Handler for POST /payroll/generate-all.
async fn generate_all_payrolls_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateAllPayrollsRequest>, JsonRejection>,
) -> ApiResult<BatchPayrollResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch payroll request");

    let request = parse_body(correlation_id, payload)?;
    let period = request
        .period
        .to_period()
        .map_err(|err| engine_failure(correlation_id, err))?;

    let records = generate_all_payrolls(
        &request.employees,
        period,
        &request.leave_requests,
        &request.allowances,
        state.rules(),
        request.generated_at.unwrap_or_else(Utc::now),
    );

    info!(
        correlation_id = %correlation_id,
        employees = request.employees.len(),
        records = records.len(),
        "Batch payroll generated"
    );
    Ok(Json(BatchPayrollResponse { period, records }))
}

/// Handler for POST /reports/monthly.
async fn monthly_report_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthlyReportRequest>, JsonRejection>,
) -> ApiResult<ReportResponse<MonthlySummary>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing monthly report request");

    let request = parse_body(correlation_id, payload)?;
    let summary = request
        .period
        .to_period()
        .and_then(|period| monthly_summary(&request.records, period))
        .map_err(|err| engine_failure(correlation_id, err))?;

    let report = render_monthly(
        &summary,
        report_date(request.generated_on),
        state.rules().currency_symbol(),
    );
    info!(correlation_id = %correlation_id, filename = %report.filename, "Monthly report rendered");
    Ok(Json(ReportResponse { summary, report }))
}

/// Handler for POST /reports/yearly.
async fn yearly_report_handler(
    State(state): State<AppState>,
    payload: Result<Json<YearlyReportRequest>, JsonRejection>,
) -> ApiResult<ReportResponse<YearlySummary>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing yearly report request");

    let request = parse_body(correlation_id, payload)?;
    let summary = yearly_summary(&request.records, request.year)
        .map_err(|err| engine_failure(correlation_id, err))?;

    let report = render_yearly(
        &summary,
        report_date(request.generated_on),
        state.rules().currency_symbol(),
    );
    info!(correlation_id = %correlation_id, filename = %report.filename, "Yearly report rendered");
    Ok(Json(ReportResponse { summary, report }))
}

/// Handler for POST /reports/employees.
async fn employee_report_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeReportRequest>, JsonRejection>,
) -> ApiResult<ReportResponse<Vec<EmployeeSummary>>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee report request");

    let request = parse_body(correlation_id, payload)?;
    let summary = employee_summaries(
        &request.employees,
        &request.records,
        &request.leave_requests,
    );

    let report = render_employee_summaries(
        &summary,
        report_date(request.generated_on),
        state.rules().currency_symbol(),
    );
    info!(
        correlation_id = %correlation_id,
        employees = summary.len(),
        "Employee report rendered"
    );
    Ok(Json(ReportResponse { summary, report }))
}

/// Handler for POST /reports/leave.
async fn leave_report_handler(
    payload: Result<Json<LeaveReportRequest>, JsonRejection>,
) -> ApiResult<ReportResponse<LeaveStatusSummary>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave report request");

    let request = parse_body(correlation_id, payload)?;
    let summary = leave_status_summary(&request.employees, &request.leave_requests);

    let report = render_leave_status(&summary, report_date(request.generated_on));
    info!(
        correlation_id = %correlation_id,
        requests = summary.totals.total,
        "Leave report rendered"
    );
    Ok(Json(ReportResponse { summary, report }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, PayrollRules};
    use crate::models::{Employee, LeaveDecision, LeaveRequest, PayPeriod, PayrollRecord};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::from_rules(PayrollRules::default()))
    }

    fn create_test_employee() -> Employee {
        Employee {
            id: "emp-001".to_string(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            department: "Engineering".to_string(),
            position: "Developer".to_string(),
            base_salary: Decimal::from(65000),
            is_active: true,
        }
    }

    fn approved_leave() -> LeaveRequest {
        let date = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        LeaveRequest::new(
            "leave-001",
            "emp-001",
            "Asha Rao",
            date(10),
            date(14),
            "Family event",
            date(1),
        )
        .unwrap()
        .decide(LeaveDecision::Approve, None)
        .unwrap()
    }

    async fn post_json(uri: &str, body: String) -> axum::response::Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_generate_payroll_returns_record_and_trace() {
        let body = serde_json::json!({
            "employee": create_test_employee(),
            "month": 3,
            "year": 2025,
            "leave_requests": [approved_leave()],
            "generated_at": Utc.with_ymd_and_hms(2025, 3, 28, 9, 0, 0).unwrap()
        });

        let response = post_json("/payroll/generate", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let calculation: PayrollCalculation = read_json(response).await;
        assert_eq!(calculation.record.id, "payroll-emp-001-3-2025");
        assert_eq!(calculation.record.deductions.leave_days, 5);
        assert_eq!(calculation.record.deductions.leave_deduction, Decimal::from(10833));
        assert_eq!(calculation.record.net_salary, Decimal::from(82767));
        assert_eq!(calculation.audit_trace.steps.len(), 6);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let response = post_json("/payroll/generate", "{invalid json".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let body = serde_json::json!({ "month": 3, "year": 2025 });
        let response = post_json("/payroll/generate", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("employee"));
    }

    #[tokio::test]
    async fn test_invalid_month_returns_invalid_period() {
        let body = serde_json::json!({
            "employee": create_test_employee(),
            "month": 13,
            "year": 2025
        });
        let response = post_json("/payroll/generate", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "INVALID_PERIOD");
    }

    #[tokio::test]
    async fn test_resolve_allowance_without_record_derives() {
        let body = serde_json::json!({ "employee": create_test_employee() });
        let response = post_json("/allowances/resolve", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let resolved: AllowanceResponse = read_json(response).await;
        assert_eq!(resolved.allowances.hra, Decimal::from(26000));
        assert_eq!(resolved.allowances.da, Decimal::from(13000));
        assert_eq!(resolved.audit_step.rule_id, "allowance_resolution");
    }

    #[tokio::test]
    async fn test_approved_leave_days_endpoint() {
        let body = serde_json::json!({
            "employee_id": "emp-001",
            "month": 3,
            "year": 2025,
            "leave_requests": [approved_leave()]
        });
        let response = post_json("/leave/approved-days", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let counted: ApprovedLeaveDaysResponse = read_json(response).await;
        assert_eq!(counted.leave_days, 5);
        assert_eq!(counted.request_ids, vec!["leave-001".to_string()]);
        assert_eq!(counted.period, PayPeriod::new(3, 2025).unwrap());
    }

    #[tokio::test]
    async fn test_monthly_report_without_records_returns_404() {
        let body = serde_json::json!({ "month": 3, "year": 2025, "records": [] });
        let response = post_json("/reports/monthly", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "NO_PAYROLL_DATA");
    }

    #[tokio::test]
    async fn test_monthly_report_renders_text() {
        let record: PayrollRecord = crate::calculation::generate_payroll(
            &create_test_employee(),
            PayPeriod::new(3, 2025).unwrap(),
            &[],
            &[],
            &PayrollRules::default(),
            Utc.with_ymd_and_hms(2025, 3, 28, 9, 0, 0).unwrap(),
        );
        let body = serde_json::json!({
            "month": 3,
            "year": 2025,
            "records": [record],
            "generated_on": "2025-03-31"
        });

        let response = post_json("/reports/monthly", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let report: ReportResponse<MonthlySummary> = read_json(response).await;
        assert_eq!(report.summary.total_net, Decimal::from(93600));
        assert_eq!(report.report.filename, "monthly-salary-report-3-2025.txt");
        assert!(report.report.content.contains("- Total Gross Salary: $104,000"));
        assert!(report.report.content.contains("Generated: 2025-03-31"));
    }
}
