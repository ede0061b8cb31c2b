//! HTTP request handlers for the attendance and payroll API.
//!
//! This module contains the handler functions for all API endpoints.
//! Clock and finalize timestamps come from the server clock here, at
//! the edge; everything below the handlers works on explicit times.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::storage::StorageError;

use super::request::{ApprovalRequest, ClockRequest, GenerateRequest, PayrollQuery};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/clock-in", post(clock_in_handler))
        .route("/attendance/clock-out", post(clock_out_handler))
        .route("/attendance/:id/approval", post(approval_handler))
        .route("/payroll/generate", post(generate_handler))
        .route("/payroll", get(list_payroll_handler))
        .route("/payroll/:id/finalize", post(finalize_handler))
        .with_state(state)
}

/// Handler for POST /attendance/clock-in.
///
/// Records a geofence-checked clock-in stamped with the server clock
/// and returns the created attendance record.
async fn clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing clock-in request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                json_rejection_error(correlation_id, rejection),
            );
        }
    };

    let now = Local::now().naive_local();
    match state.recorder().clock_in(request.into_event(now)).await {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = record.employee_id,
                status = ?record.status,
                within_geofence = record.within_geofence_in,
                "Clock-in recorded"
            );
            json_response(StatusCode::CREATED, record)
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Clock-in rejected");
            let api_error: ApiErrorResponse = error.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Handler for POST /attendance/clock-out.
///
/// Completes the day's attendance record and returns it.
async fn clock_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing clock-out request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                json_rejection_error(correlation_id, rejection),
            );
        }
    };

    let now = Local::now().naive_local();
    match state.recorder().clock_out(request.into_event(now)).await {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = record.employee_id,
                overtime_minutes = record.overtime_minutes,
                within_geofence = record.within_geofence_out,
                "Clock-out recorded"
            );
            json_response(StatusCode::OK, record)
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Clock-out rejected");
            let api_error: ApiErrorResponse = error.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Handler for POST /attendance/:id/approval.
///
/// Sets the HR approval state on an attendance record. Only approved
/// records count toward payroll aggregation.
async fn approval_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    payload: Result<Json<ApprovalRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, attendance_id = id, "Processing approval request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                json_rejection_error(correlation_id, rejection),
            );
        }
    };

    match state.attendance().set_approval(id, request.status).await {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                attendance_id = id,
                approval = ?record.approval,
                "Approval updated"
            );
            json_response(StatusCode::OK, record)
        }
        Err(StorageError::NotFound { .. }) => {
            warn!(correlation_id = %correlation_id, attendance_id = id, "Attendance record not found");
            json_response(
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "ATTENDANCE_NOT_FOUND",
                    format!("Attendance record {} not found", id),
                    "No attendance record exists with this id",
                ),
            )
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Approval update failed");
            let api_error: ApiErrorResponse = EngineError::from(error).into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Handler for POST /payroll/generate.
///
/// Runs draft generation for a period and returns the inserted records
/// together with any warnings.
async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll generation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                json_rejection_error(correlation_id, rejection),
            );
        }
    };

    let start_time = Instant::now();
    let generated_at = Local::now().naive_local();
    match state
        .batch()
        .generate(&request.period, &request.bonuses, generated_at)
        .await
    {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                period = %outcome.period,
                records = outcome.records.len(),
                warnings = outcome.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Payroll generation completed"
            );
            json_response(StatusCode::CREATED, outcome)
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Payroll generation failed");
            let api_error: ApiErrorResponse = error.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Handler for GET /payroll?period=YYYY-MM.
///
/// Lists every payroll record for the period, drafts and finals.
async fn list_payroll_handler(
    State(state): State<AppState>,
    query: Option<Query<PayrollQuery>>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Some(Query(query)) => query,
        None => {
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error("Query parameter 'period' is required"),
            );
        }
    };

    info!(correlation_id = %correlation_id, period = %query.period, "Listing payroll records");
    match state.batch().list(&query.period).await {
        Ok(records) => json_response(StatusCode::OK, records),
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Payroll listing failed");
            let api_error: ApiErrorResponse = error.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Handler for POST /payroll/:id/finalize.
///
/// Transitions a draft to final, stamped with the server clock.
async fn finalize_handler(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, payroll_id = id, "Processing finalize request");

    let finalized_at = Local::now().naive_local();
    match state.batch().finalize(id, finalized_at).await {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                payroll_id = id,
                employee_id = record.employee_id,
                "Payroll record finalized"
            );
            json_response(StatusCode::OK, record)
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Finalize failed");
            let api_error: ApiErrorResponse = error.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Maps a body rejection onto the error contract: schema violations are
/// validation errors, everything else malformed JSON or a missing
/// content type.
fn json_rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // Check if it's a missing field error
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
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Serializes a body with an explicit JSON content type.
fn json_response(status: StatusCode, body: impl Serialize) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::models::{
        AttendanceRecord, Employee, EmployeeRole, EmploymentStatus, PayrollRecord, Position,
    };
    use crate::storage::{
        MemoryActivityLog, MemoryAttendanceStore, MemoryConfigStore, MemoryDirectoryStore,
        MemoryPayrollStore,
    };

    fn staff(id: u32) -> Employee {
        Employee {
            id,
            role: EmployeeRole::Employee,
            status: EmploymentStatus::Active,
            position_id: Some(5),
        }
    }

    fn create_test_state() -> AppState {
        let directory = MemoryDirectoryStore::new(
            vec![staff(7)],
            vec![Position {
                id: 5,
                name: "Staff".to_string(),
                hourly_rate: 24_000,
            }],
        );
        AppState::new(
            Arc::new(MemoryAttendanceStore::default()),
            Arc::new(MemoryPayrollStore::default()),
            Arc::new(directory),
            Arc::new(MemoryActivityLog::default()),
            Arc::new(MemoryConfigStore::default()),
        )
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_error(response: Response) -> ApiError {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_clock_in_returns_201_with_record() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "/attendance/clock-in",
                r#"{"employee_id": 7, "lat": -2.9795731113284303, "lng": 104.73111003716011}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let record: AttendanceRecord = serde_json::from_slice(&body).unwrap();
        assert_eq!(record.employee_id, 7);
        assert!(record.within_geofence_in);
        assert!(record.clock_in.is_some());
        assert!(record.clock_out.is_none());
    }

    #[tokio::test]
    async fn test_second_clock_in_returns_400() {
        let router = create_router(create_test_state());
        let body = r#"{"employee_id": 7, "lat": -2.9796, "lng": 104.7311}"#;

        let first = router
            .clone()
            .oneshot(json_request("/attendance/clock-in", body))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = router
            .oneshot(json_request("/attendance/clock-in", body))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(second).await.code, "DUPLICATE_CLOCK_IN");
    }

    #[tokio::test]
    async fn test_clock_out_without_clock_in_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "/attendance/clock-out",
                r#"{"employee_id": 7, "lat": -2.9796, "lng": 104.7311}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "NO_OPEN_CLOCK_IN");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request("/attendance/clock-in", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "/attendance/clock-in",
                r#"{"lat": -2.9796, "lng": 104.7311}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = read_error(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("employee_id"));
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/attendance/clock-in")
                    .body(Body::from(
                        r#"{"employee_id": 7, "lat": -2.9796, "lng": 104.7311}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_approval_unknown_record_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "/attendance/42/approval",
                r#"{"status": "approved"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_error(response).await.code, "ATTENDANCE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_generate_with_bonus_returns_201() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "/payroll/generate",
                r#"{"period": "2025-07", "bonuses": {"7": 50000}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let outcome: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(outcome["period"], "2025-07");
        assert_eq!(outcome["records"][0]["employee_id"], 7);
        assert_eq!(outcome["records"][0]["bonus"], 50_000);
        assert_eq!(outcome["records"][0]["total_net"], 50_000);
        assert_eq!(outcome["records"][0]["status"], "draft");
    }

    #[tokio::test]
    async fn test_generate_invalid_period_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "/payroll/generate",
                r#"{"period": "2025-13"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "INVALID_PERIOD");
    }

    #[tokio::test]
    async fn test_list_payroll_requires_period() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/payroll")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_list_payroll_returns_generated_records() {
        let router = create_router(create_test_state());
        router
            .clone()
            .oneshot(json_request("/payroll/generate", r#"{"period": "2025-07"}"#))
            .await
            .unwrap();

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/payroll?period=2025-07")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let records: Vec<PayrollRecord> = serde_json::from_slice(&body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee_id, 7);
    }

    #[tokio::test]
    async fn test_finalize_unknown_record_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/payroll/404/finalize")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_error(response).await.code, "PAYROLL_NOT_FOUND");
    }
}
