use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::attendance::AttendanceTracker;
use crate::error::ApiError;
use crate::model::timesheet_log::{Location, LogoutSummary, TimesheetLog};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = 40.7128)]
    pub latitude: Option<f64>,
    #[schema(example = -74.006)]
    pub longitude: Option<f64>,
    #[serde(alias = "phone_type")]
    #[schema(example = "iPhone")]
    pub device_type: Option<String>,
    #[serde(alias = "phone_number")]
    #[schema(example = "555-0123")]
    pub device_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LogoutRequest {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = 40.7128)]
    pub latitude: Option<f64>,
    #[schema(example = -74.006)]
    pub longitude: Option<f64>,
}

/// Employee login with GPS
#[utoipa::path(
    post,
    path = "/api/timesheets/login",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "Session opened", body = TimesheetLog),
        (status = 400, description = "Invalid employee id or coordinates", body = Object, example = json!({
            "error": "latitude and longitude must be supplied together"
        })),
        (status = 409, description = "Employee already logged in", body = Object, example = json!({
            "error": "Employee 1 is already logged in (session 17)"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn login(
    tracker: web::Data<AttendanceTracker>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    let location =
        Location::from_parts(payload.latitude, payload.longitude).map_err(ApiError::Validation)?;

    let log = tracker
        .record_login(
            payload.employee_id,
            location,
            payload.device_type,
            payload.device_id,
        )
        .await?;

    Ok(HttpResponse::Created().json(log))
}

/// Employee logout with GPS
#[utoipa::path(
    post,
    path = "/api/timesheets/logout",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Session closed", body = LogoutSummary),
        (status = 400, description = "No active login session found", body = Object, example = json!({
            "error": "No active login session found for employee 1"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn logout(
    tracker: web::Data<AttendanceTracker>,
    payload: web::Json<LogoutRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    let location =
        Location::from_parts(payload.latitude, payload.longitude).map_err(ApiError::Validation)?;

    let summary = tracker.record_logout(payload.employee_id, location).await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Employee time logs
#[utoipa::path(
    get,
    path = "/api/timesheets/logs/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Sessions, most recent login first", body = [TimesheetLog]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn employee_logs(
    tracker: web::Data<AttendanceTracker>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let logs = tracker.list_logs_for_employee(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(logs))
}
