use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::info;

use crate::error::ApiError;
use crate::model::timesheet::{NewTimesheet, Timesheet, TimesheetPatch};
use crate::store::Store;

#[utoipa::path(
    get,
    path = "/api/timesheets",
    responses(
        (status = 200, description = "All timesheets, newest date first", body = [Timesheet]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Timesheet"
)]
pub async fn list_timesheets(store: web::Data<dyn Store>) -> Result<HttpResponse, ApiError> {
    let timesheets = store.list_timesheets().await?;
    info!(count = timesheets.len(), "Retrieved timesheets");
    Ok(HttpResponse::Ok().json(timesheets))
}

#[utoipa::path(
    post,
    path = "/api/timesheets",
    request_body = NewTimesheet,
    responses(
        (status = 201, description = "Timesheet created", body = Timesheet),
        (status = 400, description = "Invalid payload"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Timesheet"
)]
pub async fn create_timesheet(
    store: web::Data<dyn Store>,
    payload: web::Json<NewTimesheet>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(ApiError::Validation)?;

    let timesheet = store.insert_timesheet(payload).await?;
    info!(
        timesheet_id = timesheet.id,
        employee_id = timesheet.employee_id,
        "Timesheet created"
    );

    Ok(HttpResponse::Created().json(timesheet))
}

#[utoipa::path(
    put,
    path = "/api/timesheets/{timesheet_id}",
    params(
        ("timesheet_id", Path, description = "Timesheet ID")
    ),
    request_body = TimesheetPatch,
    responses(
        (status = 200, description = "Timesheet updated", body = Timesheet),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Timesheet not found")
    ),
    tag = "Timesheet"
)]
pub async fn update_timesheet(
    store: web::Data<dyn Store>,
    path: web::Path<u64>,
    body: web::Json<TimesheetPatch>,
) -> Result<HttpResponse, ApiError> {
    let timesheet_id = path.into_inner();
    let patch = body.into_inner();

    if patch.is_empty() {
        return Err(ApiError::Validation(
            "No fields provided for update".to_string(),
        ));
    }
    patch.validate().map_err(ApiError::Validation)?;

    match store.update_timesheet(timesheet_id, patch).await? {
        Some(timesheet) => {
            info!(timesheet_id, "Timesheet updated");
            Ok(HttpResponse::Ok().json(timesheet))
        }
        None => Err(ApiError::NotFound("Timesheet")),
    }
}

#[utoipa::path(
    delete,
    path = "/api/timesheets/{timesheet_id}",
    params(
        ("timesheet_id", Path, description = "Timesheet ID")
    ),
    responses(
        (status = 200, description = "Timesheet deleted"),
        (status = 404, description = "Timesheet not found")
    ),
    tag = "Timesheet"
)]
pub async fn delete_timesheet(
    store: web::Data<dyn Store>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let timesheet_id = path.into_inner();

    if !store.delete_timesheet(timesheet_id).await? {
        return Err(ApiError::NotFound("Timesheet"));
    }

    info!(timesheet_id, "Timesheet deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Timesheet deleted successfully"
    })))
}
