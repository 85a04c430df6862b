use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::model::employee::{Employee, EmployeePatch, EmployeeStats, NewEmployee};
use crate::store::Store;

/// List employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees ordered by id", body = [Employee]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(store: web::Data<dyn Store>) -> Result<HttpResponse, ApiError> {
    let employees = store.list_employees().await?;
    debug!(count = employees.len(), "Fetched employees");
    Ok(HttpResponse::Ok().json(employees))
}

/// Employee statistics
#[utoipa::path(
    get,
    path = "/api/employees/stats",
    responses(
        (status = 200, description = "Headcount, departments and average salary", body = EmployeeStats),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn employee_stats(store: web::Data<dyn Store>) -> Result<HttpResponse, ApiError> {
    let employees = store.list_employees().await?;
    Ok(HttpResponse::Ok().json(EmployeeStats::from_employees(&employees)))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 400, description = "Invalid employee ID"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    store: web::Data<dyn Store>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    match store.find_employee(employee_id).await? {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => Err(ApiError::NotFound("Employee")),
    }
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Invalid payload"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<dyn Store>,
    payload: web::Json<NewEmployee>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate().map_err(ApiError::Validation)?;

    let employee = store.insert_employee(payload).await?;
    info!(employee_id = employee.id, "Employee created");

    Ok(HttpResponse::Created().json(employee))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = EmployeePatch,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "No fields provided for update"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    store: web::Data<dyn Store>,
    path: web::Path<u64>,
    body: web::Json<EmployeePatch>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let patch = body.into_inner();

    if patch.is_empty() {
        return Err(ApiError::Validation(
            "No fields provided for update".to_string(),
        ));
    }
    if let Some(salary) = patch.salary {
        if !salary.is_finite() || salary < 0.0 {
            return Err(ApiError::Validation(
                "salary must be a non-negative number".to_string(),
            ));
        }
    }

    match store.update_employee(employee_id, patch).await? {
        Some(employee) => {
            info!(employee_id, "Employee updated");
            Ok(HttpResponse::Ok().json(employee))
        }
        None => Err(ApiError::NotFound("Employee")),
    }
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Employee deleted successfully"
        })),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    store: web::Data<dyn Store>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    if !store.delete_employee(employee_id).await? {
        return Err(ApiError::NotFound("Employee"));
    }

    info!(employee_id, "Employee deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully"
    })))
}
