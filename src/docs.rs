use crate::api::attendance::{LoginRequest, LogoutRequest};
use crate::api::health::HealthResponse;
use crate::api::inventory::ReorderRequest;
use crate::model::employee::{Employee, EmployeePatch, EmployeeStats, NewEmployee};
use crate::model::inventory::{InventoryItem, InventoryPatch, InventoryStats, NewInventoryItem};
use crate::model::timesheet::{NewTimesheet, Timesheet, TimesheetPatch};
use crate::model::timesheet_log::{Location, LogStatus, LogoutSummary, TimesheetLog};
use utoipa::OpenApi;
use utoipa::openapi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Company Operations Dashboard API",
        version = "1.0.0",
        description = r#"
## Company Operations Dashboard

Backend for a small-company operations dashboard.

### Key Features
- **Employee Management**
  - Create, update, list and remove employee records, with headcount statistics
- **Inventory Management**
  - Track stock levels, restock items and report low or empty stock
- **Timesheets**
  - Record daily hours per employee
- **Attendance**
  - GPS-tagged login and logout with computed hours worked

### Storage
MySQL when `DATABASE_URL` is reachable. If it goes away the server keeps
answering from a seeded in-memory store; `/health` reports which one is active.

### Response Format
- JSON bodies everywhere
- Errors are `{"error": "<message>"}`
"#,
    ),
    paths(
        crate::api::health::health,

        crate::api::employee::list_employees,
        crate::api::employee::employee_stats,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::inventory::list_inventory,
        crate::api::inventory::inventory_stats,
        crate::api::inventory::get_inventory_item,
        crate::api::inventory::create_inventory_item,
        crate::api::inventory::update_inventory_item,
        crate::api::inventory::reorder_inventory_item,
        crate::api::inventory::delete_inventory_item,

        crate::api::timesheet::list_timesheets,
        crate::api::timesheet::create_timesheet,
        crate::api::timesheet::update_timesheet,
        crate::api::timesheet::delete_timesheet,

        crate::api::attendance::login,
        crate::api::attendance::logout,
        crate::api::attendance::employee_logs
    ),
    components(
        schemas(
            HealthResponse,
            Employee,
            NewEmployee,
            EmployeePatch,
            EmployeeStats,
            InventoryItem,
            NewInventoryItem,
            InventoryPatch,
            InventoryStats,
            ReorderRequest,
            Timesheet,
            NewTimesheet,
            TimesheetPatch,
            Location,
            LogStatus,
            TimesheetLog,
            LogoutSummary,
            LoginRequest,
            LogoutRequest
        )
    ),
    tags(
        (name = "Health", description = "Liveness and active storage backend"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Inventory", description = "Inventory management APIs"),
        (name = "Timesheet", description = "Timesheet management APIs"),
        (name = "Attendance", description = "GPS login and logout APIs"),
    )
)]
pub struct ApiDoc;

/// Prefix the handler annotations are written against.
const DOCUMENTED_PREFIX: &str = "/api";

/// OpenAPI document with the resource paths moved under `api_prefix`.
pub fn api_doc(api_prefix: &str) -> openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let prefix = api_prefix.trim_end_matches('/');
    if prefix == DOCUMENTED_PREFIX {
        return doc;
    }

    let paths = std::mem::take(&mut doc.paths.paths);
    doc.paths.paths = paths
        .into_iter()
        .map(|(path, item)| match path.strip_prefix(DOCUMENTED_PREFIX) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => {
                (format!("{prefix}{rest}"), item)
            }
            _ => (path, item),
        })
        .collect();
    doc
}
