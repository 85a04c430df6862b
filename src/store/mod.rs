//! Persistence boundary.
//!
//! Every entity gets its own async trait; [`Store`] bundles them so handlers
//! and the attendance tracker can hold one `Arc<dyn Store>` without caring
//! whether MySQL or the in-memory tables sit behind it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use strum_macros::{Display, IntoStaticStr};
use thiserror::Error;

use crate::model::{
    employee::{Employee, EmployeePatch, NewEmployee},
    inventory::{InventoryItem, InventoryPatch, NewInventoryItem},
    timesheet::{NewTimesheet, Timesheet, TimesheetPatch},
    timesheet_log::{Location, NewTimesheetLog, TimesheetLog},
};

pub mod fallback;
pub mod memory;
pub mod mysql;
pub mod seed;

pub use fallback::FallbackStore;
pub use memory::MemoryStore;
pub use mysql::{MySqlStore, RetryPolicy};

#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend could not be reached (connection, pool or timeout failure).
    #[error("storage unavailable during {op}: {reason}")]
    Unavailable { op: StoreOp, reason: String },

    /// Backend answered but rejected the operation.
    #[error("database error during {op}: {reason}")]
    Database { op: StoreOp, reason: String },
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Tag for every operation the persistence layer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum StoreOp {
    ListEmployees,
    FindEmployee,
    InsertEmployee,
    UpdateEmployee,
    DeleteEmployee,
    ListInventory,
    FindInventoryItem,
    InsertInventoryItem,
    UpdateInventoryItem,
    DeleteInventoryItem,
    ListTimesheets,
    FindTimesheet,
    InsertTimesheet,
    UpdateTimesheet,
    DeleteTimesheet,
    CreateSession,
    FindOpenSession,
    CloseSession,
    ListSessions,
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All employees ordered by id.
    async fn list_employees(&self) -> StoreResult<Vec<Employee>>;
    async fn find_employee(&self, id: u64) -> StoreResult<Option<Employee>>;
    async fn insert_employee(&self, employee: NewEmployee) -> StoreResult<Employee>;
    /// `Ok(None)` when no employee has this id.
    async fn update_employee(&self, id: u64, patch: EmployeePatch)
    -> StoreResult<Option<Employee>>;
    /// `Ok(false)` when no employee has this id.
    async fn delete_employee(&self, id: u64) -> StoreResult<bool>;
}

#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All items ordered by id.
    async fn list_inventory(&self) -> StoreResult<Vec<InventoryItem>>;
    async fn find_inventory_item(&self, id: u64) -> StoreResult<Option<InventoryItem>>;
    async fn insert_inventory_item(&self, item: NewInventoryItem) -> StoreResult<InventoryItem>;
    async fn update_inventory_item(
        &self,
        id: u64,
        patch: InventoryPatch,
    ) -> StoreResult<Option<InventoryItem>>;
    async fn delete_inventory_item(&self, id: u64) -> StoreResult<bool>;
}

#[async_trait]
pub trait TimesheetStore: Send + Sync {
    /// Newest date first, then highest id.
    async fn list_timesheets(&self) -> StoreResult<Vec<Timesheet>>;
    async fn find_timesheet(&self, id: u64) -> StoreResult<Option<Timesheet>>;
    async fn insert_timesheet(&self, timesheet: NewTimesheet) -> StoreResult<Timesheet>;
    async fn update_timesheet(
        &self,
        id: u64,
        patch: TimesheetPatch,
    ) -> StoreResult<Option<Timesheet>>;
    async fn delete_timesheet(&self, id: u64) -> StoreResult<bool>;
}

#[async_trait]
pub trait TimesheetLogStore: Send + Sync {
    /// Persists a new open session and returns it with its assigned id.
    async fn create_log(&self, log: NewTimesheetLog) -> StoreResult<TimesheetLog>;

    /// Most recent open session for the employee: latest `login_time`,
    /// highest id on ties.
    async fn find_open_log_for_employee(&self, employee_id: u64)
    -> StoreResult<Option<TimesheetLog>>;

    /// Closes the session iff it is still open. `Ok(None)` means the id is
    /// unknown or the session was already closed.
    async fn close_log(
        &self,
        id: u64,
        logout_time: DateTime<Utc>,
        logout_location: Option<Location>,
    ) -> StoreResult<Option<TimesheetLog>>;

    /// Every session of the employee, latest `login_time` first.
    async fn list_logs_for_employee(&self, employee_id: u64) -> StoreResult<Vec<TimesheetLog>>;
}

pub trait Store: EmployeeStore + InventoryStore + TimesheetStore + TimesheetLogStore {
    /// Name of the backend currently serving requests.
    fn backend(&self) -> &'static str;
}

/// Ordering shared by every backend for session listings.
pub(crate) fn sort_logs_newest_first(logs: &mut [TimesheetLog]) {
    logs.sort_by(|a, b| {
        b.login_time
            .cmp(&a.login_time)
            .then_with(|| b.id.cmp(&a.id))
    });
}
