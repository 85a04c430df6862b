use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use tracing::{error, warn};

use super::{
    EmployeeStore, InventoryStore, Store, StoreOp, StoreResult, TimesheetLogStore, TimesheetStore,
};
use crate::model::{
    employee::{Employee, EmployeePatch, NewEmployee},
    inventory::{InventoryItem, InventoryPatch, NewInventoryItem},
    timesheet::{NewTimesheet, Timesheet, TimesheetPatch},
    timesheet_log::{Location, NewTimesheetLog, TimesheetLog},
};

/// Serves from `primary` until it reports itself unavailable, then switches
/// every operation, including the failed one, to `fallback` for the rest of
/// the process lifetime.
pub struct FallbackStore {
    primary: Arc<dyn Store>,
    fallback: Arc<dyn Store>,
    degraded: AtomicBool,
}

impl FallbackStore {
    pub fn new(primary: Arc<dyn Store>, fallback: Arc<dyn Store>) -> Self {
        Self {
            primary,
            fallback,
            degraded: AtomicBool::new(false),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    async fn route<'a, T, F>(&'a self, op: StoreOp, call: F) -> StoreResult<T>
    where
        T: Send + 'a,
        F: Fn(&'a dyn Store) -> BoxFuture<'a, StoreResult<T>> + Send,
    {
        if self.is_degraded() {
            return call(self.fallback.as_ref()).await;
        }

        match call(self.primary.as_ref()).await {
            Err(e) if e.is_unavailable() => {
                if !self.degraded.swap(true, Ordering::AcqRel) {
                    error!(
                        %op,
                        error = %e,
                        primary = self.primary.backend(),
                        fallback = self.fallback.backend(),
                        "Primary store unavailable, switching to fallback"
                    );
                } else {
                    warn!(%op, error = %e, "Primary store unavailable");
                }
                call(self.fallback.as_ref()).await
            }
            result => result,
        }
    }
}

#[async_trait]
impl EmployeeStore for FallbackStore {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        self.route(StoreOp::ListEmployees, |s| s.list_employees())
            .await
    }

    async fn find_employee(&self, id: u64) -> StoreResult<Option<Employee>> {
        self.route(StoreOp::FindEmployee, move |s| s.find_employee(id))
            .await
    }

    async fn insert_employee(&self, employee: NewEmployee) -> StoreResult<Employee> {
        self.route(StoreOp::InsertEmployee, move |s| {
            s.insert_employee(employee.clone())
        })
        .await
    }

    async fn update_employee(
        &self,
        id: u64,
        patch: EmployeePatch,
    ) -> StoreResult<Option<Employee>> {
        self.route(StoreOp::UpdateEmployee, move |s| {
            s.update_employee(id, patch.clone())
        })
        .await
    }

    async fn delete_employee(&self, id: u64) -> StoreResult<bool> {
        self.route(StoreOp::DeleteEmployee, move |s| s.delete_employee(id))
            .await
    }
}

#[async_trait]
impl InventoryStore for FallbackStore {
    async fn list_inventory(&self) -> StoreResult<Vec<InventoryItem>> {
        self.route(StoreOp::ListInventory, |s| s.list_inventory())
            .await
    }

    async fn find_inventory_item(&self, id: u64) -> StoreResult<Option<InventoryItem>> {
        self.route(StoreOp::FindInventoryItem, move |s| {
            s.find_inventory_item(id)
        })
        .await
    }

    async fn insert_inventory_item(&self, item: NewInventoryItem) -> StoreResult<InventoryItem> {
        self.route(StoreOp::InsertInventoryItem, move |s| {
            s.insert_inventory_item(item.clone())
        })
        .await
    }

    async fn update_inventory_item(
        &self,
        id: u64,
        patch: InventoryPatch,
    ) -> StoreResult<Option<InventoryItem>> {
        self.route(StoreOp::UpdateInventoryItem, move |s| {
            s.update_inventory_item(id, patch.clone())
        })
        .await
    }

    async fn delete_inventory_item(&self, id: u64) -> StoreResult<bool> {
        self.route(StoreOp::DeleteInventoryItem, move |s| {
            s.delete_inventory_item(id)
        })
        .await
    }
}

#[async_trait]
impl TimesheetStore for FallbackStore {
    async fn list_timesheets(&self) -> StoreResult<Vec<Timesheet>> {
        self.route(StoreOp::ListTimesheets, |s| s.list_timesheets())
            .await
    }

    async fn find_timesheet(&self, id: u64) -> StoreResult<Option<Timesheet>> {
        self.route(StoreOp::FindTimesheet, move |s| s.find_timesheet(id))
            .await
    }

    async fn insert_timesheet(&self, timesheet: NewTimesheet) -> StoreResult<Timesheet> {
        self.route(StoreOp::InsertTimesheet, move |s| {
            s.insert_timesheet(timesheet.clone())
        })
        .await
    }

    async fn update_timesheet(
        &self,
        id: u64,
        patch: TimesheetPatch,
    ) -> StoreResult<Option<Timesheet>> {
        self.route(StoreOp::UpdateTimesheet, move |s| {
            s.update_timesheet(id, patch.clone())
        })
        .await
    }

    async fn delete_timesheet(&self, id: u64) -> StoreResult<bool> {
        self.route(StoreOp::DeleteTimesheet, move |s| s.delete_timesheet(id))
            .await
    }
}

#[async_trait]
impl TimesheetLogStore for FallbackStore {
    async fn create_log(&self, log: NewTimesheetLog) -> StoreResult<TimesheetLog> {
        self.route(StoreOp::CreateSession, move |s| s.create_log(log.clone()))
            .await
    }

    async fn find_open_log_for_employee(
        &self,
        employee_id: u64,
    ) -> StoreResult<Option<TimesheetLog>> {
        self.route(StoreOp::FindOpenSession, move |s| {
            s.find_open_log_for_employee(employee_id)
        })
        .await
    }

    async fn close_log(
        &self,
        id: u64,
        logout_time: DateTime<Utc>,
        logout_location: Option<Location>,
    ) -> StoreResult<Option<TimesheetLog>> {
        self.route(StoreOp::CloseSession, move |s| {
            s.close_log(id, logout_time, logout_location)
        })
        .await
    }

    async fn list_logs_for_employee(&self, employee_id: u64) -> StoreResult<Vec<TimesheetLog>> {
        self.route(StoreOp::ListSessions, move |s| {
            s.list_logs_for_employee(employee_id)
        })
        .await
    }
}

impl Store for FallbackStore {
    fn backend(&self) -> &'static str {
        if self.is_degraded() {
            self.fallback.backend()
        } else {
            self.primary.backend()
        }
    }
}
