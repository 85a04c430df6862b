use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{
    EmployeeStore, InventoryStore, Store, StoreError, StoreOp, StoreResult, TimesheetLogStore,
    TimesheetStore, seed, sort_logs_newest_first,
};
use crate::model::{
    employee::{Employee, EmployeePatch, NewEmployee},
    inventory::{InventoryItem, InventoryPatch, NewInventoryItem},
    timesheet::{NewTimesheet, Timesheet, TimesheetPatch},
    timesheet_log::{LogStatus, Location, NewTimesheetLog, TimesheetLog},
};

#[derive(Default)]
struct Tables {
    employees: Vec<Employee>,
    inventory: Vec<InventoryItem>,
    timesheets: Vec<Timesheet>,
    logs: Vec<TimesheetLog>,
    next_employee_id: u64,
    next_item_id: u64,
    next_timesheet_id: u64,
    next_log_id: u64,
}

fn take_id(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

/// Process-local store. Each instance owns its tables, so tests never share
/// state.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the demo employee registry.
    pub fn seeded() -> Self {
        let employees = seed::demo_employees();
        let next_employee_id = employees.iter().map(|e| e.id).max().unwrap_or(0);
        Self {
            tables: Mutex::new(Tables {
                employees,
                next_employee_id,
                ..Default::default()
            }),
        }
    }

    fn tables(&self, op: StoreOp) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| StoreError::Unavailable {
            op,
            reason: "in-memory tables poisoned".to_string(),
        })
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        let tables = self.tables(StoreOp::ListEmployees)?;
        let mut employees = tables.employees.clone();
        employees.sort_by_key(|e| e.id);
        Ok(employees)
    }

    async fn find_employee(&self, id: u64) -> StoreResult<Option<Employee>> {
        let tables = self.tables(StoreOp::FindEmployee)?;
        Ok(tables.employees.iter().find(|e| e.id == id).cloned())
    }

    async fn insert_employee(&self, employee: NewEmployee) -> StoreResult<Employee> {
        let mut tables = self.tables(StoreOp::InsertEmployee)?;
        let id = take_id(&mut tables.next_employee_id);
        let employee = employee.into_employee(id);
        tables.employees.push(employee.clone());
        Ok(employee)
    }

    async fn update_employee(
        &self,
        id: u64,
        patch: EmployeePatch,
    ) -> StoreResult<Option<Employee>> {
        let mut tables = self.tables(StoreOp::UpdateEmployee)?;
        Ok(tables
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| {
                e.apply(patch);
                e.clone()
            }))
    }

    async fn delete_employee(&self, id: u64) -> StoreResult<bool> {
        let mut tables = self.tables(StoreOp::DeleteEmployee)?;
        let before = tables.employees.len();
        tables.employees.retain(|e| e.id != id);
        Ok(tables.employees.len() != before)
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn list_inventory(&self) -> StoreResult<Vec<InventoryItem>> {
        let tables = self.tables(StoreOp::ListInventory)?;
        let mut items = tables.inventory.clone();
        items.sort_by_key(|i| i.id);
        Ok(items)
    }

    async fn find_inventory_item(&self, id: u64) -> StoreResult<Option<InventoryItem>> {
        let tables = self.tables(StoreOp::FindInventoryItem)?;
        Ok(tables.inventory.iter().find(|i| i.id == id).cloned())
    }

    async fn insert_inventory_item(&self, item: NewInventoryItem) -> StoreResult<InventoryItem> {
        let mut tables = self.tables(StoreOp::InsertInventoryItem)?;
        let id = take_id(&mut tables.next_item_id);
        let item = item.into_item(id);
        tables.inventory.push(item.clone());
        Ok(item)
    }

    async fn update_inventory_item(
        &self,
        id: u64,
        patch: InventoryPatch,
    ) -> StoreResult<Option<InventoryItem>> {
        let mut tables = self.tables(StoreOp::UpdateInventoryItem)?;
        Ok(tables
            .inventory
            .iter_mut()
            .find(|i| i.id == id)
            .map(|i| {
                i.apply(patch);
                i.clone()
            }))
    }

    async fn delete_inventory_item(&self, id: u64) -> StoreResult<bool> {
        let mut tables = self.tables(StoreOp::DeleteInventoryItem)?;
        let before = tables.inventory.len();
        tables.inventory.retain(|i| i.id != id);
        Ok(tables.inventory.len() != before)
    }
}

#[async_trait]
impl TimesheetStore for MemoryStore {
    async fn list_timesheets(&self) -> StoreResult<Vec<Timesheet>> {
        let tables = self.tables(StoreOp::ListTimesheets)?;
        let mut timesheets = tables.timesheets.clone();
        timesheets.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(timesheets)
    }

    async fn find_timesheet(&self, id: u64) -> StoreResult<Option<Timesheet>> {
        let tables = self.tables(StoreOp::FindTimesheet)?;
        Ok(tables.timesheets.iter().find(|t| t.id == id).cloned())
    }

    async fn insert_timesheet(&self, timesheet: NewTimesheet) -> StoreResult<Timesheet> {
        let mut tables = self.tables(StoreOp::InsertTimesheet)?;
        let id = take_id(&mut tables.next_timesheet_id);
        let timesheet = timesheet.into_timesheet(id);
        tables.timesheets.push(timesheet.clone());
        Ok(timesheet)
    }

    async fn update_timesheet(
        &self,
        id: u64,
        patch: TimesheetPatch,
    ) -> StoreResult<Option<Timesheet>> {
        let mut tables = self.tables(StoreOp::UpdateTimesheet)?;
        Ok(tables
            .timesheets
            .iter_mut()
            .find(|t| t.id == id)
            .map(|t| {
                t.apply(patch);
                t.clone()
            }))
    }

    async fn delete_timesheet(&self, id: u64) -> StoreResult<bool> {
        let mut tables = self.tables(StoreOp::DeleteTimesheet)?;
        let before = tables.timesheets.len();
        tables.timesheets.retain(|t| t.id != id);
        Ok(tables.timesheets.len() != before)
    }
}

#[async_trait]
impl TimesheetLogStore for MemoryStore {
    async fn create_log(&self, log: NewTimesheetLog) -> StoreResult<TimesheetLog> {
        let mut tables = self.tables(StoreOp::CreateSession)?;
        let id = take_id(&mut tables.next_log_id);
        let log = log.into_log(id);
        tables.logs.push(log.clone());
        Ok(log)
    }

    async fn find_open_log_for_employee(
        &self,
        employee_id: u64,
    ) -> StoreResult<Option<TimesheetLog>> {
        let tables = self.tables(StoreOp::FindOpenSession)?;
        Ok(tables
            .logs
            .iter()
            .filter(|l| l.employee_id == employee_id && l.is_open())
            .max_by(|a, b| a.login_time.cmp(&b.login_time).then_with(|| a.id.cmp(&b.id)))
            .cloned())
    }

    async fn close_log(
        &self,
        id: u64,
        logout_time: DateTime<Utc>,
        logout_location: Option<Location>,
    ) -> StoreResult<Option<TimesheetLog>> {
        let mut tables = self.tables(StoreOp::CloseSession)?;
        Ok(tables
            .logs
            .iter_mut()
            .find(|l| l.id == id && l.is_open())
            .map(|l| {
                l.logout_time = Some(logout_time);
                l.logout_location = logout_location;
                l.status = LogStatus::LoggedOut;
                l.clone()
            }))
    }

    async fn list_logs_for_employee(&self, employee_id: u64) -> StoreResult<Vec<TimesheetLog>> {
        let tables = self.tables(StoreOp::ListSessions)?;
        let mut logs: Vec<_> = tables
            .logs
            .iter()
            .filter(|l| l.employee_id == employee_id)
            .cloned()
            .collect();
        sort_logs_newest_first(&mut logs);
        Ok(logs)
    }
}

impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, 0).unwrap()
    }

    fn open(employee_id: u64, login_time: DateTime<Utc>) -> NewTimesheetLog {
        NewTimesheetLog {
            employee_id,
            login_time,
            login_location: None,
            device_type: None,
            device_id: None,
        }
    }

    #[actix_web::test]
    async fn open_lookup_prefers_latest_login_then_highest_id() {
        let store = MemoryStore::new();
        store.create_log(open(7, at(9, 0))).await.unwrap();
        let tie_a = store.create_log(open(7, at(10, 0))).await.unwrap();
        let tie_b = store.create_log(open(7, at(10, 0))).await.unwrap();
        store.create_log(open(8, at(11, 0))).await.unwrap();

        let found = store.find_open_log_for_employee(7).await.unwrap().unwrap();
        assert_eq!(found.id, tie_b.id);
        assert!(tie_b.id > tie_a.id);
    }

    #[actix_web::test]
    async fn close_is_a_one_shot_transition() {
        let store = MemoryStore::new();
        let log = store.create_log(open(3, at(9, 0))).await.unwrap();

        let closed = store.close_log(log.id, at(17, 0), None).await.unwrap().unwrap();
        assert_eq!(closed.status, LogStatus::LoggedOut);
        assert_eq!(closed.logout_time, Some(at(17, 0)));

        assert!(store.close_log(log.id, at(18, 0), None).await.unwrap().is_none());
        assert!(store.find_open_log_for_employee(3).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn seeded_store_continues_employee_ids() {
        let store = MemoryStore::seeded();
        assert_eq!(store.list_employees().await.unwrap().len(), 4);

        let created = store
            .insert_employee(NewEmployee {
                name: "Tom Lee".to_string(),
                email: "tom@company.com".to_string(),
                phone: None,
                department: "Sales".to_string(),
                role: "Junior".to_string(),
                salary: 50000.0,
                start_date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(created.id, 5);
        assert_eq!(created.status, "Active");

        assert!(store.delete_employee(5).await.unwrap());
        assert!(!store.delete_employee(5).await.unwrap());
    }
}
