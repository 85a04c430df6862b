use std::collections::HashMap;
use std::sync::{Arc, PoisonError, Weak};

use chrono::{DateTime, Utc};
use futures::lock::Mutex;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::clock::Clock;
use crate::model::timesheet_log::{LogStatus, Location, LogoutSummary, NewTimesheetLog, TimesheetLog};
use crate::store::{Store, StoreError};

/// Table size below which dead lock entries are left alone.
const LOCK_SWEEP_FLOOR: usize = 1024;

const MILLIS_PER_HOUR: i64 = 3_600_000;

#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("{0}")]
    Validation(String),

    #[error("No active login session found for employee {employee_id}")]
    NoActiveSession { employee_id: u64 },

    #[error("Employee {employee_id} is already logged in (session {log_id})")]
    AlreadyLoggedIn { employee_id: u64, log_id: u64 },

    #[error("Logout at {logout_time} precedes login at {login_time} for session {log_id}")]
    ClockSkew {
        log_id: u64,
        login_time: DateTime<Utc>,
        logout_time: DateTime<Utc>,
    },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

pub type AttendanceResult<T> = Result<T, AttendanceError>;

/// Hours between two instants, rounded half-up to two decimals.
///
/// Works on whole milliseconds so `8h` is exactly `8.0` and `30m` is `0.5`.
/// Callers guarantee `logout >= login`.
pub fn hours_between(login: DateTime<Utc>, logout: DateTime<Utc>) -> f64 {
    let millis = (logout - login).num_milliseconds().max(0);
    let hundredths = (millis * 100 + MILLIS_PER_HOUR / 2) / MILLIS_PER_HOUR;
    hundredths as f64 / 100.0
}

fn validate_employee_id(employee_id: u64) -> AttendanceResult<()> {
    if employee_id == 0 {
        return Err(AttendanceError::Validation(
            "employee_id is required".to_string(),
        ));
    }
    Ok(())
}

#[derive(Default)]
struct LockTable {
    locks: HashMap<u64, Weak<Mutex<()>>>,
    sweep_at: usize,
}

/// Per-employee async locks.
///
/// The table only holds weak handles, so an entry stays alive exactly as long
/// as some caller holds or waits on its mutex. Dead entries are swept once
/// the table has doubled since the previous sweep.
#[derive(Default)]
struct EmployeeLocks {
    table: std::sync::Mutex<LockTable>,
}

impl EmployeeLocks {
    fn handle(&self, employee_id: u64) -> Arc<Mutex<()>> {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(lock) = table.locks.get(&employee_id).and_then(Weak::upgrade) {
            return lock;
        }

        let lock = Arc::new(Mutex::new(()));
        table.locks.insert(employee_id, Arc::downgrade(&lock));

        if table.locks.len() > table.sweep_at {
            table.locks.retain(|_, entry| entry.strong_count() > 0);
            table.sweep_at = (table.locks.len() * 2).max(LOCK_SWEEP_FLOOR);
        }
        lock
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .locks
            .len()
    }
}

/// Login/logout clock. Keeps at most one open session per employee.
pub struct AttendanceTracker {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    locks: EmployeeLocks,
}

impl AttendanceTracker {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            locks: EmployeeLocks::default(),
        }
    }

    /// Opens a session stamped with the current clock time.
    ///
    /// Fails with [`AttendanceError::AlreadyLoggedIn`] if the employee still
    /// has an open session; nothing is written in that case.
    #[instrument(name = "attendance_login", skip(self, device_type, device_id))]
    pub async fn record_login(
        &self,
        employee_id: u64,
        location: Option<Location>,
        device_type: Option<String>,
        device_id: Option<String>,
    ) -> AttendanceResult<TimesheetLog> {
        validate_employee_id(employee_id)?;

        let lock = self.locks.handle(employee_id);
        let _guard = lock.lock().await;

        if let Some(open) = self.store.find_open_log_for_employee(employee_id).await? {
            info!(log_id = open.id, "Rejected login: session already open");
            return Err(AttendanceError::AlreadyLoggedIn {
                employee_id,
                log_id: open.id,
            });
        }

        let log = self
            .store
            .create_log(NewTimesheetLog {
                employee_id,
                login_time: self.clock.now(),
                login_location: location,
                device_type,
                device_id,
            })
            .await?;

        info!(log_id = log.id, login_time = %log.login_time, "Employee logged in");
        Ok(log)
    }

    /// Closes the employee's most recent open session and reports the hours
    /// worked.
    #[instrument(name = "attendance_logout", skip(self))]
    pub async fn record_logout(
        &self,
        employee_id: u64,
        location: Option<Location>,
    ) -> AttendanceResult<LogoutSummary> {
        validate_employee_id(employee_id)?;

        let lock = self.locks.handle(employee_id);
        let _guard = lock.lock().await;

        let open = self
            .store
            .find_open_log_for_employee(employee_id)
            .await?
            .ok_or(AttendanceError::NoActiveSession { employee_id })?;

        let logout_time = self.clock.now();
        if logout_time < open.login_time {
            warn!(
                log_id = open.id,
                login_time = %open.login_time,
                logout_time = %logout_time,
                "Rejected logout: clock skew"
            );
            return Err(AttendanceError::ClockSkew {
                log_id: open.id,
                login_time: open.login_time,
                logout_time,
            });
        }

        let closed = self
            .store
            .close_log(open.id, logout_time, location)
            .await?
            .ok_or(AttendanceError::NoActiveSession { employee_id })?;

        let hours_worked = hours_between(closed.login_time, logout_time);
        info!(log_id = closed.id, hours_worked, "Employee logged out");

        Ok(LogoutSummary {
            log_id: closed.id,
            employee_id,
            logout_time,
            hours_worked,
            status: LogStatus::LoggedOut,
            location,
        })
    }

    /// All sessions of the employee, most recent login first.
    pub async fn list_logs_for_employee(
        &self,
        employee_id: u64,
    ) -> AttendanceResult<Vec<TimesheetLog>> {
        let logs = self.store.list_logs_for_employee(employee_id).await?;
        debug!(employee_id, count = logs.len(), "Fetched time logs");
        Ok(logs)
    }
}
