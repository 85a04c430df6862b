pub mod employee;
pub mod inventory;
pub mod timesheet;
pub mod timesheet_log;
