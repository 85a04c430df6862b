pub mod attendance;
pub mod employee;
pub mod health;
pub mod inventory;
pub mod timesheet;
