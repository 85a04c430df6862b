use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_TIMESHEET_STATUS: &str = "Submitted";

/// Manually entered timesheet, independent of the login/logout clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Timesheet {
    pub id: u64,
    pub employee_id: u64,
    #[schema(example = "2024-01-20", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = 8.0)]
    pub hours_worked: f64,
    #[schema(example = "Website Redesign")]
    pub project: String,
    #[schema(example = "Submitted")]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewTimesheet {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "2024-01-20", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = 8.0)]
    pub hours_worked: f64,
    #[schema(example = "Website Redesign")]
    pub project: String,
    pub status: Option<String>,
}

fn check_hours(hours: f64) -> Result<(), String> {
    if !hours.is_finite() || !(0.0..=24.0).contains(&hours) {
        return Err("hours_worked must be between 0 and 24".to_string());
    }
    Ok(())
}

impl NewTimesheet {
    pub fn validate(&self) -> Result<(), String> {
        if self.employee_id == 0 {
            return Err("employee_id is required".to_string());
        }
        check_hours(self.hours_worked)
    }

    pub fn into_timesheet(self, id: u64) -> Timesheet {
        Timesheet {
            id,
            employee_id: self.employee_id,
            date: self.date,
            hours_worked: self.hours_worked,
            project: self.project,
            status: self
                .status
                .unwrap_or_else(|| DEFAULT_TIMESHEET_STATUS.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct TimesheetPatch {
    pub employee_id: Option<u64>,
    #[schema(format = "date", value_type = Option<String>)]
    pub date: Option<NaiveDate>,
    pub hours_worked: Option<f64>,
    pub project: Option<String>,
    pub status: Option<String>,
}

impl TimesheetPatch {
    pub fn is_empty(&self) -> bool {
        self.employee_id.is_none()
            && self.date.is_none()
            && self.hours_worked.is_none()
            && self.project.is_none()
            && self.status.is_none()
    }

    pub fn validate(&self) -> Result<(), String> {
        match self.hours_worked {
            Some(hours) => check_hours(hours),
            None => Ok(()),
        }
    }
}

impl Timesheet {
    pub fn apply(&mut self, patch: TimesheetPatch) {
        if let Some(employee_id) = patch.employee_id {
            self.employee_id = employee_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(hours_worked) = patch.hours_worked {
            self.hours_worked = hours_worked;
        }
        if let Some(project) = patch.project {
            self.project = project;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}
