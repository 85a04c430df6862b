use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};
use utoipa::ToSchema;

/// Lifecycle of an attendance session. `LoggedOut` is terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LogStatus {
    LoggedIn,
    LoggedOut,
}

/// GPS fix captured at login or logout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    #[schema(example = 40.7128)]
    pub latitude: f64,
    #[schema(example = -74.006)]
    pub longitude: f64,
}

impl Location {
    /// Builds a location from the flat optional fields used on the wire.
    ///
    /// Both absent is fine (no fix). One without the other, a non-finite
    /// value, or a value outside the WGS84 range is rejected.
    pub fn from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Self>, String> {
        match (latitude, longitude) {
            (None, None) => Ok(None),
            (Some(latitude), Some(longitude)) => {
                if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
                    return Err(format!("latitude {latitude} is out of range [-90, 90]"));
                }
                if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
                    return Err(format!(
                        "longitude {longitude} is out of range [-180, 180]"
                    ));
                }
                Ok(Some(Self {
                    latitude,
                    longitude,
                }))
            }
            _ => Err("latitude and longitude must be supplied together".to_string()),
        }
    }
}

/// One login-to-logout attendance interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 17,
        "employee_id": 1,
        "login_time": "2024-01-15T09:00:00Z",
        "login_location": { "latitude": 40.7128, "longitude": -74.006 },
        "logout_time": null,
        "logout_location": null,
        "device_type": "iPhone",
        "device_id": "555-0123",
        "status": "logged_in"
    })
)]
pub struct TimesheetLog {
    pub id: u64,
    pub employee_id: u64,
    #[schema(value_type = String, format = "date-time")]
    pub login_time: DateTime<Utc>,
    pub login_location: Option<Location>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub logout_time: Option<DateTime<Utc>>,
    pub logout_location: Option<Location>,
    pub device_type: Option<String>,
    pub device_id: Option<String>,
    pub status: LogStatus,
}

impl TimesheetLog {
    pub fn is_open(&self) -> bool {
        self.status == LogStatus::LoggedIn
    }
}

/// Fields for a session that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewTimesheetLog {
    pub employee_id: u64,
    pub login_time: DateTime<Utc>,
    pub login_location: Option<Location>,
    pub device_type: Option<String>,
    pub device_id: Option<String>,
}

impl NewTimesheetLog {
    pub fn into_log(self, id: u64) -> TimesheetLog {
        TimesheetLog {
            id,
            employee_id: self.employee_id,
            login_time: self.login_time,
            login_location: self.login_location,
            logout_time: None,
            logout_location: None,
            device_type: self.device_type,
            device_id: self.device_id,
            status: LogStatus::LoggedIn,
        }
    }
}

/// Result of closing a session.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(
    example = json!({
        "log_id": 17,
        "employee_id": 1,
        "logout_time": "2024-01-15T17:00:00Z",
        "hours_worked": 8.0,
        "status": "logged_out",
        "location": { "latitude": 40.7128, "longitude": -74.006 }
    })
)]
pub struct LogoutSummary {
    pub log_id: u64,
    pub employee_id: u64,
    #[schema(value_type = String, format = "date-time")]
    pub logout_time: DateTime<Utc>,
    pub hours_worked: f64,
    pub status: LogStatus,
    pub location: Option<Location>,
}
