use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_EMPLOYEE_STATUS: &str = "Active";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "John Smith",
        "email": "john@company.com",
        "phone": "(555) 123-4567",
        "department": "Engineering",
        "role": "Senior",
        "salary": 85000.0,
        "start_date": "2023-01-15",
        "status": "Active"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "John Smith")]
    pub name: String,

    #[schema(example = "john@company.com")]
    pub email: String,

    #[schema(example = "(555) 123-4567", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "Senior")]
    pub role: String,

    #[schema(example = 85000.0)]
    pub salary: f64,

    #[schema(example = "2023-01-15", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "Active")]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewEmployee {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@company.com", format = "email")]
    pub email: String,
    #[schema(example = "(555) 987-6543")]
    pub phone: Option<String>,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "Junior")]
    pub role: String,
    #[schema(example = 65000.0)]
    pub salary: f64,
    #[schema(example = "2024-02-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    /// Defaults to `Active`
    #[schema(example = "Active")]
    pub status: Option<String>,
}

impl NewEmployee {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.email.trim().is_empty() {
            return Err("email must not be empty".to_string());
        }
        if !self.salary.is_finite() || self.salary < 0.0 {
            return Err("salary must be a non-negative number".to_string());
        }
        Ok(())
    }

    pub fn into_employee(self, id: u64) -> Employee {
        Employee {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            department: self.department,
            role: self.role,
            salary: self.salary,
            start_date: self.start_date,
            status: self
                .status
                .unwrap_or_else(|| DEFAULT_EMPLOYEE_STATUS.to_string()),
        }
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub salary: Option<f64>,
    #[schema(example = "2026-01-01", format = "date", value_type = Option<String>)]
    pub start_date: Option<NaiveDate>,
    pub status: Option<String>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.department.is_none()
            && self.role.is_none()
            && self.salary.is_none()
            && self.start_date.is_none()
            && self.status.is_none()
    }
}

impl Employee {
    pub fn apply(&mut self, patch: EmployeePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(department) = patch.department {
            self.department = department;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(salary) = patch.salary {
            self.salary = salary;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    #[schema(example = 4)]
    pub total: usize,
    #[schema(example = 3)]
    pub active: usize,
    pub departments: BTreeMap<String, usize>,
    #[schema(example = 87500.0)]
    pub avg_salary: f64,
}

impl EmployeeStats {
    pub fn from_employees(employees: &[Employee]) -> Self {
        let mut departments = BTreeMap::new();
        for employee in employees {
            *departments.entry(employee.department.clone()).or_insert(0) += 1;
        }

        let avg_salary = if employees.is_empty() {
            0.0
        } else {
            employees.iter().map(|e| e.salary).sum::<f64>() / employees.len() as f64
        };

        Self {
            total: employees.len(),
            active: employees
                .iter()
                .filter(|e| e.status == DEFAULT_EMPLOYEE_STATUS)
                .count(),
            departments,
            avg_salary,
        }
    }
}
