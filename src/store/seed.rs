use chrono::NaiveDate;

use crate::model::employee::Employee;

#[allow(clippy::too_many_arguments)]
fn employee(
    id: u64,
    name: &str,
    email: &str,
    phone: &str,
    department: &str,
    role: &str,
    salary: f64,
    start_date: (i32, u32, u32),
    status: &str,
) -> Option<Employee> {
    let (y, m, d) = start_date;
    Some(Employee {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: Some(phone.to_string()),
        department: department.to_string(),
        role: role.to_string(),
        salary,
        start_date: NaiveDate::from_ymd_opt(y, m, d)?,
        status: status.to_string(),
    })
}

/// Demo registry served while the database is unreachable.
pub fn demo_employees() -> Vec<Employee> {
    [
        employee(
            1,
            "John Smith",
            "john@company.com",
            "(555) 123-4567",
            "Engineering",
            "Senior",
            85000.0,
            (2023, 1, 15),
            "Active",
        ),
        employee(
            2,
            "Sarah Johnson",
            "sarah@company.com",
            "(555) 234-5678",
            "Marketing",
            "Manager",
            95000.0,
            (2022, 11, 20),
            "Active",
        ),
        employee(
            3,
            "Mike Davis",
            "mike@company.com",
            "(555) 345-6789",
            "Sales",
            "Senior",
            78000.0,
            (2023, 3, 10),
            "On Leave",
        ),
        employee(
            4,
            "Lisa Wilson",
            "lisa@company.com",
            "(555) 456-7890",
            "HR",
            "Manager",
            92000.0,
            (2022, 8, 5),
            "Active",
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}
