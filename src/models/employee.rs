use std::fmt;

use chrono::NaiveDateTime;
use oracle::{Row, RowValue};
use serde::{Deserialize, Serialize};

/// One row of `employees`, decoded by position:
/// `emp_id, first_name, last_name, email, job_title, salary, dept_id, hire_date, status`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub job_title: String,
    pub salary: f64,
    pub dept_id: i32,
    pub hire_date: NaiveDateTime,
    pub status: String,
}

impl RowValue for Employee {
    fn get(row: &Row) -> oracle::Result<Self> {
        Ok(Employee {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            email: row.get(3)?,
            job_title: row.get(4)?,
            salary: row.get(5)?,
            dept_id: row.get(6)?,
            hire_date: row.get(7)?,
            status: row.get(8)?,
        })
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} ({}) - ${:.2}",
            self.id, self.first_name, self.last_name, self.job_title, self.salary
        )
    }
}

/// The four columns the salary filter selects: `emp_id, first_name, last_name, salary`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EmployeeSalary {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub salary: f64,
}

impl RowValue for EmployeeSalary {
    fn get(row: &Row) -> oracle::Result<Self> {
        Ok(EmployeeSalary {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            salary: row.get(3)?,
        })
    }
}

impl fmt::Display for EmployeeSalary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {} - ${:.2}", self.id, self.first_name, self.last_name, self.salary)
    }
}

/// Values bound into the insert; id, hire date and status come from column defaults.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub job_title: String,
    pub salary: f64,
    pub dept_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn employee() -> Employee {
        Employee {
            id: 101,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada.lovelace@company.com".to_string(),
            job_title: "Engineer".to_string(),
            salary: 85000.5,
            dept_id: 1,
            hire_date: NaiveDate::from_ymd_opt(2020, 3, 15)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            status: "ACTIVE".to_string(),
        }
    }

    #[test]
    fn display_rounds_salary_to_cents() {
        assert_eq!(employee().to_string(), "101: Ada Lovelace (Engineer) - $85000.50");
    }

    #[test]
    fn salary_row_display() {
        let row = EmployeeSalary {
            id: 7,
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            salary: 70000.0,
        };
        assert_eq!(row.to_string(), "7: Grace Hopper - $70000.00");
    }

    #[test]
    fn serializes_hire_date() {
        let json = serde_json::to_value(employee()).unwrap();
        assert_eq!(json["hire_date"], "2020-03-15T09:00:00");
        assert_eq!(json["dept_id"], 1);
    }
}
