use std::fmt;

use oracle::{Row, RowValue};
use serde::{Deserialize, Serialize};

/// One row of `departments`, decoded by position:
/// `dept_id, dept_name, location, manager_id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Department {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub manager_id: Option<i32>,
}

impl Department {
    pub fn manager_info(&self) -> String {
        match self.manager_id {
            Some(id) => format!("Manager ID: {}", id),
            None => "No manager".to_string(),
        }
    }
}

impl RowValue for Department {
    fn get(row: &Row) -> oracle::Result<Self> {
        Ok(Department {
            id: row.get(0)?,
            name: row.get(1)?,
            location: row.get(2)?,
            manager_id: row.get(3)?,
        })
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({}) - {}", self.id, self.name, self.location, self.manager_info())
    }
}

/// Employees per department, departments without staff included.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DepartmentHeadcount {
    pub name: String,
    pub employees: u32,
}

impl RowValue for DepartmentHeadcount {
    fn get(row: &Row) -> oracle::Result<Self> {
        Ok(DepartmentHeadcount {
            name: row.get(0)?,
            employees: row.get(1)?,
        })
    }
}

impl fmt::Display for DepartmentHeadcount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} employees", self.name, self.employees)
    }
}
