use chrono::NaiveDateTime;
use log::debug;
use oracle::sql_type::{OracleType, ToSql};
use oracle::{Connection, RowValue};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::department::{Department, DepartmentHeadcount};
use crate::models::employee::{Employee, NewEmployee};

pub const VERSION_BANNER_SQL: &str = "SELECT banner FROM v$version WHERE ROWNUM = 1";

pub const GREETING_SQL: &str =
    "SELECT 'Hello Oracle from Rust!' AS message, SYSDATE AS current_time FROM DUAL";

pub const DEPARTMENTS_SQL: &str =
    "SELECT dept_id, dept_name, location, manager_id FROM departments ORDER BY dept_id";

// ROWNUM is assigned before ORDER BY, so the limit wraps the ordered query.
pub const LIMITED_EMPLOYEES_SQL: &str = "SELECT * FROM (SELECT emp_id, first_name, last_name, \
     email, job_title, salary, dept_id, hire_date, status FROM employees ORDER BY emp_id) \
     WHERE ROWNUM <= :1";

pub const DEPARTMENT_HEADCOUNT_SQL: &str = "SELECT d.dept_name, COUNT(e.emp_id) AS emp_count \
     FROM departments d LEFT JOIN employees e ON d.dept_id = e.dept_id \
     GROUP BY d.dept_name ORDER BY emp_count DESC, d.dept_name";

pub const INSERT_EMPLOYEE_SQL: &str = "INSERT INTO employees \
     (first_name, last_name, email, job_title, salary, dept_id) \
     VALUES (:1, :2, :3, :4, :5, :6)";

pub const COUNT_BY_EMAIL_SQL: &str = "SELECT COUNT(*) FROM employees WHERE email = :1";

/// No ORDER BY: callers must not rely on row order.
pub const HIGH_EARNERS_SQL: &str = "SELECT emp_id, first_name, last_name, salary \
     FROM employees WHERE dept_id = :1 AND salary > :2";

pub const EMPLOYEE_COUNT_PROC_SQL: &str = "BEGIN get_employee_count(:1, :2); END;";

pub const DEPARTMENT_BUDGET_SQL: &str = "SELECT get_department_budget(:1) FROM DUAL";

pub const POOL_GREETING_SQL: &str = "SELECT 'Pool Connection ' || :1 AS message FROM DUAL";

fn fetch_all<T>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
    what: &str,
) -> Result<Vec<T>, AppError>
where
    T: RowValue + Serialize,
{
    debug!("query: {}", sql);
    let rows = conn
        .query_as::<T>(sql, params)
        .map_err(|err| AppError::query(&format!("Failed to query {}", what), err))?;

    let mut records = Vec::new();
    for row in rows {
        let record =
            row.map_err(|err| AppError::scan(&format!("Failed to scan {} row", what), err))?;
        if log::log_enabled!(log::Level::Debug) {
            debug!("{}", serde_json::to_string(&record).unwrap_or_default());
        }
        records.push(record);
    }
    Ok(records)
}

pub fn server_banner(conn: &Connection) -> Result<String, AppError> {
    debug!("query: {}", VERSION_BANNER_SQL);
    conn.query_row_as::<String>(VERSION_BANNER_SQL, &[])
        .map_err(|err| AppError::query("Failed to get database version", err))
}

pub fn greeting(conn: &Connection) -> Result<(String, NaiveDateTime), AppError> {
    debug!("query: {}", GREETING_SQL);
    conn.query_row_as::<(String, NaiveDateTime)>(GREETING_SQL, &[])
        .map_err(|err| AppError::query("Failed to execute test query", err))
}

pub fn get_departments(conn: &Connection) -> Result<Vec<Department>, AppError> {
    fetch_all(conn, DEPARTMENTS_SQL, &[], "departments")
}

/// The first `limit` employees by id.
pub fn get_employees(conn: &Connection, limit: u32) -> Result<Vec<Employee>, AppError> {
    fetch_all(conn, LIMITED_EMPLOYEES_SQL, &[&limit], "employees")
}

pub fn department_headcounts(conn: &Connection) -> Result<Vec<DepartmentHeadcount>, AppError> {
    fetch_all(conn, DEPARTMENT_HEADCOUNT_SQL, &[], "employee count by department")
}

/// Returns the number of inserted rows.
pub fn insert_employee(conn: &Connection, employee: &NewEmployee) -> Result<u64, AppError> {
    debug!("execute: {}", INSERT_EMPLOYEE_SQL);
    let stmt = conn
        .execute(
            INSERT_EMPLOYEE_SQL,
            &[
                &employee.first_name,
                &employee.last_name,
                &employee.email,
                &employee.job_title,
                &employee.salary,
                &employee.dept_id,
            ],
        )
        .map_err(|err| AppError::query("Failed to insert test employee", err))?;
    stmt.row_count()
        .map_err(|err| AppError::query("Failed to insert test employee", err))
}

pub fn count_employees_by_email(conn: &Connection, email: &str) -> Result<u32, AppError> {
    debug!("query: {}", COUNT_BY_EMAIL_SQL);
    conn.query_row_as::<u32>(COUNT_BY_EMAIL_SQL, &[&email])
        .map_err(|err| AppError::query("Failed to count employees by email", err))
}

/// Calls `get_employee_count` and reads the count back from its OUT parameter.
pub fn employee_count(conn: &Connection, dept_id: i32) -> Result<u32, AppError> {
    debug!("execute: {}", EMPLOYEE_COUNT_PROC_SQL);
    let mut stmt = conn
        .statement(EMPLOYEE_COUNT_PROC_SQL)
        .build()
        .map_err(|err| AppError::query("Failed to call stored procedure", err))?;
    stmt.execute(&[&dept_id, &OracleType::Number(0, 0)])
        .map_err(|err| AppError::query("Failed to call stored procedure", err))?;
    stmt.bind_value(2)
        .map_err(|err| AppError::scan("Failed to read stored procedure output", err))
}

/// Calls `get_department_budget`. A department without salaries has no budget, reported as zero.
pub fn department_budget(conn: &Connection, dept_id: i32) -> Result<f64, AppError> {
    debug!("query: {}", DEPARTMENT_BUDGET_SQL);
    conn.query_row_as::<Option<f64>>(DEPARTMENT_BUDGET_SQL, &[&dept_id])
        .map(|budget| budget.unwrap_or(0.0))
        .map_err(|err| AppError::query("Failed to call function", err))
}

pub fn pool_greeting(conn: &Connection, attempt: u32) -> Result<String, AppError> {
    debug!("query: {}", POOL_GREETING_SQL);
    conn.query_row_as::<String>(POOL_GREETING_SQL, &[&attempt])
        .map_err(|err| AppError::query("Failed to query through pooled connection", err))
}
