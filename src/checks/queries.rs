use crate::config::Config;
use crate::db::{self, queries};
use crate::errors::AppError;
use crate::utils::report;

pub const EMPLOYEE_LIMIT: u32 = 5;

pub fn run(config: &Config) -> Result<(), AppError> {
    let pool = db::open(config)?;
    let conn = db::checkout(&pool)?;

    println!("  Querying departments...");
    for department in queries::get_departments(&conn)? {
        println!("    {}", department);
    }

    println!("  Querying employees...");
    for employee in queries::get_employees(&conn, EMPLOYEE_LIMIT)? {
        println!("    {}", employee);
    }

    println!("  Employee count by department:");
    for headcount in queries::department_headcounts(&conn)? {
        println!("    {}", headcount);
    }

    report::success("Query operations successful!");
    Ok(())
}
