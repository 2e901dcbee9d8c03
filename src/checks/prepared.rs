use std::fmt;

use log::debug;
use oracle::RowValue;

use crate::config::Config;
use crate::db::{self, queries};
use crate::errors::AppError;
use crate::models::employee::EmployeeSalary;
use crate::utils::report;

pub const DEPARTMENT_ID: i32 = 1;
pub const SALARY_THRESHOLD: f64 = 70000.0;

/// How a walk over a result set went.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RowTally {
    pub decoded: usize,
    pub skipped: usize,
}

/// Decodes every row and hands it to `on_row`. A row that fails to decode is
/// reported and skipped; a cursor failure stops the walk and fails it.
pub fn for_each_row<I, R, E, T, DE, D, F>(
    rows: I,
    mut decode: D,
    mut on_row: F,
) -> Result<RowTally, AppError>
where
    I: IntoIterator<Item = Result<R, E>>,
    E: fmt::Display,
    D: FnMut(&R) -> Result<T, DE>,
    DE: fmt::Display,
    F: FnMut(T),
{
    let mut tally = RowTally::default();
    for row in rows {
        let row = row.map_err(|err| AppError::query("Error iterating rows", err))?;
        match decode(&row) {
            Ok(record) => {
                on_row(record);
                tally.decoded += 1;
            }
            Err(err) => {
                report::failure(&AppError::scan("Failed to scan row", err));
                tally.skipped += 1;
            }
        }
    }
    Ok(tally)
}

pub fn run(config: &Config) -> Result<(), AppError> {
    let pool = db::open(config)?;
    let conn = db::checkout(&pool)?;

    debug!("prepare: {}", queries::HIGH_EARNERS_SQL);
    let mut stmt = conn
        .statement(queries::HIGH_EARNERS_SQL)
        .build()
        .map_err(|err| AppError::query("Failed to prepare statement", err))?;

    let rows = stmt
        .query(&[&DEPARTMENT_ID, &SALARY_THRESHOLD])
        .map_err(|err| AppError::query("Failed to execute prepared statement", err))?;

    println!("  IT employees with salary > $70,000:");
    let tally = for_each_row(rows, EmployeeSalary::get, |employee| {
        println!("    {}", employee)
    })?;
    debug!("{} rows decoded, {} skipped", tally.decoded, tally.skipped);

    report::success("Prepared statements successful!");
    Ok(())
}
