use log::warn;

use crate::config::Config;
use crate::db::{self, queries};
use crate::errors::AppError;
use crate::utils::report;

pub const DEPARTMENT_ID: i32 = 1;

/// Which of the two server-side calls came back without error.
#[derive(Debug, PartialEq, Eq)]
pub struct CallResults {
    pub procedure_ok: bool,
    pub function_ok: bool,
}

/// Makes both calls in turn. A failure is reported where it happens and
/// never skips the other call.
pub fn call_both<P, F>(procedure: P, function: F) -> CallResults
where
    P: FnOnce() -> Result<u32, AppError>,
    F: FnOnce() -> Result<f64, AppError>,
{
    println!("  Testing stored procedure (get_employee_count)...");
    let procedure_ok = match procedure() {
        Ok(count) => {
            println!("    IT department has {} employees", count);
            true
        }
        Err(err) => {
            report::failure(&err);
            false
        }
    };

    println!("  Testing function (get_department_budget)...");
    let function_ok = match function() {
        Ok(budget) => {
            println!("    IT department total budget: ${:.2}", budget);
            true
        }
        Err(err) => {
            report::failure(&err);
            false
        }
    };

    CallResults { procedure_ok, function_ok }
}

pub fn run(config: &Config) -> Result<(), AppError> {
    let pool = db::open(config)?;
    let conn = db::checkout(&pool)?;

    let results = call_both(
        || queries::employee_count(&conn, DEPARTMENT_ID),
        || queries::department_budget(&conn, DEPARTMENT_ID),
    );
    if !(results.procedure_ok && results.function_ok) {
        warn!("server-side calls finished with failures: {:?}", results);
    }

    report::success("Stored procedures and functions successful!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn failing_procedure_does_not_skip_function() {
        let function_called = Cell::new(false);
        let results = call_both(
            || Err(AppError::query("Failed to call stored procedure", "ORA-06550")),
            || {
                function_called.set(true);
                Ok(250000.0)
            },
        );
        assert!(function_called.get());
        assert_eq!(results, CallResults { procedure_ok: false, function_ok: true });
    }

    #[test]
    fn failing_function_keeps_procedure_result() {
        let results = call_both(
            || Ok(4),
            || Err(AppError::query("Failed to call function", "ORA-00904")),
        );
        assert_eq!(results, CallResults { procedure_ok: true, function_ok: false });
    }

    #[test]
    fn both_failing_are_both_attempted() {
        let attempts = Cell::new(0);
        let results = call_both(
            || {
                attempts.set(attempts.get() + 1);
                Err(AppError::query("Failed to call stored procedure", "ORA-06550"))
            },
            || {
                attempts.set(attempts.get() + 1);
                Err(AppError::query("Failed to call function", "ORA-00904"))
            },
        );
        assert_eq!(attempts.get(), 2);
        assert_eq!(results, CallResults { procedure_ok: false, function_ok: false });
    }
}
