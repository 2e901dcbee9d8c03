use crate::config::Config;
use crate::db::{self, queries, Rollback, Transaction};
use crate::errors::AppError;
use crate::models::employee::NewEmployee;
use crate::utils::report;

pub const TEST_EMAIL: &str = "rust.tester@company.com";

pub fn test_employee() -> NewEmployee {
    NewEmployee {
        first_name: "Rust".to_string(),
        last_name: "Tester".to_string(),
        email: TEST_EMAIL.to_string(),
        job_title: "Rust Developer".to_string(),
        salary: 70000.0,
        dept_id: 1,
    }
}

/// Passes a successful step's value through. On failure the transaction is
/// rolled back first and the step's error is returned for reporting.
pub fn or_abort<T, V>(tx: T, step: Result<V, AppError>) -> Result<(T, V), AppError>
where
    T: Rollback,
{
    match step {
        Ok(value) => Ok((tx, value)),
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                report::failure(&rollback_err);
            }
            Err(err)
        }
    }
}

pub fn run(config: &Config) -> Result<(), AppError> {
    let pool = db::open(config)?;
    let conn = db::checkout(&pool)?;

    let tx = Transaction::begin(&conn)?;

    let inserted = queries::insert_employee(tx.connection(), &test_employee());
    let (tx, inserted) = or_abort(tx, inserted)?;
    println!("  Inserted {} test employee(s) in transaction", inserted);

    let inside = queries::count_employees_by_email(tx.connection(), TEST_EMAIL)
        .map_err(|err| AppError::query("Failed to query within transaction", err.cause()));
    let (tx, inside) = or_abort(tx, inside)?;
    println!("  Found {} test employee(s) within transaction", inside);

    tx.rollback()?;
    println!("  Transaction rolled back");

    let after = queries::count_employees_by_email(&conn, TEST_EMAIL)
        .map_err(|err| AppError::query("Failed to verify rollback", err.cause()))?;
    println!("  Found {} test employee(s) after rollback", after);

    report::success("Transaction handling successful!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_targets_first_department() {
        let employee = test_employee();
        assert_eq!(employee.email, TEST_EMAIL);
        assert_eq!(employee.dept_id, 1);
        assert_eq!(employee.salary, 70000.0);
    }

    use std::cell::RefCell;

    #[derive(Debug)]
    struct RecordingTx<'a> {
        events: &'a RefCell<Vec<&'static str>>,
        rollback_fails: bool,
    }

    impl Rollback for RecordingTx<'_> {
        fn rollback(self) -> Result<(), AppError> {
            self.events.borrow_mut().push("rollback");
            if self.rollback_fails {
                Err(AppError::transaction("Failed to rollback transaction", "ORA-03113"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn successful_step_keeps_transaction_open() {
        let events = RefCell::new(Vec::new());
        let tx = RecordingTx { events: &events, rollback_fails: false };
        let (_tx, value) = or_abort(tx, Ok(1u64)).unwrap();
        assert_eq!(value, 1);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn failed_step_rolls_back_before_returning_error() {
        let events = RefCell::new(Vec::new());
        let tx = RecordingTx { events: &events, rollback_fails: false };
        let step: Result<u64, AppError> =
            Err(AppError::query("Failed to insert test employee", "ORA-00001"));

        let err = or_abort(tx, step).unwrap_err();
        assert_eq!(*events.borrow(), vec!["rollback"]);
        assert_eq!(err.to_string(), "Failed to insert test employee: ORA-00001");
    }

    #[test]
    fn failed_rollback_still_returns_step_error() {
        let events = RefCell::new(Vec::new());
        let tx = RecordingTx { events: &events, rollback_fails: true };
        let step: Result<u32, AppError> =
            Err(AppError::query("Failed to query within transaction", "ORA-01722"));

        let err = or_abort(tx, step).unwrap_err();
        assert_eq!(*events.borrow(), vec!["rollback"]);
        assert_eq!(err.description(), "Failed to query within transaction");
    }

    #[test]
    #[ignore = "needs a running Oracle instance at DATABASE_URL"]
    fn insert_is_visible_inside_and_gone_after_rollback() {
        let pool = db::open(&Config::from_env().unwrap()).unwrap();
        let conn = db::checkout(&pool).unwrap();

        let tx = Transaction::begin(&conn).unwrap();
        assert_eq!(queries::insert_employee(tx.connection(), &test_employee()).unwrap(), 1);
        assert_eq!(queries::count_employees_by_email(tx.connection(), TEST_EMAIL).unwrap(), 1);
        tx.rollback().unwrap();

        assert_eq!(queries::count_employees_by_email(&conn, TEST_EMAIL).unwrap(), 0);
    }
}
