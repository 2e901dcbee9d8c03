use log::{debug, warn};
use oracle::Connection;

use crate::errors::AppError;

/// A unit of work on one connection.
///
/// Oracle opens a transaction implicitly with the first DML statement, so
/// `begin` only checks that the session is not in autocommit mode. Nothing
/// here ever commits: the transaction ends with [`Transaction::rollback`],
/// and dropping it unfinished rolls it back as well.
pub struct Transaction<'conn> {
    conn: &'conn Connection,
    finished: bool,
}

impl<'conn> Transaction<'conn> {
    pub fn begin(conn: &'conn Connection) -> Result<Self, AppError> {
        if conn.autocommit() {
            return Err(AppError::transaction(
                "Failed to begin transaction",
                "connection is in autocommit mode",
            ));
        }
        debug!("transaction started");
        Ok(Transaction {
            conn,
            finished: false,
        })
    }

    /// Connection the transaction's statements must run on.
    pub fn connection(&self) -> &Connection {
        self.conn
    }

    pub fn rollback(mut self) -> Result<(), AppError> {
        self.finished = true;
        self.conn
            .rollback()
            .map_err(|err| AppError::transaction("Failed to rollback transaction", err))?;
        debug!("transaction rolled back");
        Ok(())
    }
}

/// Anything that can be ended by rolling back.
pub trait Rollback {
    fn rollback(self) -> Result<(), AppError>;
}

impl Rollback for Transaction<'_> {
    fn rollback(self) -> Result<(), AppError> {
        Transaction::rollback(self)
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        warn!("transaction dropped without rollback, rolling back");
        if let Err(err) = self.conn.rollback() {
            warn!("implicit rollback failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db;
    use crate::db::queries;

    const PROBE_EMAIL: &str = "guard.probe@company.com";

    fn probe() -> crate::models::employee::NewEmployee {
        crate::models::employee::NewEmployee {
            first_name: "Guard".to_string(),
            last_name: "Probe".to_string(),
            email: PROBE_EMAIL.to_string(),
            job_title: "Probe".to_string(),
            salary: 1.0,
            dept_id: 1,
        }
    }

    #[test]
    #[ignore = "needs a running Oracle instance at DATABASE_URL"]
    fn dropping_unfinished_transaction_rolls_back() {
        let pool = db::open(&Config::from_env().unwrap()).unwrap();
        let conn = db::checkout(&pool).unwrap();
        {
            let tx = Transaction::begin(&conn).unwrap();
            queries::insert_employee(tx.connection(), &probe()).unwrap();
            assert_eq!(queries::count_employees_by_email(tx.connection(), PROBE_EMAIL).unwrap(), 1);
        }
        assert_eq!(queries::count_employees_by_email(&conn, PROBE_EMAIL).unwrap(), 0);
    }

    #[test]
    #[ignore = "needs a running Oracle instance at DATABASE_URL"]
    fn explicit_rollback_discards_insert() {
        let pool = db::open(&Config::from_env().unwrap()).unwrap();
        let conn = db::checkout(&pool).unwrap();
        let tx = Transaction::begin(&conn).unwrap();
        queries::insert_employee(tx.connection(), &probe()).unwrap();
        tx.rollback().unwrap();

        let other = db::checkout(&pool).unwrap();
        assert_eq!(queries::count_employees_by_email(&other, PROBE_EMAIL).unwrap(), 0);
    }
}
