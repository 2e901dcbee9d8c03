pub mod basic;
pub mod pool;
pub mod prepared;
pub mod procedures;
pub mod queries;
pub mod transaction;

use std::fmt;

use log::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::utils::report;

/// One demonstration routine. Each opens and releases its own pool.
pub struct Check {
    pub title: &'static str,
    pub run: fn(&Config) -> Result<(), AppError>,
}

pub const CHECKS: [Check; 6] = [
    Check { title: "basic database connection", run: basic::run },
    Check { title: "query operations", run: queries::run },
    Check { title: "transaction handling", run: transaction::run },
    Check { title: "prepared statements", run: prepared::run },
    Check { title: "stored procedures and functions", run: procedures::run },
    Check { title: "connection pool", run: pool::run },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
}

impl Summary {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} checks passed", self.passed, self.total())
    }
}

pub fn heading(number: usize, check: &Check) -> String {
    format!("{}. Testing {}...", number, check.title)
}

/// Runs one check, reporting its failure instead of propagating it.
pub fn run_check(config: &Config, check: &Check) -> Outcome {
    match (check.run)(config) {
        Ok(()) => Outcome::Passed,
        Err(err) => {
            report::failure(&err);
            Outcome::Failed
        }
    }
}

/// Runs every check in order. A failing check never stops the ones after it.
pub fn run_all(config: &Config, checks: &[Check]) -> Summary {
    let mut summary = Summary::default();
    for (index, check) in checks.iter().enumerate() {
        println!("{}", heading(index + 1, check));
        let outcome = run_check(config, check);
        info!("check '{}' {:?}", check.title, outcome);
        summary.record(outcome);
        println!();
    }
    summary
}
