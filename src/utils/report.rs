use std::fmt;

use log::error;

pub fn success_line(message: &str) -> String {
    format!("✓ {}", message)
}

pub fn failure_line(failure: &dyn fmt::Display) -> String {
    format!("✗ {}", failure)
}

/// Prints a `✓` line to standard output.
pub fn success(message: &str) {
    println!("{}", success_line(message));
}

/// Logs a `✗` line; failures go through the logger, not standard output.
pub fn failure(failure: &dyn fmt::Display) {
    error!("{}", failure_line(failure));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn success_is_check_marked() {
        assert_eq!(success_line("Basic connection successful!"), "✓ Basic connection successful!");
    }

    #[test]
    fn failure_renders_description_and_cause() {
        let err = AppError::query("Failed to query departments", "ORA-00942: table or view does not exist");
        assert_eq!(
            failure_line(&err),
            "✗ Failed to query departments: ORA-00942: table or view does not exist"
        );
    }
}
