use std::fmt;

/// Failures a check can hit. Each variant carries a description of the step
/// that failed and the cause reported by the driver, pool or parser.
#[derive(Debug)]
pub enum AppError {
    ConfigError(String, String),
    ConnectionError(String, String),
    PingError(String, String),
    QueryError(String, String),
    ScanError(String, String),
    TransactionError(String, String),
}

impl AppError {
    pub fn config(description: &str, cause: impl fmt::Display) -> Self {
        AppError::ConfigError(description.to_string(), cause.to_string())
    }

    pub fn connection(description: &str, cause: impl fmt::Display) -> Self {
        AppError::ConnectionError(description.to_string(), cause.to_string())
    }

    pub fn ping(description: &str, cause: impl fmt::Display) -> Self {
        AppError::PingError(description.to_string(), cause.to_string())
    }

    pub fn query(description: &str, cause: impl fmt::Display) -> Self {
        AppError::QueryError(description.to_string(), cause.to_string())
    }

    pub fn scan(description: &str, cause: impl fmt::Display) -> Self {
        AppError::ScanError(description.to_string(), cause.to_string())
    }

    pub fn transaction(description: &str, cause: impl fmt::Display) -> Self {
        AppError::TransactionError(description.to_string(), cause.to_string())
    }

    pub fn description(&self) -> &str {
        match self {
            AppError::ConfigError(desc, _)
            | AppError::ConnectionError(desc, _)
            | AppError::PingError(desc, _)
            | AppError::QueryError(desc, _)
            | AppError::ScanError(desc, _)
            | AppError::TransactionError(desc, _) => desc,
        }
    }

    pub fn cause(&self) -> &str {
        match self {
            AppError::ConfigError(_, cause)
            | AppError::ConnectionError(_, cause)
            | AppError::PingError(_, cause)
            | AppError::QueryError(_, cause)
            | AppError::ScanError(_, cause)
            | AppError::TransactionError(_, cause) => cause,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.description(), self.cause())
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_description_and_cause() {
        let err = AppError::ping("Failed to ping database", "ORA-12541: TNS:no listener");
        assert_eq!(
            err.to_string(),
            "Failed to ping database: ORA-12541: TNS:no listener"
        );
    }

    #[test]
    fn accessors_work_for_every_variant() {
        let errors = [
            AppError::config("a", "1"),
            AppError::connection("a", "1"),
            AppError::ping("a", "1"),
            AppError::query("a", "1"),
            AppError::scan("a", "1"),
            AppError::transaction("a", "1"),
        ];
        for err in &errors {
            assert_eq!(err.description(), "a");
            assert_eq!(err.cause(), "1");
        }
    }

    #[test]
    fn cause_accepts_any_display_value() {
        let err = AppError::config("Invalid DB_MAX_OPEN_CONNS", 42);
        assert!(matches!(err, AppError::ConfigError(_, ref cause) if cause == "42"));
    }
}
