//! Error types for the attendance and payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror`
//! crate for every failure the engine can report to callers.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the attendance and payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use hadirpay::error::EngineError;
///
/// let error = EngineError::InvalidPeriod {
///     input: "2025-13".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid payroll period '2025-13': expected YYYY-MM");
/// ```
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// The employee already has an attendance record for the day.
    #[error("Employee {employee_id} already clocked in on {date}")]
    DuplicateClockIn {
        /// The employee who attempted the clock-in.
        employee_id: u32,
        /// The day that already has a record.
        date: NaiveDate,
    },

    /// A clock-out arrived without a clock-in for the day.
    #[error("Employee {employee_id} has no open clock-in on {date}")]
    NoOpenClockIn {
        /// The employee who attempted the clock-out.
        employee_id: u32,
        /// The day with no open record.
        date: NaiveDate,
    },

    /// The day's record already carries a clock-out.
    #[error("Employee {employee_id} already clocked out on {date}")]
    AlreadyClockedOut {
        /// The employee who attempted the clock-out.
        employee_id: u32,
        /// The day whose record is already complete.
        date: NaiveDate,
    },

    /// A payroll period string did not parse as `YYYY-MM`.
    #[error("Invalid payroll period '{input}': expected YYYY-MM")]
    InvalidPeriod {
        /// The rejected input.
        input: String,
    },

    /// A payroll record addressed by id does not exist.
    #[error("Payroll record {payroll_id} not found")]
    PayrollNotFound {
        /// The id that matched nothing.
        payroll_id: u32,
    },

    /// The storage layer failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_duplicate_clock_in_displays_employee_and_date() {
        let error = EngineError::DuplicateClockIn {
            employee_id: 7,
            date: make_date("2025-07-14"),
        };
        assert_eq!(
            error.to_string(),
            "Employee 7 already clocked in on 2025-07-14"
        );
    }

    #[test]
    fn test_no_open_clock_in_displays_employee_and_date() {
        let error = EngineError::NoOpenClockIn {
            employee_id: 7,
            date: make_date("2025-07-14"),
        };
        assert_eq!(
            error.to_string(),
            "Employee 7 has no open clock-in on 2025-07-14"
        );
    }

    #[test]
    fn test_already_clocked_out_displays_employee_and_date() {
        let error = EngineError::AlreadyClockedOut {
            employee_id: 7,
            date: make_date("2025-07-14"),
        };
        assert_eq!(
            error.to_string(),
            "Employee 7 already clocked out on 2025-07-14"
        );
    }

    #[test]
    fn test_invalid_period_displays_input() {
        let error = EngineError::InvalidPeriod {
            input: "last month".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid payroll period 'last month': expected YYYY-MM"
        );
    }

    #[test]
    fn test_payroll_not_found_displays_id() {
        let error = EngineError::PayrollNotFound { payroll_id: 42 };
        assert_eq!(error.to_string(), "Payroll record 42 not found");
    }

    #[test]
    fn test_storage_displays_message() {
        let error = EngineError::Storage {
            message: "connection refused".to_string(),
        };
        assert_eq!(error.to_string(), "Storage error: connection refused");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_period() -> EngineResult<()> {
            Err(EngineError::InvalidPeriod {
                input: "bad".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_period()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
