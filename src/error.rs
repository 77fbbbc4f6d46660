//! Error types for the Site Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing payroll.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Site Payroll Engine.
///
/// Every fallible operation in the crate returns this error type, so callers
/// can match on a single enum regardless of which layer failed.
///
/// # Example
///
/// ```
/// use site_payroll::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::InvalidRange {
///     start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
///     end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid date range: start 2026-02-01 is after end 2026-01-01"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A rate profile was missing, negative, or did not cover the requested date.
    #[error("Invalid rate for employee '{employee_id}': {message}")]
    InvalidRate {
        /// The employee whose rate was rejected.
        employee_id: String,
        /// A description of what made the rate invalid.
        message: String,
    },

    /// A calculation batch mixed several employees or several ISO weeks.
    #[error("Mixed scope input: {message}")]
    MixedScopeInput {
        /// A description of the scope violation.
        message: String,
    },

    /// A reporting date range had its start after its end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// An attendance or rate card row was malformed.
    #[error("Invalid record '{record_id}': {message}")]
    InvalidRecord {
        /// The ID of the offending record.
        record_id: String,
        /// A description of what made the record invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Summing hours or pay exceeded the range of a decimal.
    #[error("Arithmetic overflow: {message}")]
    Overflow {
        /// What was being summed when the overflow occurred.
        message: String,
    },

    /// A report was requested for an employee the roster does not contain.
    #[error("Unknown employee: {employee_id}")]
    UnknownEmployee {
        /// The requested employee ID.
        employee_id: String,
    },

    /// The external data store failed to serve a request.
    #[error("Repository error: {message}")]
    Repository {
        /// A description of the repository failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
