//! Error types for the payroll calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll calculation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll calculation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/company.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/company.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A policy value failed validation at configuration-resolve time.
    ///
    /// Covers structural problems (minimum above maximum, default outside
    /// range, unsupported rounding interval) as well as overtime multipliers
    /// below the legal minimum for the configured locale.
    #[error("Invalid policy field '{field}': {message}")]
    InvalidPolicy {
        /// The configuration field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Attendance data for a single day was internally inconsistent.
    ///
    /// The engine fails the day's calculation rather than guessing or
    /// silently clamping negative durations.
    #[error("Attendance data integrity error on {date}, field '{field}': {message}")]
    DataIntegrity {
        /// The attendance date the error occurred on.
        date: NaiveDate,
        /// The field that was inconsistent.
        field: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// Salary information was missing the rate required by its salary type.
    #[error("Invalid salary info for type '{salary_type}': {message}")]
    InvalidSalaryInfo {
        /// The salary type being applied.
        salary_type: String,
        /// A description of what was missing or inconsistent.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/company.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/company.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_policy_displays_field_and_message() {
        let error = EngineError::InvalidPolicy {
            field: "break_policy.minimum_minutes".to_string(),
            message: "minimum (90) exceeds maximum (45)".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid policy field 'break_policy.minimum_minutes': minimum (90) exceeds maximum (45)"
        );
    }

    #[test]
    fn test_data_integrity_displays_date_field_and_message() {
        let error = EngineError::DataIntegrity {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            field: "breaks[0].end".to_string(),
            message: "break end precedes break start".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Attendance data integrity error on 2025-03-14, field 'breaks[0].end': break end precedes break start"
        );
    }

    #[test]
    fn test_invalid_salary_info_displays_type_and_message() {
        let error = EngineError::InvalidSalaryInfo {
            salary_type: "hourly".to_string(),
            message: "hourly_rate is required".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid salary info for type 'hourly': hourly_rate is required"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "negative net working minutes".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Calculation error: negative net working minutes"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_config_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
