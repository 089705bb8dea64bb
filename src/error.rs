//! Error types for the statutory deduction engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions that can occur while assembling context data
//! and calculating statutory deductions.

use thiserror::Error;

/// The main error type for the statutory deduction engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application. The engine
/// never downgrades a collaborator failure into a partial result: a returned
/// error means no deduction amounts were computed.
///
/// # Example
///
/// ```
/// use statutory_engine::error::EngineError;
///
/// let error = EngineError::PayPeriodNotFound {
///     id: "pp_2024_07".to_string(),
/// };
/// assert_eq!(error.to_string(), "Pay period not found: pp_2024_07");
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
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rate band schedule violated the contiguity/ordering invariants.
    #[error("Invalid rate band schedule for '{type_code}': {message}")]
    InvalidBandSchedule {
        /// The statutory type code the schedule belongs to.
        type_code: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// The referenced pay period does not exist.
    #[error("Pay period not found: {id}")]
    PayPeriodNotFound {
        /// The pay period identifier that was not found.
        id: String,
    },

    /// A calculation parameter was invalid.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The parameter that was invalid.
        field: String,
        /// A description of what made the parameter invalid.
        message: String,
    },

    /// An underlying data-access operation failed.
    ///
    /// Repository failures propagate as-is; the engine does not retry.
    #[error("Repository error: {message}")]
    Repository {
        /// A description of the data-access failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    Calculation {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/jm.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/jm.yaml"
        );
    }

    #[test]
    fn test_config_parse_displays_path_and_message() {
        let error = EngineError::ConfigParse {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_band_schedule_displays_type_code() {
        let error = EngineError::InvalidBandSchedule {
            type_code: "INCOME_TAX".to_string(),
            message: "gap between 50000 and 60000".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid rate band schedule for 'INCOME_TAX': gap between 50000 and 60000"
        );
    }

    #[test]
    fn test_pay_period_not_found_displays_id() {
        let error = EngineError::PayPeriodNotFound {
            id: "pp_001".to_string(),
        };
        assert_eq!(error.to_string(), "Pay period not found: pp_001");
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "gross_pay".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input 'gross_pay': must not be negative"
        );
    }

    #[test]
    fn test_repository_error_displays_message() {
        let error = EngineError::Repository {
            message: "connection reset".to_string(),
        };
        assert_eq!(error.to_string(), "Repository error: connection reset");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::PayPeriodNotFound {
                id: "pp_001".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
