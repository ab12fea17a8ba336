use thiserror::Error;

#[derive(Error, Debug)]
pub enum CountdownError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid target instant '{value}': {reason}")]
    InvalidInstant { value: String, reason: String },

    #[error("Scheduler unavailable: {reason}")]
    SchedulerUnavailable { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl CountdownError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CountdownError::IoError(_) => ErrorCategory::Io,
            CountdownError::ConfigValidationError { .. }
            | CountdownError::InvalidConfigValueError { .. }
            | CountdownError::InvalidInstant { .. } => ErrorCategory::Configuration,
            CountdownError::SchedulerUnavailable { .. } => ErrorCategory::Runtime,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CountdownError::IoError(_) => ErrorSeverity::High,
            CountdownError::ConfigValidationError { .. }
            | CountdownError::InvalidConfigValueError { .. }
            | CountdownError::InvalidInstant { .. } => ErrorSeverity::High,
            CountdownError::SchedulerUnavailable { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CountdownError::IoError(_) => {
                "Check that the configuration file exists and is readable".to_string()
            }
            CountdownError::ConfigValidationError { .. } => {
                "Make sure the configuration file is valid TOML".to_string()
            }
            CountdownError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            CountdownError::InvalidInstant { .. } => {
                "Use YYYY-MM-DDTHH:MM:SS, YYYY-MM-DD or an RFC 3339 timestamp".to_string()
            }
            CountdownError::SchedulerUnavailable { .. } => {
                "Start the countdown from inside a tokio runtime".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CountdownError::IoError(e) => format!("Could not read a file: {}", e),
            CountdownError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            CountdownError::InvalidConfigValueError { field, reason, .. } => {
                format!("'{}' is invalid: {}", field, reason)
            }
            CountdownError::InvalidInstant { value, .. } => {
                format!("'{}' is not a valid election date", value)
            }
            CountdownError::SchedulerUnavailable { .. } => {
                "The countdown timer could not be started".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CountdownError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_unavailable_is_critical_runtime() {
        let err = CountdownError::SchedulerUnavailable {
            reason: "no runtime".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Runtime);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.to_string().contains("no runtime"));
    }

    #[test]
    fn test_config_errors_mention_field() {
        let err = CountdownError::InvalidConfigValueError {
            field: "countdown.tick_interval_ms".to_string(),
            value: "0".to_string(),
            reason: "Value must be between 10 and 60000".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.recovery_suggestion().contains("countdown.tick_interval_ms"));
        assert!(err.user_friendly_message().contains("between 10 and 60000"));
    }

    #[test]
    fn test_every_variant_has_category_and_severity() {
        let cases = [
            (
                CountdownError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
                ErrorCategory::Io,
                ErrorSeverity::High,
            ),
            (
                CountdownError::ConfigValidationError {
                    field: "toml_parsing".to_string(),
                    message: "expected `]`".to_string(),
                },
                ErrorCategory::Configuration,
                ErrorSeverity::High,
            ),
            (
                CountdownError::InvalidInstant {
                    value: "November 3rd".to_string(),
                    reason: "unrecognized date format".to_string(),
                },
                ErrorCategory::Configuration,
                ErrorSeverity::High,
            ),
        ];

        for (err, category, severity) in cases {
            assert_eq!(err.category(), category, "{}", err);
            assert_eq!(err.severity(), severity, "{}", err);
            assert!(!err.recovery_suggestion().is_empty());
            assert!(!err.user_friendly_message().is_empty());
        }
    }
}
