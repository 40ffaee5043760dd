use thiserror::Error;

/// Failure to parse a single raw value into its semantic type.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum FieldError {
    #[error("Invalid integer [{value}]: {reason}")]
    InvalidInteger {
        value: String,
        reason: String
    },
    #[error("Invalid amount [{value}]: {reason}")]
    InvalidAmount {
        value: String,
        reason: String
    },
    #[error("Invalid timestamp [{value}], expected [YYYY-MM-DD HH:MM:SS]")]
    InvalidTimestamp {
        value: String
    },
    #[error("Invalid date [{value}], expected [YYYY-MM-DD]")]
    InvalidDate {
        value: String
    }
}
