//! Error types for the repayment calculator.

use thiserror::Error;

/// Result type alias for calculator operations
pub type Result<T> = std::result::Result<T, RepayError>;

/// Errors that can occur while collecting input or writing reports.
///
/// The amortization functions themselves never fail; these errors come from
/// the surrounding input and output layers.
#[derive(Error, Debug)]
pub enum RepayError {
    /// Failed to read from stdin or write to stdout
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV report writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A value was rejected by validation
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    /// Command-line options that cannot be used together
    #[error("Invalid arguments: {0}. Usage: repayrite [--principal <AMOUNT> --rate <PERCENT> --term <YEARS>]")]
    InvalidArguments(String),

    /// Input ended while a value was still being requested
    #[error("Input ended before all values were entered")]
    InputClosed,
}

impl RepayError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        RepayError::InvalidInput {
            field,
            message: message.into(),
        }
    }
}
