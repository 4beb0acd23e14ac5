//! Error types for time parsing and interval construction

/// Errors produced while parsing or building time values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    /// Timestamp text is not valid RFC 3339
    #[error("invalid timestamp '{input}': {message}")]
    InvalidTimestamp { input: String, message: String },

    /// Interval text is not of the form `start/stop`
    #[error("invalid interval '{0}': expected 'start/stop'")]
    InvalidInterval(String),

    /// Interval start lies after its stop
    #[error("interval start {start} is after stop {stop}")]
    Reversed { start: String, stop: String },
}

impl TimeError {
    /// Create timestamp parse error
    pub fn invalid_timestamp(input: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidTimestamp {
            input: input.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for time operations
pub type TimeResult<T> = Result<T, TimeError>;
