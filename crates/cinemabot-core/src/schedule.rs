use std::time::Duration;
use thiserror::Error;

/// Errors returned for malformed `/schedule` arguments
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Delay or query is missing
    #[error("expected a delay and a query")]
    MissingArguments,
    /// Delay is not an integer
    #[error("delay is not an integer: {0:?}")]
    InvalidDelay(String),
}

/// A search to run after a delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    /// Time to wait before searching
    pub delay: Duration,
    /// Search query
    pub query: String,
}

impl ScheduleRequest {
    /// Parse `<seconds> <query>`.
    ///
    /// Negative delays are clamped to zero. The query is everything after the
    /// delay, trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::MissingArguments` if either part is missing and
    /// `ScheduleError::InvalidDelay` if the delay is not an integer.
    pub fn parse(args: &str) -> Result<Self, ScheduleError> {
        let args = args.trim();
        let (delay, query) = args
            .split_once(char::is_whitespace)
            .ok_or(ScheduleError::MissingArguments)?;
        let query = query.trim();
        if query.is_empty() {
            return Err(ScheduleError::MissingArguments);
        }

        let secs: i64 = delay
            .parse()
            .map_err(|_| ScheduleError::InvalidDelay(delay.to_string()))?;

        Ok(Self {
            delay: Duration::from_secs(secs.max(0).unsigned_abs()),
            query: query.to_string(),
        })
    }

    /// Whether the search runs without waiting
    #[must_use]
    pub fn is_immediate(&self) -> bool {
        self.delay.is_zero()
    }
}
