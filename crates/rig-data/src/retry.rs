//! Retry policy for fetch operations.

/// Conditions that trigger a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryCondition {
    /// Retry on any 5xx status.
    ServerError,
    /// Retry on timeout.
    Timeout,
    /// Retry on connection error.
    ConnectionError,
}

impl RetryCondition {
    /// Check if a status code matches this condition.
    pub fn matches_status(&self, status: u16) -> bool {
        matches!(self, Self::ServerError) && (500..600).contains(&status)
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (beyond the first try).
    pub max_attempts: u32,
    /// Conditions that trigger retry.
    pub retry_on: Vec<RetryCondition>,
}

impl RetryPolicy {
    /// Create a new retry policy retrying on server errors, timeouts, and
    /// connection errors.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            retry_on: vec![
                RetryCondition::ServerError,
                RetryCondition::Timeout,
                RetryCondition::ConnectionError,
            ],
        }
    }

    /// Create a policy with no retries. Used for non-idempotent requests
    /// (payment-session creation must not be replayed).
    pub fn none() -> Self {
        Self {
            max_attempts: 0,
            retry_on: Vec::new(),
        }
    }

    /// Check if a failed status code should be retried at this attempt.
    pub fn should_retry_status(&self, status: u16, attempt: u32) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }
        self.retry_on.iter().any(|c| c.matches_status(status))
    }

    /// Check if a connection-level failure should be retried at this attempt.
    pub fn should_retry_connection(&self, attempt: u32) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }
        self.retry_on.contains(&RetryCondition::ConnectionError)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}
