//! Retry policy for management API requests.

use std::time::Duration;

/// Configuration for deadline-bounded exponential backoff.
///
/// Only retryable outcomes (HTTP 500 with a parseable error body) are
/// retried. Transport failures short-circuit the loop unless
/// [`retry_transport_errors`](Self::retry_transport_errors) is set.
///
/// # Defaults
///
/// - `timeout`: 60 seconds
/// - `initial_delay`: 500 milliseconds
/// - `max_delay`: 10 seconds
/// - `multiplier`: 2.0
/// - `retry_transport_errors`: false
///
/// # Example
///
/// ```
/// use amplience_mgmt::client::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_timeout(Duration::from_secs(30))
///     .with_initial_delay(Duration::from_secs(1))
///     .with_multiplier(1.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total time budget for an operation including all retries.
    ///
    /// A retry is only scheduled if its delay still fits in the budget.
    pub timeout: Duration,

    /// Delay before the first retry.
    pub initial_delay: Duration,

    /// Upper bound for a single delay.
    pub max_delay: Duration,

    /// Multiplier applied to the delay after each retry.
    pub multiplier: f64,

    /// Whether transport failures of the main request are retried too.
    pub retry_transport_errors: bool,
}

impl RetryPolicy {
    /// Default time budget (1 minute).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Default initial delay (500 milliseconds).
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(500);

    /// Default maximum delay (10 seconds).
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(10);

    /// Default multiplier (2.0).
    pub const DEFAULT_MULTIPLIER: f64 = 2.0;

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            initial_delay: Self::DEFAULT_INITIAL_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            multiplier: Self::DEFAULT_MULTIPLIER,
            retry_transport_errors: false,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self::new().with_timeout(Duration::ZERO)
    }

    /// Sets the total time budget.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the initial delay between retries.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay between retries.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the delay multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `multiplier` is not positive (must be > 0.0).
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        assert!(multiplier > 0.0, "multiplier must be positive");
        self.multiplier = multiplier;
        self
    }

    /// Sets whether transport failures are retried.
    #[must_use]
    pub const fn with_retry_transport_errors(mut self, enabled: bool) -> Self {
        self.retry_transport_errors = enabled;
        self
    }

    /// Computes the delay for a given retry number (0-indexed), capped at
    /// `max_delay`.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let multiplier = self
            .multiplier
            .powi(i32::try_from(retry).unwrap_or(i32::MAX));
        let delay_secs = self.initial_delay.as_secs_f64() * multiplier;
        let capped = delay_secs.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped)
    }

    /// Returns true if waiting `delay` after `elapsed` stays within the budget.
    #[must_use]
    pub fn fits_budget(&self, elapsed: Duration, delay: Duration) -> bool {
        elapsed.saturating_add(delay) <= self.timeout
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
