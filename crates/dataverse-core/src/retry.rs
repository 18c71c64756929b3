//! Retry policy for fallible async operations.
//!
//! A [`RetryPolicy`] is a delay sequence (one entry per attempt), a set of
//! HTTP statuses that are worth another attempt, and an optional predicate
//! over [`Error`]. It is used the same way for single requests and for
//! metadata readiness polls.

use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::{Error, Result};

/// Statuses the service uses for throttling and transient unavailability.
pub const TRANSIENT_STATUSES: [u16; 4] = [429, 502, 503, 504];

type RetryPredicate = Arc<dyn Fn(&Error) -> bool + Send + Sync>;

/// Delay sequence plus retry classifiers.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use dataverse_core::{ErrorKind, RetryPolicy};
///
/// let policy = RetryPolicy::from_secs(&[0, 2, 5])
///     .retry_on_statuses([429, 503])
///     .retry_if(|err| err.kind() == ErrorKind::UnknownObject);
/// assert_eq!(policy.max_attempts(), 3);
/// assert_eq!(policy.delays()[1], Duration::from_secs(2));
/// ```
#[derive(Clone)]
pub struct RetryPolicy {
    delays: Vec<Duration>,
    retry_statuses: BTreeSet<u16>,
    retry_if: Option<RetryPredicate>,
}

impl RetryPolicy {
    /// Create a policy with one attempt per delay.
    ///
    /// An empty sequence becomes a single immediate attempt.
    pub fn new(delays: impl IntoIterator<Item = Duration>) -> Self {
        let mut delays: Vec<Duration> = delays.into_iter().collect();
        if delays.is_empty() {
            delays.push(Duration::ZERO);
        }
        Self {
            delays,
            retry_statuses: BTreeSet::new(),
            retry_if: None,
        }
    }

    /// Create a policy from whole-second delays.
    pub fn from_secs(secs: &[u64]) -> Self {
        Self::new(secs.iter().map(|s| Duration::from_secs(*s)))
    }

    /// A single attempt, no retries.
    pub fn once() -> Self {
        Self::new([Duration::ZERO])
    }

    /// Immediate first attempt followed by `retries` doubling delays
    /// starting at `base`.
    pub fn exponential(retries: u32, base: Duration) -> Self {
        let backoff = (0..retries).map(|n| base.saturating_mul(1u32 << n.min(16)));
        Self::new(std::iter::once(Duration::ZERO).chain(backoff))
    }

    /// Retry failures carrying one of these HTTP statuses.
    pub fn retry_on_statuses(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.retry_statuses.extend(statuses);
        self
    }

    /// Retry failures the predicate accepts, regardless of status.
    pub fn retry_if<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Error) -> bool + Send + Sync + 'static,
    {
        self.retry_if = Some(Arc::new(predicate));
        self
    }

    /// The delay before each attempt.
    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    /// Total number of attempts this policy allows.
    pub fn max_attempts(&self) -> usize {
        self.delays.len()
    }

    /// Whether a failure is worth another attempt.
    pub fn should_retry(&self, err: &Error) -> bool {
        if let Some(predicate) = &self.retry_if
            && predicate(err)
        {
            return true;
        }
        err.status()
            .is_some_and(|status| self.retry_statuses.contains(&status))
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or the delay sequence is exhausted.
    ///
    /// Each attempt first sleeps for its configured delay; zero delays do
    /// not sleep. The last failure is returned when attempts run out.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            let delay = self.delays[attempt];
            if !delay.is_zero() {
                debug!(attempt = attempt + 1, delay_ms = delay.as_millis() as u64, "waiting before attempt");
                tokio::time::sleep(delay).await;
            }
            attempt += 1;

            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.delays.len() && self.should_retry(&err) => {
                    warn!(attempt, max_attempts = self.delays.len(), error = %err, "attempt failed, retrying");
                }
                Err(err) => {
                    if attempt > 1 {
                        debug!(attempt, error = %err, "giving up");
                    }
                    return Err(err);
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::once()
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("delays", &self.delays)
            .field("retry_statuses", &self.retry_statuses)
            .field("retry_if", &self.retry_if.is_some())
            .finish()
    }
}
