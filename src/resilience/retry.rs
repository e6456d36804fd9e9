//! Fixed-table retry gateway.
//!
//! Wraps a one-shot remote call in a bounded retry loop. The backoff table is
//! fixed ahead of time: attempt `n + 1` waits exactly `delays[n]` after attempt
//! `n` fails. There is no jitter, no growth, and no error classification.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use crate::error::Cancelled;

/// Default backoff table in milliseconds.
pub const DEFAULT_RETRY_DELAYS_MS: [u64; 3] = [5_000, 10_000, 15_000];

/// Ordered backoff delays for the retry gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    delays: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_millis(&DEFAULT_RETRY_DELAYS_MS)
    }
}

impl RetryPolicy {
    /// Creates a policy from an explicit delay table.
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    /// Creates a policy from delays expressed in milliseconds.
    pub fn from_millis(millis: &[u64]) -> Self {
        Self::new(millis.iter().copied().map(Duration::from_millis).collect())
    }

    /// Creates a policy that makes exactly one attempt.
    pub fn no_retry() -> Self {
        Self::new(Vec::new())
    }

    /// The configured delays, in retry order.
    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    /// Number of retries after the first attempt.
    pub fn max_retries(&self) -> u32 {
        u32::try_from(self.delays.len()).unwrap_or(u32::MAX)
    }

    /// Total number of attempts (`delays + 1`).
    pub fn max_attempts(&self) -> u32 {
        self.max_retries().saturating_add(1)
    }

    /// Sum of every delay in the table.
    pub fn total_delay(&self) -> Duration {
        self.delays.iter().sum()
    }
}

/// A scheduled retry, reported before its delay begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryProgress {
    /// 1-based retry number.
    pub attempt: u32,
    /// Delay that will elapse before this retry.
    pub delay: Duration,
    /// Retries the policy allows in total.
    pub max_retries: u32,
}

impl RetryProgress {
    /// Delay in whole milliseconds.
    pub fn delay_ms(&self) -> u64 {
        u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX)
    }

    /// Short user-facing hint, e.g. `Retrying (1/3) - waiting 5s...`.
    pub fn status_line(&self) -> String {
        let wait = if self.delay.subsec_millis() == 0 {
            format!("{}s", self.delay.as_secs())
        } else {
            format!("{}ms", self.delay_ms())
        };
        format!("Retrying ({}/{}) - waiting {wait}...", self.attempt, self.max_retries)
    }
}

/// Receives retry progress events.
pub trait RetryObserver: Send + Sync {
    /// Called once per scheduled retry, before the delay.
    fn on_retry(&self, progress: RetryProgress);
}

impl<F> RetryObserver for F
where
    F: Fn(RetryProgress) + Send + Sync,
{
    fn on_retry(&self, progress: RetryProgress) {
        self(progress);
    }
}

/// Forwards retry progress into an unbounded channel.
///
/// Events are dropped silently once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: UnboundedSender<RetryProgress>,
}

impl ChannelObserver {
    /// Wraps a sender.
    pub fn new(sender: UnboundedSender<RetryProgress>) -> Self {
        Self { sender }
    }
}

impl RetryObserver for ChannelObserver {
    fn on_retry(&self, progress: RetryProgress) {
        let _ = self.sender.send(progress);
    }
}

/// Executes operations under a fixed backoff table.
///
/// The gateway holds no per-call state, so one instance can serve any number
/// of concurrent invocations.
#[derive(Debug, Clone, Default)]
pub struct RetryGateway {
    policy: RetryPolicy,
}

impl RetryGateway {
    /// Creates a gateway with the given policy.
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Creates a gateway with the default 5s/10s/15s table.
    pub fn with_defaults() -> Self {
        Self::new(RetryPolicy::default())
    }

    /// Returns the policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Executes an operation with retry.
    ///
    /// # Behavior
    ///
    /// - Returns the first success immediately; earlier errors are discarded
    /// - Every error is retried while delays remain, whatever its kind
    /// - Before each retry the observer receives `(retry number, delay)`
    /// - Once the table is exhausted the most recent error is returned as is
    pub async fn execute<F, Fut, T, E>(
        &self,
        operation: F,
        observer: Option<&dyn RetryObserver>,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.run(operation, observer, None).await
    }

    /// Executes an operation with retry, stopping early when `token` fires.
    ///
    /// Cancellation interrupts both an in-flight attempt and a pending delay
    /// and yields `E::from(Cancelled)`. No observer event follows it.
    pub async fn execute_cancellable<F, Fut, T, E>(
        &self,
        operation: F,
        observer: Option<&dyn RetryObserver>,
        token: &CancellationToken,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display + From<Cancelled>,
    {
        let cancelled: fn() -> E = cancelled_error::<E>;
        self.run(operation, observer, Some((token, cancelled))).await
    }

    async fn run<F, Fut, T, E>(
        &self,
        mut operation: F,
        observer: Option<&dyn RetryObserver>,
        cancel: Option<(&CancellationToken, fn() -> E)>,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_retries = self.policy.max_retries();
        let mut retries: u32 = 0;

        loop {
            let outcome = match cancel {
                Some((token, cancelled)) => tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        tracing::info!("Operation cancelled during attempt {}", retries + 1);
                        return Err(cancelled());
                    }
                    outcome = operation() => outcome,
                },
                None => operation().await,
            };

            let error = match outcome {
                Ok(result) => {
                    if retries > 0 {
                        tracing::info!("Operation succeeded after {} retry attempts", retries);
                    }
                    return Ok(result);
                }
                Err(e) => e,
            };

            let Some(&delay) = self.policy.delays.get(retries as usize) else {
                if retries > 0 {
                    tracing::error!("Operation failed after {} retry attempts: {}", retries, error);
                }
                return Err(error);
            };

            retries += 1;
            tracing::warn!(
                "Attempt {} failed: {}. Retrying ({}/{}) in {:?}.",
                retries,
                error,
                retries,
                max_retries,
                delay
            );

            if let Some(observer) = observer {
                observer.on_retry(RetryProgress {
                    attempt: retries,
                    delay,
                    max_retries,
                });
            }

            match cancel {
                Some((token, cancelled)) => tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        tracing::info!("Operation cancelled while waiting to retry");
                        return Err(cancelled());
                    }
                    () = sleep(delay) => {}
                },
                None => sleep(delay).await,
            }
        }
    }
}

fn cancelled_error<E: From<Cancelled>>() -> E {
    E::from(Cancelled)
}
