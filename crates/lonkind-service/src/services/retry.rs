//! Atomic unit runner
//!
//! [`run_atomic`] opens a transaction, runs the operation against it, and
//! commits. Conflicts and storage timeouts restart the whole operation on a
//! fresh transaction, up to the policy's attempt budget.

use std::time::Duration;

use futures::future::BoxFuture;
use lonkind_common::LedgerConfig;
use lonkind_core::traits::{LedgerTransaction, RepoResult, TransactionalStore};
use lonkind_core::DomainError;
use rand::Rng;
use tracing::{debug, warn};

/// Cap on the backoff exponent
const MAX_BACKOFF_SHIFT: u32 = 6;

/// Bounded retry with exponential, jittered backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first; never below 1
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_backoff,
        }
    }

    /// Delay before the attempt after `attempt` (1-based)
    ///
    /// `base * 2^(attempt - 1)` plus up to `base` of jitter.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let base = self.base_backoff.as_millis() as u64;
        if base == 0 {
            return Duration::ZERO;
        }
        let shift = attempt.saturating_sub(1).min(MAX_BACKOFF_SHIFT);
        let jitter = rand::thread_rng().gen_range(0..=base);
        Duration::from_millis(base.saturating_mul(1 << shift) + jitter)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&LedgerConfig::default())
    }
}

impl From<&LedgerConfig> for RetryPolicy {
    fn from(config: &LedgerConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.retry_backoff_ms),
        )
    }
}

/// Run `op` as one atomic unit, retrying on conflict
///
/// Every attempt gets a fresh transaction, so the operation always reads
/// current state. A failed operation is rolled back. Non-retryable errors
/// are returned as-is; running out of attempts yields
/// `DomainError::TransientStorage`.
pub async fn run_atomic<T, F>(
    store: &dyn TransactionalStore,
    policy: RetryPolicy,
    mut op: F,
) -> RepoResult<T>
where
    T: Send,
    F: for<'t> FnMut(&'t mut dyn LedgerTransaction) -> BoxFuture<'t, RepoResult<T>> + Send,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match run_once(store, &mut op).await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "Atomic unit committed after retry");
                }
                return Ok(value);
            }
            Err(e) if e.is_retryable() => {
                if attempt >= policy.max_attempts {
                    warn!(attempts = attempt, error = %e, "Atomic unit gave up");
                    return Err(DomainError::TransientStorage { attempts: attempt });
                }
                let delay = policy.backoff(attempt);
                debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Retrying atomic unit"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn run_once<T, F>(store: &dyn TransactionalStore, op: &mut F) -> RepoResult<T>
where
    T: Send,
    F: for<'t> FnMut(&'t mut dyn LedgerTransaction) -> BoxFuture<'t, RepoResult<T>> + Send,
{
    let mut tx = store.begin().await?;
    match op(&mut *tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Rollback failed");
            }
            Err(e)
        }
    }
}
