//! Bounded retry-with-delay
//!
//! Gantree: L6_Backend → Retry
//!
//! Wraps any executor. Transient backend failures are retried after a
//! fixed delay up to a bounded number of attempts; every other error is
//! returned immediately.

use crate::context::BackendContext;
use crate::executor::Executor;
use qaw_circuit::Operation;
use qaw_core::constants::retry::{DEFAULT_MAX_ATTEMPTS, HARDWARE_DELAY_SECS, QUEUE_DELAY_SECS};
use qaw_core::{DeviceDescriptor, QawError, QawResult};
use qaw_stats::RawResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Retry policy
/// Gantree: RetryPolicy // 재시도 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: usize,

    /// Wait between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// Create new policy
    pub fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Direct hardware access (10 minute delay)
    pub fn hardware() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, Duration::from_secs(HARDWARE_DELAY_SECS))
    }

    /// Queued cloud service (5 minute delay)
    pub fn queue() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, Duration::from_secs(QUEUE_DELAY_SECS))
    }

    /// Single attempt
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Builder: set attempts
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Builder: set delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Validate policy
    pub fn validate(&self) -> QawResult<()> {
        if self.max_attempts == 0 {
            return Err(QawError::InvalidConfig(
                "retry policy needs at least one attempt".into(),
            ));
        }
        Ok(())
    }

    /// Run `op` under this policy
    /// Gantree: run(op) -> QawResult<T> // 재시도 루프
    pub fn run<T, F>(&self, mut op: F) -> QawResult<T>
    where
        F: FnMut(usize) -> QawResult<T>,
    {
        self.validate()?;
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() => {
                    if attempt >= self.max_attempts {
                        return Err(QawError::RetriesExhausted {
                            attempts: attempt,
                            last_error: e.to_string(),
                        });
                    }
                    log::warn!(
                        "attempt {}/{} failed: {}; retrying in {}s",
                        attempt,
                        self.max_attempts,
                        e,
                        self.delay.as_secs()
                    );
                    attempt += 1;
                    std::thread::sleep(self.delay);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::queue()
    }
}

impl fmt::Display for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RetryPolicy(max_attempts={}, delay={}s)",
            self.max_attempts,
            self.delay.as_secs()
        )
    }
}

// ============================================================================
// Retrying Executor
// ============================================================================

/// Executor wrapper applying a retry policy
/// Gantree: RetryingExecutor<E> // 재시도 래퍼
#[derive(Debug, Clone)]
pub struct RetryingExecutor<E> {
    inner: E,
    policy: RetryPolicy,
}

impl<E: Executor> RetryingExecutor<E> {
    /// Wrap an executor
    pub fn new(inner: E, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Retry policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Wrapped executor
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Unwrap
    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Executor> Executor for RetryingExecutor<E> {
    fn context(&self) -> &BackendContext {
        self.inner.context()
    }

    fn execute(
        &self,
        ops: &[Operation],
        device: &DeviceDescriptor,
        shots: u64,
    ) -> QawResult<RawResult> {
        self.policy.run(|attempt| {
            log::debug!("{}: attempt {}", self.inner.name(), attempt);
            self.inner.execute(ops, device, shots)
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
