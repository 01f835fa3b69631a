//! Bounded retry with exponential backoff.

use std::future::Future;

use super::config::AuthConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay_ms: u32,
    pub multiplier: u32,
}

impl RetryPolicy {
    /// Delay before the retry that follows attempt number `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> u32 {
        let factor = self.multiplier.max(1).saturating_pow(attempt.saturating_sub(1));
        self.initial_delay_ms.saturating_mul(factor)
    }
}

impl From<&AuthConfig> for RetryPolicy {
    fn from(config: &AuthConfig) -> Self {
        Self {
            max_attempts: config.profile_retry_attempts.max(1),
            initial_delay_ms: config.profile_retry_initial_delay_ms,
            multiplier: config.profile_retry_multiplier,
        }
    }
}

/// Run `op` until it succeeds or `policy.max_attempts` is exhausted, sleeping
/// with `sleep` between attempts. Returns the last error on exhaustion.
pub async fn retry_with_backoff<T, E, Op, OpFut, Sleep, SleepFut>(
    policy: RetryPolicy,
    mut op: Op,
    mut sleep: Sleep,
) -> Result<T, E>
where
    Op: FnMut() -> OpFut,
    OpFut: Future<Output = Result<T, E>>,
    Sleep: FnMut(u32) -> SleepFut,
    SleepFut: Future<Output = ()>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= policy.max_attempts => return Err(e),
            Err(_) => {
                sleep(policy.delay_after(attempt)).await;
                attempt += 1;
            }
        }
    }
}

/// Browser sleep backed by `setTimeout`
pub async fn browser_sleep(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    const POLICY: RetryPolicy = RetryPolicy {
        max_attempts: 4,
        initial_delay_ms: 50,
        multiplier: 2,
    };

    #[test]
    fn test_delays_grow_geometrically() {
        assert_eq!(POLICY.delay_after(1), 50);
        assert_eq!(POLICY.delay_after(2), 100);
        assert_eq!(POLICY.delay_after(3), 200);
    }

    #[test]
    fn test_succeeds_after_transient_failures() {
        let calls = Cell::new(0);
        let sleeps = RefCell::new(Vec::new());
        let result: Result<&str, &str> = block_on(retry_with_backoff(
            POLICY,
            || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n < 3 {
                        Err("not yet")
                    } else {
                        Ok("profile")
                    }
                }
            },
            |ms| {
                sleeps.borrow_mut().push(ms);
                async {}
            },
        ));
        assert_eq!(result, Ok("profile"));
        assert_eq!(calls.get(), 3);
        assert_eq!(*sleeps.borrow(), vec![50, 100]);
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let calls = Cell::new(0);
        let result: Result<(), String> = block_on(retry_with_backoff(
            POLICY,
            || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move { Err(format!("attempt {}", n)) }
            },
            |_| async {},
        ));
        assert_eq!(result, Err("attempt 4".to_string()));
        assert_eq!(calls.get(), 4);
    }
}
