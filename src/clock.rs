//! Time source and cancellable sleeping.

use chrono::Utc;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How a [`Clock::delay`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayOutcome {
    Elapsed,
    Cancelled,
}

pub trait Clock: Send + Sync {
    fn now_epoch_millis(&self) -> i64;

    /// Waits for `duration`, returning early with [`DelayOutcome::Cancelled`]
    /// as soon as `token` is cancelled.
    fn delay(
        &self,
        duration: Duration,
        token: &CancellationToken,
    ) -> impl Future<Output = DelayOutcome> + Send;
}

/// Wall clock backed by chrono and the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    async fn delay(&self, duration: Duration, token: &CancellationToken) -> DelayOutcome {
        tokio::select! {
            biased;
            _ = token.cancelled() => DelayOutcome::Cancelled,
            _ = tokio::time::sleep(duration) => DelayOutcome::Elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_delay_elapses() {
        let token = CancellationToken::new();
        let outcome = SystemClock.delay(Duration::from_millis(5), &token).await;
        assert_eq!(outcome, DelayOutcome::Elapsed);
    }

    #[tokio::test]
    async fn test_delay_returns_immediately_when_already_cancelled() {
        let token = CancellationToken::new();
        token.cancel();

        let started = Instant::now();
        let outcome = SystemClock.delay(Duration::from_secs(10), &token).await;
        assert_eq!(outcome, DelayOutcome::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_delay_interrupted_mid_wait() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let outcome = SystemClock.delay(Duration::from_secs(10), &token).await;
        assert_eq!(outcome, DelayOutcome::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_now_is_after_2024() {
        assert!(SystemClock.now_epoch_millis() > 1_704_067_200_000);
    }
}
