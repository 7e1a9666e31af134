//! Timeout guard for in-flight requests.
//!
//! A guard arms a timer task that cancels a [`CancellationToken`] once the
//! bound elapses. Whoever holds the token races the request against
//! `token.cancelled()`; dropping the request future aborts the HTTP call.
//! Disarming (or dropping) the guard aborts the timer so it can never fire
//! after the request has completed.

use super::TransportError;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Armed timer that cancels its token when the timeout elapses.
#[derive(Debug)]
pub struct TimeoutGuard {
    token: CancellationToken,
    timer: JoinHandle<()>,
    timeout: Duration,
}

impl TimeoutGuard {
    /// Spawn the timer task. Must be called from within a tokio runtime.
    pub fn arm(timeout: Duration) -> Self {
        let token = CancellationToken::new();
        let timer_token = token.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            timer_token.cancel();
        });

        Self {
            token,
            timer,
            timeout,
        }
    }

    /// Token cancelled when the timeout fires.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// The bound this guard was armed with.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Stop the timer. The token stays uncancelled from here on.
    pub fn disarm(self) {
        // Drop does the work.
    }
}

impl Drop for TimeoutGuard {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

/// Run `fut` under a timeout guard.
///
/// Resolves to the future's own result if it completes first, otherwise to
/// [`TransportError::Timeout`] and the future is dropped (cancelling it).
pub async fn run_with_timeout<F, T>(fut: F, timeout: Duration) -> Result<T, TransportError>
where
    F: Future<Output = Result<T, TransportError>>,
{
    let guard = TimeoutGuard::arm(timeout);
    let token = guard.token().clone();

    let result = tokio::select! {
        biased;
        res = fut => res,
        _ = token.cancelled() => {
            tracing::debug!(timeout_ms = timeout.as_millis() as u64, "Request cancelled by timeout");
            Err(TransportError::Timeout(timeout.as_millis() as u64))
        }
    };

    guard.disarm();
    result
}
