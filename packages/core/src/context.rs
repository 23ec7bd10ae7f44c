//! Per-call cancellation and deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// The call was cancelled or ran past its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("call cancelled or past its deadline")]
pub struct Cancelled;

/// Ambient context every call carries.
///
/// Anything a conversion does that can wait (dialing a stream, mostly) must
/// go through [`run`](Self::run) so it stops as soon as the call is
/// cancelled or its deadline passes.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context with no deadline that is cancelled only explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Same cancellation, plus a deadline `timeout` from now.
    ///
    /// An earlier existing deadline is kept.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// A context cancelled whenever this one is, but cancellable on its own.
    pub fn child(&self) -> Self {
        Self {
            cancel: self.cancel.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Token that fires on explicit cancellation. Does not fire on deadline;
    /// use [`done`](Self::done) for that.
    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Completes when the call is cancelled or its deadline passes.
    pub async fn done(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.cancel.cancelled() => {}
                    _ = tokio::time::sleep_until(deadline) => {}
                }
            }
            None => self.cancel.cancelled().await,
        }
    }

    /// Run `fut` unless the call ends first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Cancelled> {
        if self.is_cancelled() {
            return Err(Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.done() => Err(Cancelled),
            output = fut => Ok(output),
        }
    }
}
