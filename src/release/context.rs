//! Cancellation and deadline signal for a resolution
//!
//! The signal is checked before every page fetch and raced against the
//! fetch itself, so a cancelled operation stops at the next page boundary
//! at the latest.

use std::future::{Future, pending};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

use crate::release::error::ReleaseError;

/// Carries an optional cancellation signal and an optional deadline
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancelled: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Cancels every [`Context`] cloned from the one it was created with
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl Context {
    /// A context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that is cancelled through the returned handle
    pub fn cancellable() -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let context = Self {
            cancelled: Some(receiver),
            deadline: None,
        };
        (context, CancelHandle { sender })
    }

    /// Adds a deadline `timeout` from now. An earlier existing deadline is kept.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Adds a deadline. An earlier existing deadline is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Returns the error the context has already failed with, if any
    pub fn err(&self) -> Option<ReleaseError> {
        if self.cancelled.as_ref().is_some_and(|rx| *rx.borrow()) {
            return Some(ReleaseError::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some(ReleaseError::DeadlineExceeded);
        }
        None
    }

    /// Runs `future` unless the context fails first.
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, ReleaseError> {
        if let Some(err) = self.err() {
            return Err(err);
        }

        let cancelled = async {
            match self.cancelled.clone() {
                Some(mut rx) => {
                    // a dropped handle can no longer cancel
                    if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                        pending::<()>().await;
                    }
                }
                None => pending::<()>().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            output = future => Ok(output),
            () = cancelled => Err(ReleaseError::Cancelled),
            () = expired => Err(ReleaseError::DeadlineExceeded),
        }
    }
}
