use std::{future, pin::Pin, time::Duration};

use tokio::time::{Sleep, sleep};

/// Single-slot timer: scheduling a value replaces whatever was pending.
pub(crate) struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Pin<Box<Sleep>>)>,
}

impl<T> Debouncer<T> {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the quiet period.
    pub(crate) fn schedule(&mut self, value: T) {
        self.pending = Some((value, Box::pin(sleep(self.delay))));
    }

    pub(crate) fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves with the scheduled value once its quiet period has elapsed.
    ///
    /// Pends forever while nothing is scheduled. Dropping the future before it
    /// resolves leaves the pending value and its deadline untouched, so this
    /// can sit in a `tokio::select!` loop.
    pub(crate) async fn fired(&mut self) -> T {
        if let Some((_, timer)) = self.pending.as_mut() {
            timer.as_mut().await;
        }

        match self.pending.take() {
            Some((value, _)) => value,
            None => future::pending().await,
        }
    }
}
