//! The delay primitive.
//!
//! [`wait`] suspends the calling task for a validated number of milliseconds
//! on the tokio timer and then resumes with `()`. Each call owns its own
//! timer; concurrent delays do not interact. There is no API to cut a delay
//! short.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::time::Sleep;
use wait_types::Milliseconds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayState {
    /// Timer running.
    Pending,
    /// Timer elapsed and control returned to the caller.
    Complete,
}

/// Future returned by [`wait`].
#[derive(Debug)]
#[must_use = "a delay does nothing unless awaited"]
pub struct Delay {
    duration: Milliseconds,
    // `None` for a zero duration, which completes on first poll.
    sleep: Option<Pin<Box<Sleep>>>,
    state: DelayState,
}

/// Suspend for `duration`.
///
/// A non-zero duration arms a tokio timer immediately, so this must be called
/// from within a tokio runtime with the time driver enabled.
pub fn wait(duration: Milliseconds) -> Delay {
    let sleep = if duration.is_zero() {
        None
    } else {
        Some(Box::pin(tokio::time::sleep(duration.as_duration())))
    };
    tracing::trace!(millis = duration.as_u64(), "delay armed");

    Delay {
        duration,
        sleep,
        state: DelayState::Pending,
    }
}

impl Delay {
    #[must_use]
    pub fn duration(&self) -> Milliseconds {
        self.duration
    }

    #[must_use]
    pub fn state(&self) -> DelayState {
        self.state
    }
}

impl Future for Delay {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        if this.state == DelayState::Complete {
            return Poll::Ready(());
        }

        if let Some(sleep) = this.sleep.as_mut()
            && sleep.as_mut().poll(cx).is_pending()
        {
            return Poll::Pending;
        }

        this.state = DelayState::Complete;
        tracing::trace!(millis = this.duration.as_u64(), "delay elapsed");
        Poll::Ready(())
    }
}
