//! Pacing of connection attempts to decoys.
//!
//! The first [`BACKOFF_FREE_ATTEMPTS`] attempts go out immediately to keep
//! the initial connection latency low. After that the wait grows as
//! `1s * 3^(attempt - 1)`, so attempt 2 waits 3s, attempt 3 waits 9s and so
//! on, without a cap: bound `attempt` in the caller if the wall-clock wait
//! must be capped. Nothing is kept between calls.
//!
//! ## Example usage
//! ```
//! use tapdance::backoff::schedule_delay;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! for attempt in 0..3 {
//!     if let Some(signal) = schedule_delay(attempt) {
//!         // dropping the signal instead, e.g., in tokio::select!, cancels
//!         // the wait
//!         signal.await;
//!     }
//!     // dial the decoy (not part of this crate)
//! }
//! # }
//! ```

use log::debug;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Instant, Sleep};

use crate::constants::{BACKOFF_BASE, BACKOFF_FREE_ATTEMPTS};

/// The wait before connection attempt number `attempt` (counting prior
/// failed attempts from 0), or `None` if there is no wait. Saturates at
/// `u64::MAX` seconds.
pub fn backoff_duration(attempt: u32) -> Option<Duration> {
    if attempt < BACKOFF_FREE_ATTEMPTS {
        return None;
    }
    let secs = BACKOFF_BASE.checked_pow(attempt - 1).unwrap_or(u64::MAX);
    Some(Duration::from_secs(secs))
}

/// Get a signal that fires when it is time to make connection attempt
/// `attempt`, or `None` to proceed immediately. Must be called from within a
/// tokio runtime.
pub fn schedule_delay(attempt: u32) -> Option<DelaySignal> {
    let duration = backoff_duration(attempt)?;
    debug!("backoff: attempt {attempt}, waiting {duration:?} before connecting");
    Some(DelaySignal::new(duration))
}

/// Wait as required before connection attempt number `attempt`.
pub async fn sleep_before_connect(attempt: u32) {
    if let Some(signal) = schedule_delay(attempt) {
        signal.await;
    }
}

/// A pending backoff wait. Completes once the delay has passed; dropping it
/// cancels the wait.
#[derive(Debug)]
pub struct DelaySignal {
    sleep: Pin<Box<Sleep>>,
    duration: Duration,
}

impl DelaySignal {
    fn new(duration: Duration) -> Self {
        DelaySignal {
            sleep: Box::pin(tokio::time::sleep(duration)),
            duration,
        }
    }

    /// The total wait, as scheduled.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The instant at which the signal fires.
    pub fn deadline(&self) -> Instant {
        self.sleep.deadline()
    }

    /// Check if the signal has fired.
    pub fn is_elapsed(&self) -> bool {
        self.sleep.is_elapsed()
    }
}

impl Future for DelaySignal {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.sleep.as_mut().poll(cx)
    }
}
