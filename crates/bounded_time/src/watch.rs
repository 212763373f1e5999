// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use tracing::{Level, event};

use crate::timer::sleep_duration;
use crate::{Clock, Hours, Ordered, Result, Seconds, Time, Timer, TimerMode};

/// Invokes a callback when the local time of day reaches a target.
///
/// The delay is computed once, when the watch is created, as the target minus the time
/// read from the [`Clock`]. A target that is already behind the clock fires immediately.
/// The waiting itself is done by a [`Timer`], so a watch supports the same
/// [`TimerMode`]s, cancellation, and waiting.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-util")] {
/// use std::time::Duration;
///
/// use bounded_time::{Clock, TimerMode, Watch, time};
///
/// let clock = Clock::new_frozen_at(time![0 s, 30 min, 8 h]);
///
/// let watch = Watch::new(&clock, time![0 min, 9 h], TimerMode::Background, || {
///     println!("standup");
/// })?;
///
/// assert_eq!(watch.remaining(), Duration::from_secs(30 * 60));
/// assert!(watch.cancel());
/// # }
///
/// # Ok::<(), bounded_time::Error>(())
/// ```
#[derive(Debug)]
pub struct Watch {
    timer: Timer,
    remaining: Duration,
}

impl Watch {
    /// Creates a watch that calls `callback` when `clock` reaches `target`.
    ///
    /// The target may use any bounds; units finer than seconds delay the callback by
    /// that fraction of a second.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread of a [`TimerMode::Background`] watch cannot be spawned.
    pub fn new<L, H, F>(clock: &Clock, target: Time<L, H>, mode: TimerMode, callback: F) -> Result<Self>
    where
        L: Ordered<Seconds>,
        H: Ordered<Hours>,
        F: FnOnce() + Send + 'static,
    {
        let now = clock.now();
        let remaining = target - now;
        let delay = sleep_duration(&remaining);

        event!(Level::DEBUG, %now, %target, ?delay, "watch scheduled");

        Ok(Self {
            timer: Timer::new(remaining, mode, callback)?,
            remaining: delay,
        })
    }

    /// Returns the delay computed when the watch was created.
    ///
    /// This is zero for targets that were not ahead of the clock.
    #[must_use]
    pub const fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Returns `true` once the callback has returned.
    #[must_use]
    pub fn elapsed(&self) -> bool {
        self.timer.elapsed()
    }

    /// Returns `true` if the watch was cancelled before its callback ran.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.timer.is_cancelled()
    }

    /// Cancels the watch. See [`Timer::cancel`].
    pub fn cancel(&self) -> bool {
        self.timer.cancel()
    }

    /// Blocks until the callback has returned or the watch is cancelled.
    pub fn wait(&self) {
        self.timer.wait();
    }

    /// Blocks until the watch finishes or `timeout` passes. See [`Timer::wait_timeout`].
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        self.timer.wait_timeout(timeout)
    }
}
