// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::{Level, event};

use crate::{Error, Granularity, Result, Time};

const THREAD_NAME: &str = "bounded-time-timer";

const PENDING: u8 = 0;
const FIRING: u8 = 1;
const ELAPSED: u8 = 2;
const CANCELLED: u8 = 3;

/// Selects where a [`Timer`] sleeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerMode {
    /// Sleep on the calling thread. [`Timer::new`] returns once the callback has run.
    Blocking,

    /// Sleep on a dedicated thread. [`Timer::new`] returns immediately.
    Background,
}

/// Sleeps for the total of a [`Time`] and then invokes a callback, at most once.
///
/// A negative time sleeps for zero. The callback runs on the calling thread in
/// [`TimerMode::Blocking`] and on a named thread owned by the timer in
/// [`TimerMode::Background`].
///
/// A background timer can be [cancelled][Self::cancel] until its callback starts, and
/// [waited for][Self::wait]. Dropping the handle detaches the timer: the callback still
/// runs when the time is up.
///
/// # Examples
///
/// ```
/// use std::sync::mpsc;
/// use std::time::Duration;
///
/// use bounded_time::{Timer, TimerMode, time};
///
/// let (sender, receiver) = mpsc::channel();
/// let timer = Timer::new(time![10 ms, 0 s], TimerMode::Background, move || {
///     sender.send("fired").unwrap();
/// })?;
///
/// assert_eq!(receiver.recv_timeout(Duration::from_secs(5)), Ok("fired"));
/// timer.wait();
/// assert!(timer.elapsed());
///
/// # Ok::<(), bounded_time::Error>(())
/// ```
#[derive(Debug)]
pub struct Timer {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    state: AtomicU8,
    lock: Mutex<()>,
    signal: Condvar,
}

impl Timer {
    /// Creates a timer that calls `callback` once `time` has passed.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread of a [`TimerMode::Background`] timer cannot be
    /// spawned. The callback is not called in that case.
    pub fn new<L, H, F>(time: Time<L, H>, mode: TimerMode, callback: F) -> Result<Self>
    where
        L: Granularity,
        H: Granularity,
        F: FnOnce() + Send + 'static,
    {
        let delay = sleep_duration(&time);

        match mode {
            TimerMode::Blocking => {
                thread::sleep(delay);
                event!(Level::DEBUG, "timer fired");
                callback();
                Ok(Self::with_state(ELAPSED))
            }
            TimerMode::Background => Self::spawn(delay, callback),
        }
    }

    fn with_state(state: u8) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: AtomicU8::new(state),
                lock: Mutex::new(()),
                signal: Condvar::new(),
            }),
        }
    }

    fn spawn<F>(delay: Duration, callback: F) -> Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let timer = Self::with_state(PENDING);
        let shared = Arc::clone(&timer.shared);

        thread::Builder::new()
            .name(THREAD_NAME.to_owned())
            .spawn(move || shared.run(delay, callback))
            .map_err(Error::spawn)?;

        event!(Level::DEBUG, ?delay, "background timer spawned");

        Ok(timer)
    }

    /// Returns `true` once the callback has returned.
    #[must_use]
    pub fn elapsed(&self) -> bool {
        self.shared.state() == ELAPSED
    }

    /// Returns `true` if the timer was cancelled before its callback ran.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.shared.state() == CANCELLED
    }

    /// Cancels the timer, so its callback never runs.
    ///
    /// Returns `true` if the cancellation took effect, and `false` if the callback has
    /// already started or the timer was cancelled before.
    pub fn cancel(&self) -> bool {
        let cancelled = self.shared.finish(PENDING, CANCELLED);
        if cancelled {
            event!(Level::DEBUG, "timer cancelled");
        }
        cancelled
    }

    /// Blocks until the callback has returned or the timer is cancelled.
    #[cfg_attr(test, mutants::skip)] // Causes test timeout.
    pub fn wait(&self) {
        let mut guard = self.shared.lock.lock();
        while !self.shared.is_finished() {
            self.shared.signal.wait(&mut guard);
        }
    }

    /// Blocks until the callback has returned, the timer is cancelled, or `timeout` passes.
    ///
    /// Returns `true` if the timer finished within the timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.wait();
            return true;
        };

        let mut guard = self.shared.lock.lock();
        while !self.shared.is_finished() {
            if self.shared.signal.wait_until(&mut guard, deadline).timed_out() {
                return self.shared.is_finished();
            }
        }
        true
    }
}

impl Shared {
    fn state(&self) -> u8 {
        self.state.load(Ordering::Acquire)
    }

    fn is_finished(&self) -> bool {
        matches!(self.state(), ELAPSED | CANCELLED)
    }

    /// Moves the state from `from` to the final state `to` and wakes every waiter.
    fn finish(&self, from: u8, to: u8) -> bool {
        if self
            .state
            .compare_exchange(from, to, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        // Waiters check the state under the lock, so notifying under it cannot be missed.
        let _guard = self.lock.lock();
        self.signal.notify_all();
        true
    }

    #[cfg_attr(test, mutants::skip)] // Causes test timeout.
    fn run<F: FnOnce()>(&self, delay: Duration, callback: F) {
        let deadline = Instant::now().checked_add(delay);

        {
            let mut guard = self.lock.lock();
            while self.state() == PENDING {
                match deadline {
                    Some(deadline) => {
                        if self.signal.wait_until(&mut guard, deadline).timed_out() {
                            break;
                        }
                    }
                    None => self.signal.wait(&mut guard),
                }
            }
        }

        if self
            .state
            .compare_exchange(PENDING, FIRING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        event!(Level::DEBUG, "timer fired");

        let _finished = FinishOnDrop(self);
        callback();
    }
}

// Marks the timer elapsed even if the callback panics, so waiters are released.
struct FinishOnDrop<'a>(&'a Shared);

impl Drop for FinishOnDrop<'_> {
    fn drop(&mut self) {
        self.0.finish(FIRING, ELAPSED);
    }
}

/// Converts a time into the duration a timer sleeps for, clamping negative times to zero.
pub(crate) fn sleep_duration<L: Granularity, H: Granularity>(time: &Time<L, H>) -> Duration {
    if time.is_negative() {
        return Duration::ZERO;
    }

    Duration::try_from(*time).unwrap_or(Duration::MAX)
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc;

    use super::*;
    use crate::{Hours, Seconds, time};

    const GENEROUS: Duration = Duration::from_secs(10);

    static_assertions::assert_impl_all!(Timer: std::fmt::Debug, Send, Sync);
    static_assertions::assert_impl_all!(TimerMode: std::fmt::Debug, Clone, Copy, Send, Sync);

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let clone = Arc::clone(&count);
        (count, move || {
            clone.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn sleep_duration_clamps() {
        assert_eq!(sleep_duration(&time![-5 s]), Duration::ZERO);
        assert_eq!(sleep_duration(&time![500 ms, 1 s]), Duration::from_millis(1500));
        assert_eq!(sleep_duration(&Time::<Hours>::new(&[i64::MAX])), Duration::MAX);
    }

    #[test]
    fn blocking_runs_callback_before_returning() {
        let (count, callback) = counter();

        let timer = Timer::new(time![5 ms, 0 s], TimerMode::Blocking, callback).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(timer.elapsed());
        assert!(!timer.is_cancelled());
        assert!(!timer.cancel());
        assert!(timer.wait_timeout(Duration::ZERO));
    }

    #[test]
    #[tracing_test::traced_test]
    fn blocking_logs_fired() {
        let _timer = Timer::new(Time::<Seconds>::ZERO, TimerMode::Blocking, || {}).unwrap();

        assert!(logs_contain("timer fired"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn background_logs_spawned() {
        let timer = Timer::new(Time::<Seconds>::ZERO, TimerMode::Background, || {}).unwrap();
        assert!(timer.wait_timeout(GENEROUS));

        assert!(logs_contain("background timer spawned"));
    }

    #[test]
    fn blocking_negative_time_does_not_sleep() {
        let start = Instant::now();

        let timer = Timer::new(time![0 min, -1 h], TimerMode::Blocking, || {}).unwrap();

        assert!(timer.elapsed());
        assert!(start.elapsed() < Duration::from_secs(60));
    }

    #[test]
    fn background_zero_elapses() {
        let (count, callback) = counter();

        let timer = Timer::new(Time::<Seconds>::ZERO, TimerMode::Background, callback).unwrap();

        assert!(timer.wait_timeout(GENEROUS));
        assert!(timer.elapsed());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!timer.cancel());
    }

    #[test]
    fn background_wait_blocks_until_elapsed() {
        let (count, callback) = counter();

        let timer = Timer::new(time![20 ms, 0 s], TimerMode::Background, callback).unwrap();
        timer.wait();

        assert!(timer.elapsed());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancel_prevents_callback() {
        let (count, callback) = counter();

        let timer = Timer::new(time![0 min, 1 h], TimerMode::Background, callback).unwrap();
        assert!(!timer.wait_timeout(Duration::from_millis(10)));

        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(timer.wait_timeout(GENEROUS));
        assert!(timer.is_cancelled());
        assert!(!timer.elapsed());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn dropped_handle_still_fires() {
        let (sender, receiver) = mpsc::channel();

        let timer = Timer::new(time![1 ms, 0 s], TimerMode::Background, move || {
            sender.send(()).unwrap();
        })
        .unwrap();
        drop(timer);

        assert_eq!(receiver.recv_timeout(GENEROUS), Ok(()));
    }

    #[test]
    fn callback_runs_on_named_thread() {
        let (sender, receiver) = mpsc::channel();

        let _timer = Timer::new(Time::<Seconds>::ZERO, TimerMode::Background, move || {
            sender.send(thread::current().name().map(str::to_owned)).unwrap();
        })
        .unwrap();

        assert_eq!(receiver.recv_timeout(GENEROUS).unwrap().as_deref(), Some(THREAD_NAME));
    }

    #[test]
    fn panicking_callback_releases_waiters() {
        let timer = Timer::new(Time::<Seconds>::ZERO, TimerMode::Background, || {
            panic!("callback failure");
        })
        .unwrap();

        assert!(timer.wait_timeout(GENEROUS));
        assert!(timer.elapsed());
    }
}
