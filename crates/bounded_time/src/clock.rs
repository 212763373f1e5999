// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use jiff::Zoned;

use crate::DefaultTime;

/// Provides the current local time of day as a [`DefaultTime`].
///
/// The clock reads the wall clock of the machine in its local time zone. Only the time of
/// day is kept: seconds, minutes, and hours since midnight. The date is discarded.
///
/// # Testing
///
/// Code that needs the time of day, such as [`Watch`][crate::Watch], takes a `Clock` so
/// tests can pin the time. When the `test-util` feature is enabled, [`Clock::new_frozen_at`]
/// creates a clock that always returns the same time.
///
/// # Cloning
///
/// Cloning a clock is inexpensive.
///
/// # Examples
///
/// ```
/// use bounded_time::{Clock, Hours, Minutes, Seconds};
///
/// let clock = Clock::new_system();
/// let now = clock.now();
///
/// assert!((0..24).contains(&now.get::<Hours>()));
/// assert!((0..60).contains(&now.get::<Minutes>()));
/// assert!((0..60).contains(&now.get::<Seconds>()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Clock(ClockRepr);

#[derive(Debug, Clone, Default)]
enum ClockRepr {
    #[default]
    System,
    #[cfg(any(feature = "test-util", test))]
    Frozen(DefaultTime),
}

impl Clock {
    /// Creates a clock that reads the local wall clock.
    #[must_use]
    pub const fn new_system() -> Self {
        Self(ClockRepr::System)
    }

    /// Creates a clock that always returns `time`.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(feature = "test-util")] {
    /// use bounded_time::{Clock, time};
    ///
    /// let clock = Clock::new_frozen_at(time![30 s, 15 min, 14 h]);
    ///
    /// assert_eq!(clock.now(), time![30 s, 15 min, 14 h]);
    /// assert_eq!(clock.now(), clock.now());
    /// # }
    /// ```
    #[cfg(any(feature = "test-util", test))]
    #[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
    #[must_use]
    pub const fn new_frozen_at(time: DefaultTime) -> Self {
        Self(ClockRepr::Frozen(time))
    }

    /// Returns the current local time of day.
    #[must_use]
    pub fn now(&self) -> DefaultTime {
        match &self.0 {
            ClockRepr::System => time_of_day(&Zoned::now()),
            #[cfg(any(feature = "test-util", test))]
            ClockRepr::Frozen(time) => *time,
        }
    }
}

impl DefaultTime {
    /// Returns the current local time of day read from the wall clock.
    ///
    /// This is a shortcut for `Clock::new_system().now()`.
    #[must_use]
    pub fn now() -> Self {
        Clock::new_system().now()
    }
}

fn time_of_day(zoned: &Zoned) -> DefaultTime {
    DefaultTime::new(&[
        i64::from(zoned.second()),
        i64::from(zoned.minute()),
        i64::from(zoned.hour()),
    ])
}
