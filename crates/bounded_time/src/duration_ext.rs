// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use crate::{Error, Granularity, Result, Time, Unit};

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Extension trait converting a [`Duration`] into a [`Time`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use bounded_time::{DurationExt, Hours, Seconds, Time};
///
/// let time: Time<Seconds, Hours> = Duration::from_secs(3661).to_time()?;
/// assert_eq!(time.to_string(), "[ 1 seconds; 1 minutes; 1 hours; ]");
///
/// # Ok::<(), bounded_time::Error>(())
/// ```
pub trait DurationExt {
    /// Decomposes the duration into a normalized [`Time`] with bounds `[L, H]`.
    ///
    /// Precision finer than `L` is truncated.
    ///
    /// # Errors
    ///
    /// Returns an error if the coarsest unit cannot hold the remaining value.
    fn to_time<L: Granularity, H: Granularity>(&self) -> Result<Time<L, H>>;
}

impl DurationExt for Duration {
    fn to_time<L: Granularity, H: Granularity>(&self) -> Result<Time<L, H>> {
        Time::try_from_duration(*self)
    }
}

impl<L: Granularity, H: Granularity> Time<L, H> {
    /// Decomposes a [`Duration`] into a normalized time with bounds `[L, H]`.
    ///
    /// Precision finer than `L` is truncated.
    ///
    /// # Errors
    ///
    /// Returns an error if the coarsest unit cannot hold the remaining value.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use bounded_time::{Milliseconds, Seconds, Time};
    ///
    /// let time = Time::<Milliseconds, Seconds>::try_from_duration(Duration::from_micros(1_500_900))?;
    /// assert_eq!(time.get::<Milliseconds>(), 500);
    /// assert_eq!(time.get::<Seconds>(), 1);
    ///
    /// # Ok::<(), bounded_time::Error>(())
    /// ```
    pub fn try_from_duration(duration: Duration) -> Result<Self> {
        let mut time = Self::ZERO;
        let (low, high) = (L::UNIT.index(), H::UNIT.index());

        let mut rest = duration.as_nanos() / u128::from(L::UNIT.nanos().unsigned_abs());
        for index in low..high {
            let ratio = u128::from(Unit::carry_ratio(index).unsigned_abs());
            time.fields[index] = i64::try_from(rest % ratio).map_err(|e| Error::out_of_range(e.to_string()))?;
            rest /= ratio;
        }

        time.fields[high] = i64::try_from(rest).map_err(|_err| {
            Error::out_of_range(format!("{duration:?} does not fit into the {} of a time", H::UNIT))
        })?;

        Ok(time)
    }
}

impl<L: Granularity, H: Granularity> TryFrom<Time<L, H>> for Duration {
    type Error = Error;

    /// Converts the exact value of the time into a [`Duration`].
    fn try_from(time: Time<L, H>) -> Result<Self> {
        let nanos = time.as_nanos();
        if nanos < 0 {
            return Err(Error::negative_duration(nanos));
        }

        let secs = u64::try_from(nanos / NANOS_PER_SEC)
            .map_err(|_err| Error::out_of_range(format!("{time} is too large to be represented as a duration")))?;
        let subsec_nanos = u32::try_from(nanos % NANOS_PER_SEC).map_err(|e| Error::out_of_range(e.to_string()))?;

        Ok(Self::new(secs, subsec_nanos))
    }
}
