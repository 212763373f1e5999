// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hash;

/// A duration unit that a [`Time`][crate::Time] can track.
///
/// Units are totally ordered from the finest ([`Unit::Nanoseconds`]) to the coarsest
/// ([`Unit::Hours`]). Every unit except the coarsest converts into the next coarser one
/// by a fixed ratio:
///
/// | Unit           | Next coarser unit | Ratio |
/// |----------------|-------------------|-------|
/// | `Nanoseconds`  | `Microseconds`    | 1000  |
/// | `Microseconds` | `Milliseconds`    | 1000  |
/// | `Milliseconds` | `Seconds`         | 1000  |
/// | `Seconds`      | `Minutes`         | 60    |
/// | `Minutes`      | `Hours`           | 60    |
///
/// # Examples
///
/// ```
/// use bounded_time::Unit;
///
/// assert!(Unit::Seconds < Unit::Minutes);
/// assert_eq!(Unit::Seconds.ratio_to_next(), Some(60));
/// assert_eq!(Unit::Hours.ratio_to_next(), None);
/// assert_eq!(Unit::Minutes.name(), "minutes");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    /// One billionth of a second.
    Nanoseconds,
    /// One millionth of a second.
    Microseconds,
    /// One thousandth of a second.
    Milliseconds,
    /// One second.
    Seconds,
    /// Sixty seconds.
    Minutes,
    /// Sixty minutes.
    Hours,
}

impl Unit {
    /// The number of units.
    pub const COUNT: usize = 6;

    /// All units, finest first.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Nanoseconds,
        Self::Microseconds,
        Self::Milliseconds,
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
    ];

    /// Returns the position of the unit in [`Unit::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the unit at the given position of [`Unit::ALL`], if any.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT { Some(Self::ALL[index]) } else { None }
    }

    /// Returns how many of this unit make up one of the next coarser unit.
    ///
    /// Returns `None` for [`Unit::Hours`], the coarsest unit.
    #[must_use]
    pub const fn ratio_to_next(self) -> Option<i64> {
        match self {
            Self::Nanoseconds | Self::Microseconds | Self::Milliseconds => Some(1000),
            Self::Seconds | Self::Minutes => Some(60),
            Self::Hours => None,
        }
    }

    /// Returns the next coarser unit, or `None` for [`Unit::Hours`].
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Returns the number of nanoseconds in one of this unit.
    ///
    /// ```
    /// use bounded_time::Unit;
    ///
    /// assert_eq!(Unit::Milliseconds.nanos(), 1_000_000);
    /// assert_eq!(Unit::Hours.nanos(), 3_600_000_000_000);
    /// ```
    #[must_use]
    pub const fn nanos(self) -> i64 {
        match self {
            Self::Nanoseconds => 1,
            Self::Microseconds => 1_000,
            Self::Milliseconds => 1_000_000,
            Self::Seconds => 1_000_000_000,
            Self::Minutes => 60_000_000_000,
            Self::Hours => 3_600_000_000_000,
        }
    }

    /// Returns the plural name of the unit, as used when formatting a [`Time`][crate::Time].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nanoseconds => "nanoseconds",
            Self::Microseconds => "microseconds",
            Self::Milliseconds => "milliseconds",
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
        }
    }

    /// Returns the short symbol of the unit, such as `ms` or `min`.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "us",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "min",
            Self::Hours => "h",
        }
    }

    /// Looks a unit up by its [name][Self::name] or [symbol][Self::symbol].
    pub(crate) fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.name() == label || unit.symbol() == label)
    }

    /// Ratio used by the carry pass at `index`. The coarsest unit never carries.
    pub(crate) const fn carry_ratio(index: usize) -> i64 {
        match Self::ALL[index].ratio_to_next() {
            Some(ratio) => ratio,
            None => 1,
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A type-level [`Unit`], used as a bound of a [`Time`][crate::Time].
///
/// This trait is sealed. It is implemented by [`Nanoseconds`], [`Microseconds`],
/// [`Milliseconds`], [`Seconds`], [`Minutes`] and [`Hours`].
pub trait Granularity: sealed::Sealed + Copy + Default + Debug + Eq + Hash + Send + Sync + 'static {
    /// The unit this type stands for.
    const UNIT: Unit;
}

/// Pairs two granularities at the type level.
///
/// `Finer` is the finer of the two and `Coarser` the coarser one. This is what lets
/// `Time<Microseconds, Minutes> + Time<Seconds, Hours>` produce a
/// `Time<Microseconds, Hours>` without any runtime dispatch.
pub trait Ordered<Other: Granularity>: Granularity {
    /// The finer of `Self` and `Other`.
    type Finer: Granularity;

    /// The coarser of `Self` and `Other`.
    type Coarser: Granularity;
}

macro_rules! granularity {
    ($(#[$meta:meta])* $name:ident => $unit:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl Granularity for $name {
            const UNIT: Unit = Unit::$unit;
        }
    };
}

granularity!(
    /// Type-level [`Unit::Nanoseconds`].
    Nanoseconds => Nanoseconds
);
granularity!(
    /// Type-level [`Unit::Microseconds`].
    Microseconds => Microseconds
);
granularity!(
    /// Type-level [`Unit::Milliseconds`].
    Milliseconds => Milliseconds
);
granularity!(
    /// Type-level [`Unit::Seconds`].
    Seconds => Seconds
);
granularity!(
    /// Type-level [`Unit::Minutes`].
    Minutes => Minutes
);
granularity!(
    /// Type-level [`Unit::Hours`].
    Hours => Hours
);

// The list must stay ordered finest first: each head is finer than everything after it.
macro_rules! ordered {
    () => {};
    ($head:ident $(, $tail:ident)*) => {
        impl Ordered<$head> for $head {
            type Finer = $head;
            type Coarser = $head;
        }

        $(
            impl Ordered<$tail> for $head {
                type Finer = $head;
                type Coarser = $tail;
            }

            impl Ordered<$head> for $tail {
                type Finer = $head;
                type Coarser = $tail;
            }
        )*

        ordered!($($tail),*);
    };
}

ordered!(Nanoseconds, Microseconds, Milliseconds, Seconds, Minutes, Hours);
