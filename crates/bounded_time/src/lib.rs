// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(
    test,
    allow(
        clippy::arithmetic_side_effects,
        clippy::unchecked_time_subtraction,
        reason = "allow these lints in tests to improve the readability of the tests"
    )
)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Calendar-free durations decomposed into a fixed range of units, checked at compile time.
//!
//! # Quick Start
//!
//! ```
//! use bounded_time::{Hours, Microseconds, Minutes, Seconds, Time, time};
//!
//! let boot: Time<Microseconds, Minutes> = time![10 us, 20 ms, 0 s, 1 min];
//! let uptime: Time<Microseconds, Hours> = time![990 us, 980 ms, 20 s, 10 min, 2 h];
//!
//! // Mixed bounds widen to the finer low unit and the coarser high unit.
//! let total: Time<Microseconds, Hours> = boot + uptime;
//! assert_eq!(total.to_string(), "[ 0 microseconds; 1 milliseconds; 21 seconds; 11 minutes; 2 hours; ]");
//!
//! // Narrowing folds coarser units into the new high unit and drops finer ones.
//! let coarse: Time<Seconds, Minutes> = total.convert();
//! assert_eq!(coarse.to_string(), "[ 21 seconds; 131 minutes; ]");
//! ```
//!
//! # Why?
//!
//! A [`std::time::Duration`] is a single count of nanoseconds. Human-facing code often wants
//! the decomposed form instead, "2 hours, 11 minutes, 21 seconds", and wants to state which
//! units are meaningful. [`Time<L, H>`] tracks exactly the units from `L` to `H`:
//!
//! - **Checked bounds** - A low unit coarser than the high unit, or reading a unit outside of
//!   the bounds, fails the build rather than the program.
//! - **Always normalized** - Arithmetic carries surplus into coarser units and borrows
//!   deficits from them, so every unit but the coarsest stays within its natural range.
//! - **No allocation** - A `Time` is a small `Copy` value and most operations are `const fn`.
//!
//! # Overview
//!
//! - [`Time`] - A duration decomposed into the units `[L, H]`. [`DefaultTime`] tracks
//!   seconds, minutes, and hours.
//! - [`time!`] - Builds a `Time` from unit-labeled literals, inferring its bounds.
//! - [`Unit`] - The runtime counterpart of the unit marker types [`Nanoseconds`],
//!   [`Microseconds`], [`Milliseconds`], [`Seconds`], [`Minutes`] and [`Hours`].
//! - [`DurationExt`] - Conversions between `Duration` and `Time`.
//! - [`Clock`] - Reads the local time of day as a [`DefaultTime`].
//! - [`Timer`] - Invokes a callback once a `Time` has passed, blocking or in the background.
//! - [`Watch`] - Invokes a callback when the clock reaches a target time of day.
//! - [`Error`] - Represents an error that can occur when working with time. Provides limited
//!   introspection capabilities.
//!
//! # Text Format
//!
//! A `Time` displays as a bracketed list of its units, finest first:
//!
//! ```
//! use bounded_time::{Minutes, Seconds, Time};
//!
//! let time: Time<Seconds, Minutes> = "[ 5 s; 10 min; ]".parse()?;
//! assert_eq!(time.to_string(), "[ 5 seconds; 10 minutes; ]");
//!
//! # Ok::<(), bounded_time::Error>(())
//! ```
//!
//! # Testing
//!
//! Code that depends on the time of day should take a [`Clock`]. With the `test-util`
//! feature, [`Clock::new_frozen_at`] pins the clock to a fixed time.
//!
//! > **Important:** Never enable the `test-util` feature for production code. Only use it in your `dev-dependencies`.
//!
//! # Features
//!
//! This crate provides several optional features that can be enabled in your `Cargo.toml`:
//!
//! - **`test-util`** - Enables [`Clock::new_frozen_at`] for pinning the time of day in tests.
//!   **Only enable this in `dev-dependencies`.**
//! - **`serde`** - Adds serialization and deserialization support via [serde](https://serde.rs/),
//!   using the text format.
//!
//! # Logging
//!
//! Timers and watches emit [`tracing`](https://docs.rs/tracing) events at the `DEBUG` level
//! when they are scheduled, fire, or are cancelled. No subscriber is installed by this crate.

mod bounded;
mod clock;
mod duration_ext;
mod error;
mod fmt;
mod timer;
mod unit;
mod watch;

pub use bounded::{DefaultTime, Time};
pub use clock::Clock;
pub use duration_ext::DurationExt;
pub use error::{Error, Result};
pub use timer::{Timer, TimerMode};
pub use unit::{Granularity, Hours, Microseconds, Milliseconds, Minutes, Nanoseconds, Ordered, Seconds, Unit};
pub use watch::Watch;

/// Creates a [`Time`] from unit-labeled magnitudes, finest unit first.
///
/// The low bound is the first unit and the high bound the last one. Every unit in
/// between must be listed, in order. Units are written with their symbols: `ns`, `us`,
/// `ms`, `s`, `min` and `h`. The magnitudes are stored as given, without normalization.
///
/// The macro evaluates in a const context, so mistakes fail the build.
///
/// # Examples
///
/// ```
/// use bounded_time::{Hours, Minutes, Seconds, Time, time};
///
/// let time: Time<Seconds, Hours> = time![20 s, 10 min, 14 h];
/// assert_eq!(time.get::<Minutes>(), 10);
///
/// const TIMEOUT: Time<Seconds, Minutes> = time![30 s, 1 min];
/// assert_eq!(TIMEOUT.total::<Seconds>(), 90);
///
/// // An empty list is zero seconds.
/// assert!(time![].is_zero());
/// ```
///
/// Skipping a unit is rejected:
///
/// ```compile_fail
/// use bounded_time::time;
///
/// let time = time![20 s, 14 h];
/// ```
///
/// So are unknown units:
///
/// ```compile_fail
/// use bounded_time::time;
///
/// let time = time![2 d];
/// ```
#[macro_export]
macro_rules! time {
    () => {
        $crate::Time::<$crate::Seconds>::ZERO
    };
    ($($magnitude:literal $unit:ident),+ $(,)?) => {
        const {
            $crate::Time::<$crate::__first_unit!($($unit)+), $crate::__last_unit!($($unit)+)>::from_units(&[
                $(($crate::__unit_kind!($unit), $magnitude)),+
            ])
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __unit_type {
    (ns) => { $crate::Nanoseconds };
    (us) => { $crate::Microseconds };
    (ms) => { $crate::Milliseconds };
    (s) => { $crate::Seconds };
    (min) => { $crate::Minutes };
    (h) => { $crate::Hours };
    ($other:ident) => {
        ::core::compile_error!(::core::concat!(
            "unknown time unit `",
            ::core::stringify!($other),
            "`, expected one of `ns`, `us`, `ms`, `s`, `min` or `h`"
        ))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __unit_kind {
    (ns) => { $crate::Unit::Nanoseconds };
    (us) => { $crate::Unit::Microseconds };
    (ms) => { $crate::Unit::Milliseconds };
    (s) => { $crate::Unit::Seconds };
    (min) => { $crate::Unit::Minutes };
    (h) => { $crate::Unit::Hours };
    ($other:ident) => {
        ::core::compile_error!(::core::concat!(
            "unknown time unit `",
            ::core::stringify!($other),
            "`, expected one of `ns`, `us`, `ms`, `s`, `min` or `h`"
        ))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __first_unit {
    ($first:ident $($rest:ident)*) => {
        $crate::__unit_type!($first)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __last_unit {
    ($last:ident) => {
        $crate::__unit_type!($last)
    };
    ($first:ident $($rest:ident)+) => {
        $crate::__last_unit!($($rest)+)
    };
}
