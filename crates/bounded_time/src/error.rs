// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;

/// The result type for fallible operations that use the [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur when working with [`Time`][crate::Time] values and timers.
///
/// Most misuse of a `Time` is rejected at compile time. The errors left for runtime are:
///
/// * Parsing problems when reading a `Time` from text.
/// * Values that do not fit the target representation, such as a negative `Time`
///   converted into a [`Duration`][std::time::Duration].
/// * Failure to spawn the thread of a background [`Timer`][crate::Timer].
///
/// # Limited introspection
///
/// Other than implementing the [`std::error::Error`] and [`core::fmt::Debug`] traits, this error type
/// currently provides no introspection capabilities.
///
/// # Examples
///
/// ```
/// use bounded_time::{Minutes, Seconds, Time};
///
/// "[ 5 seconds; ]".parse::<Time<Seconds, Minutes>>().unwrap_err();
/// ```
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(ErrorKind);

#[derive(Debug, thiserror::Error)]
enum ErrorKind {
    #[error("invalid time: {0}")]
    Parse(Cow<'static, str>),

    #[error("time is negative ({0}ns) and cannot be represented as a duration")]
    NegativeDuration(i128),

    #[error("{0}")]
    OutOfRange(Cow<'static, str>),

    #[error("failed to spawn the timer thread")]
    Spawn(#[source] std::io::Error),
}

impl Error {
    const fn from_kind(kind: ErrorKind) -> Self {
        Self(kind)
    }

    pub(crate) fn parse(message: impl Into<Cow<'static, str>>) -> Self {
        Self::from_kind(ErrorKind::Parse(message.into()))
    }

    pub(crate) const fn negative_duration(nanos: i128) -> Self {
        Self::from_kind(ErrorKind::NegativeDuration(nanos))
    }

    pub(crate) fn out_of_range(message: impl Into<Cow<'static, str>>) -> Self {
        Self::from_kind(ErrorKind::OutOfRange(message.into()))
    }

    pub(crate) const fn spawn(error: std::io::Error) -> Self {
        Self::from_kind(ErrorKind::Spawn(error))
    }

    #[cfg(test)]
    const fn kind(&self) -> &ErrorKind {
        &self.0
    }
}
