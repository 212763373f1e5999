// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Text representation of [`Time`].
//!
//! A time is written as a bracketed list of `<magnitude> <unit>` entries, finest unit
//! first, each entry terminated by `;`:
//!
//! ```text
//! [ 5 seconds; 10 minutes; ]
//! ```
//!
//! Parsing accepts the same form, with either unit names (`seconds`) or unit symbols (`s`).
//! The parsed time must list exactly the units of its bounds, and is normalized.
//!
//! With the `serde` feature, `Time` serializes to and deserializes from this string form.

use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use crate::{Error, Granularity, Time, Unit};

impl<L: Granularity, H: Granularity> Display for Time<L, H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        for (unit, magnitude) in self.entries() {
            write!(f, "{magnitude} {}; ", unit.name())?;
        }
        f.write_str("]")
    }
}

impl<L: Granularity, H: Granularity> Debug for Time<L, H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Time");
        for (unit, magnitude) in self.entries() {
            debug.field(unit.symbol(), &magnitude);
        }
        debug.finish()
    }
}

impl<L: Granularity, H: Granularity> FromStr for Time<L, H> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| Error::parse("expected the entries to be enclosed in '[' and ']'"))?;

        let mut time = Self::ZERO;
        let mut expected = L::UNIT.index();

        for entry in body.split(';').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (unit, magnitude) = parse_entry(entry)?;

            if expected > H::UNIT.index() || unit.index() != expected {
                return Err(Error::parse(format!(
                    "unexpected unit '{unit}', the units from {} to {} must be listed in order",
                    L::UNIT,
                    H::UNIT
                )));
            }

            time.fields[expected] = magnitude;
            expected += 1;
        }

        if expected != H::UNIT.index() + 1 {
            return Err(Error::parse(format!(
                "missing entries, the units from {} to {} must all be present",
                L::UNIT,
                H::UNIT
            )));
        }

        time.checked_normalized()
            .ok_or_else(|| Error::out_of_range("the parsed time overflows its coarsest unit"))
    }
}

fn parse_entry(entry: &str) -> Result<(Unit, i64), Error> {
    let mut parts = entry.split_whitespace();

    let (Some(magnitude), Some(label), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Error::parse(format!("expected '<magnitude> <unit>', found '{entry}'")));
    };

    let magnitude = magnitude
        .parse::<i64>()
        .map_err(|e| Error::parse(format!("invalid magnitude '{magnitude}': {e}")))?;
    let unit = Unit::from_label(label).ok_or_else(|| Error::parse(format!("unknown unit '{label}'")))?;

    Ok((unit, magnitude))
}

#[cfg(any(feature = "serde", test))]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl<L: Granularity, H: Granularity> serde_core::Serialize for Time<L, H> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde_core::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(any(feature = "serde", test))]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl<'de, L: Granularity, H: Granularity> serde_core::Deserialize<'de> for Time<L, H> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde_core::Deserializer<'de>,
    {
        <String as serde_core::Deserialize>::deserialize(deserializer)?
            .parse::<Self>()
            .map_err(serde_core::de::Error::custom)
    }
}
