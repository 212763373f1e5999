// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::unit::{Granularity, Hours, Ordered, Seconds, Unit};

pub(crate) type Fields = [i64; Unit::COUNT];

/// A duration decomposed into one magnitude per unit in `[L, H]`.
///
/// `L` is the finest unit the time tracks and `H` the coarsest. For example,
/// `Time<Seconds, Hours>` stores seconds, minutes, and hours. The magnitudes live inline
/// in a small fixed array, so `Time` is `Copy` and never allocates.
///
/// # Normalization
///
/// Every operation that changes a time leaves it *normalized*: each unit except the
/// coarsest holds a value in `[0, ratio)`, where `ratio` is the number of such units in
/// the next coarser one. Surplus carries into the coarser unit and deficit borrows from it,
/// so the coarsest unit holds the sign of the whole value:
///
/// ```
/// use bounded_time::{Minutes, Seconds, Time};
///
/// let a = Time::<Seconds, Minutes>::new(&[50, 1]);
/// let b = Time::<Seconds, Minutes>::new(&[20, 0]);
///
/// assert_eq!((a + b).to_string(), "[ 10 seconds; 2 minutes; ]");
/// assert_eq!((b - a).to_string(), "[ 30 seconds; -2 minutes; ]");
/// ```
///
/// Values passed to [`Time::new`] are stored verbatim; call [`Time::normalized`] if the
/// input might not already be a valid decomposition.
///
/// # Compile-time checks
///
/// The bounds are validated when the type is used. A low unit coarser than the high unit
/// fails the build:
///
/// ```compile_fail
/// use bounded_time::{Hours, Seconds, Time};
///
/// let invalid = Time::<Hours, Seconds>::ZERO;
/// ```
///
/// So does accessing a unit outside of the bounds:
///
/// ```compile_fail
/// use bounded_time::{Hours, Minutes, Seconds, Time};
///
/// let time = Time::<Seconds, Minutes>::ZERO;
/// let hours = time.get::<Hours>();
/// ```
///
/// # Mixing bounds
///
/// Times with different bounds can be added and subtracted. The result covers the finer
/// of both low units and the coarser of both high units:
///
/// ```
/// use bounded_time::{Hours, Microseconds, Minutes, Time, time};
///
/// let a: Time<Microseconds, Minutes> = time![10 us, 20 ms, 0 s, 1 min];
/// let b: Time<Microseconds, Hours> = time![990 us, 980 ms, 20 s, 10 min, 2 h];
///
/// let sum: Time<Microseconds, Hours> = a + b;
/// assert_eq!(sum, time![0 us, 1 ms, 21 s, 11 min, 2 h]);
/// ```
#[derive(Clone, Copy)]
pub struct Time<L: Granularity, H: Granularity = L> {
    pub(crate) fields: Fields,
    bounds: PhantomData<(L, H)>,
}

/// A time of day as tracked by [`Clock`][crate::Clock]: seconds, minutes, and hours.
pub type DefaultTime = Time<Seconds, Hours>;

impl<L: Granularity, H: Granularity> Time<L, H> {
    const VALID_BOUNDS: () = assert!(
        L::UNIT.index() <= H::UNIT.index(),
        "the low unit of a `Time` cannot be coarser than its high unit"
    );

    const LOW_INDEX: usize = {
        let () = Self::VALID_BOUNDS;
        L::UNIT.index()
    };

    const HIGH_INDEX: usize = {
        let () = Self::VALID_BOUNDS;
        H::UNIT.index()
    };

    /// The number of units tracked by this time.
    pub const LEN: usize = Self::HIGH_INDEX - Self::LOW_INDEX + 1;

    /// A time with every unit set to zero.
    pub const ZERO: Self = Self::from_fields([0; Unit::COUNT]);

    pub(crate) const fn from_fields(fields: Fields) -> Self {
        let () = Self::VALID_BOUNDS;
        Self {
            fields,
            bounds: PhantomData,
        }
    }

    /// Creates a time from one magnitude per unit in `[L, H]`, finest first.
    ///
    /// The magnitudes are stored as given, without normalization.
    ///
    /// # Panics
    ///
    /// Panics if `magnitudes` does not contain exactly [`Self::LEN`] values. In a const
    /// context, this is a compile-time error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bounded_time::{Hours, Minutes, Seconds, Time};
    ///
    /// const TIME: Time<Seconds, Hours> = Time::new(&[20, 10, 14]);
    ///
    /// assert_eq!(TIME.get::<Seconds>(), 20);
    /// assert_eq!(TIME.get::<Minutes>(), 10);
    /// assert_eq!(TIME.get::<Hours>(), 14);
    /// ```
    #[must_use]
    pub const fn new(magnitudes: &[i64]) -> Self {
        assert!(
            magnitudes.len() == Self::LEN,
            "a `Time` needs exactly one magnitude per unit within its bounds"
        );

        let mut fields = [0; Unit::COUNT];
        let mut offset = 0;
        while offset < magnitudes.len() {
            fields[Self::LOW_INDEX + offset] = magnitudes[offset];
            offset += 1;
        }

        Self::from_fields(fields)
    }

    /// Creates a time from `(unit, magnitude)` pairs, finest first.
    ///
    /// This is what the [`time!`][crate::time] macro expands to. Unlike [`Time::new`],
    /// every magnitude is labeled, so skipping an intermediate unit is caught.
    ///
    /// # Panics
    ///
    /// Panics if the units are not exactly the units in `[L, H]`, finest first. In a
    /// const context, this is a compile-time error.
    ///
    /// ```compile_fail
    /// use bounded_time::{Hours, Seconds, Time, Unit};
    ///
    /// // minutes are missing
    /// const TIME: Time<Seconds, Hours> = Time::from_units(&[(Unit::Seconds, 20), (Unit::Hours, 14)]);
    /// ```
    #[must_use]
    pub const fn from_units(entries: &[(Unit, i64)]) -> Self {
        assert!(
            entries.len() == Self::LEN,
            "a `Time` needs exactly one magnitude per unit within its bounds"
        );

        let mut fields = [0; Unit::COUNT];
        let mut offset = 0;
        while offset < entries.len() {
            let (unit, magnitude) = entries[offset];
            assert!(
                unit.index() == Self::LOW_INDEX + offset,
                "units of a `Time` must be listed finest first, without gaps"
            );
            fields[unit.index()] = magnitude;
            offset += 1;
        }

        Self::from_fields(fields)
    }

    /// The finest unit tracked by this time.
    #[must_use]
    pub const fn low(&self) -> Unit {
        L::UNIT
    }

    /// The coarsest unit tracked by this time.
    #[must_use]
    pub const fn high(&self) -> Unit {
        H::UNIT
    }

    /// Returns the magnitude of unit `U`.
    ///
    /// Requesting a unit outside of `[L, H]` fails the build.
    #[must_use]
    pub const fn get<U: Granularity>(&self) -> i64 {
        const {
            assert!(
                contains::<L, H>(U::UNIT),
                "the requested unit is outside of the bounds of this `Time`"
            );
        };
        self.fields[U::UNIT.index()]
    }

    /// Sets the magnitude of unit `U` and normalizes the time.
    ///
    /// Requesting a unit outside of `[L, H]` fails the build.
    ///
    /// # Panics
    ///
    /// Panics if normalization overflows the coarsest unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use bounded_time::{Minutes, Seconds, Time};
    ///
    /// let mut time = Time::<Seconds, Minutes>::ZERO;
    /// time.set::<Seconds>(75);
    ///
    /// assert_eq!(time.get::<Seconds>(), 15);
    /// assert_eq!(time.get::<Minutes>(), 1);
    /// ```
    pub const fn set<U: Granularity>(&mut self, magnitude: i64) {
        const {
            assert!(
                contains::<L, H>(U::UNIT),
                "the requested unit is outside of the bounds of this `Time`"
            );
        };
        self.fields[U::UNIT.index()] = magnitude;
        self.normalize();
    }

    /// Returns the magnitude of `unit`, or `None` if the unit is outside of `[L, H]`.
    #[must_use]
    pub const fn get_unit(&self, unit: Unit) -> Option<i64> {
        if contains::<L, H>(unit) {
            Some(self.fields[unit.index()])
        } else {
            None
        }
    }

    /// Iterates over the tracked units and their magnitudes, finest first.
    ///
    /// ```
    /// use bounded_time::{Minutes, Seconds, Time, Unit};
    ///
    /// let time = Time::<Seconds, Minutes>::new(&[5, 10]);
    /// let entries: Vec<_> = time.entries().collect();
    ///
    /// assert_eq!(entries, [(Unit::Seconds, 5), (Unit::Minutes, 10)]);
    /// ```
    pub fn entries(&self) -> impl Iterator<Item = (Unit, i64)> + use<L, H> {
        let fields = self.fields;
        (Self::LOW_INDEX..=Self::HIGH_INDEX).map(move |index| (Unit::ALL[index], fields[index]))
    }

    /// Normalizes the time in place.
    ///
    /// # Panics
    ///
    /// Panics if carrying overflows the coarsest unit.
    pub const fn normalize(&mut self) {
        match normalize_range(self.fields, Self::LOW_INDEX, Self::HIGH_INDEX) {
            Some(fields) => self.fields = fields,
            None => panic!("overflow when normalizing time"),
        }
    }

    /// Returns the normalized form of this time.
    ///
    /// # Panics
    ///
    /// Panics if carrying overflows the coarsest unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use bounded_time::{Milliseconds, Seconds, Time};
    ///
    /// let time = Time::<Milliseconds, Seconds>::new(&[1500, 0]).normalized();
    ///
    /// assert_eq!(time.get::<Milliseconds>(), 500);
    /// assert_eq!(time.get::<Seconds>(), 1);
    /// ```
    #[must_use]
    pub const fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Returns the normalized form of this time, or `None` on overflow.
    #[must_use]
    pub const fn checked_normalized(self) -> Option<Self> {
        match normalize_range(self.fields, Self::LOW_INDEX, Self::HIGH_INDEX) {
            Some(fields) => Some(Self::from_fields(fields)),
            None => None,
        }
    }

    /// Converts this time into a time with other bounds.
    ///
    /// - Units covered by both bounds are copied.
    /// - If the new high unit is finer than the current one, everything at or above the
    ///   new high unit is folded into it, so coarse information is not lost.
    /// - Units finer than the new low unit are dropped; this is a lossy truncation.
    /// - Units finer than the current low unit start at zero.
    ///
    /// The result is normalized.
    ///
    /// # Panics
    ///
    /// Panics if folding overflows the new high unit. See [`Time::checked_convert`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bounded_time::{Hours, Milliseconds, Minutes, Seconds, Time};
    ///
    /// let time = Time::<Seconds, Hours>::new(&[5, 10, 3]);
    ///
    /// // narrowing folds the hours into minutes
    /// let narrow: Time<Seconds, Minutes> = time.convert();
    /// assert_eq!(narrow.get::<Minutes>(), 190);
    ///
    /// // widening leaves the new units at zero
    /// let wide: Time<Milliseconds, Hours> = time.convert();
    /// assert_eq!(wide.get::<Milliseconds>(), 0);
    /// assert_eq!(wide.get::<Hours>(), 3);
    /// ```
    #[must_use]
    pub const fn convert<L2: Granularity, H2: Granularity>(self) -> Time<L2, H2> {
        match self.checked_convert() {
            Some(time) => time,
            None => panic!("overflow when converting time"),
        }
    }

    /// Converts this time into a time with other bounds, or returns `None` on overflow.
    ///
    /// See [`Time::convert`] for the conversion rules.
    #[must_use]
    pub const fn checked_convert<L2: Granularity, H2: Granularity>(self) -> Option<Time<L2, H2>> {
        match convert_range(
            &self.fields,
            Self::LOW_INDEX,
            Self::HIGH_INDEX,
            Time::<L2, H2>::LOW_INDEX,
            Time::<L2, H2>::HIGH_INDEX,
        ) {
            Some(fields) => Some(Time::from_fields(fields)),
            None => None,
        }
    }

    /// Converts this time into a time with bounds that cover at least `[L, H]`.
    ///
    /// Widening never loses information. The result is normalized. Requesting narrower
    /// bounds fails the build:
    ///
    /// ```compile_fail
    /// use bounded_time::{Hours, Minutes, Seconds, Time};
    ///
    /// let time = Time::<Seconds, Hours>::ZERO;
    /// let narrow = time.widen::<Seconds, Minutes>();
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use bounded_time::{Hours, Minutes, Seconds, Time};
    ///
    /// let time = Time::<Seconds, Minutes>::new(&[5, 10]);
    /// let wide = time.widen::<Seconds, Hours>();
    ///
    /// assert_eq!(wide, Time::new(&[5, 10, 0]));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if normalizing a time that was not normalized overflows the coarsest unit.
    #[must_use]
    pub const fn widen<L2: Granularity, H2: Granularity>(self) -> Time<L2, H2> {
        const {
            assert!(
                L2::UNIT.index() <= L::UNIT.index() && H2::UNIT.index() >= H::UNIT.index(),
                "widening cannot narrow the bounds of a `Time`"
            );
        };

        let mut fields = [0; Unit::COUNT];
        let mut index = Self::LOW_INDEX;
        while index <= Self::HIGH_INDEX {
            fields[index] = self.fields[index];
            index += 1;
        }

        Time::<L2, H2>::from_fields(fields).normalized()
    }

    /// Adds two times with the same bounds, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match combine(&self.fields, &rhs.fields, Self::LOW_INDEX, Self::HIGH_INDEX, false) {
            Some(fields) => Some(Self::from_fields(fields)),
            None => None,
        }
    }

    /// Subtracts two times with the same bounds, returning `None` on overflow.
    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match combine(&self.fields, &rhs.fields, Self::LOW_INDEX, Self::HIGH_INDEX, true) {
            Some(fields) => Some(Self::from_fields(fields)),
            None => None,
        }
    }

    /// Negates the time, returning `None` on overflow.
    #[must_use]
    pub const fn checked_neg(self) -> Option<Self> {
        let mut fields = [0; Unit::COUNT];
        let mut index = Self::LOW_INDEX;
        while index <= Self::HIGH_INDEX {
            fields[index] = match self.fields[index].checked_neg() {
                Some(value) => value,
                None => return None,
            };
            index += 1;
        }

        Self::from_fields(fields).checked_normalized()
    }

    /// Returns the sum of all units converted into unit `U`.
    ///
    /// Each unit finer than `U` is truncated toward zero before it is added, so precision
    /// below `U` is discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use bounded_time::{Microseconds, Minutes, Seconds, Time};
    ///
    /// let time = Time::<Microseconds, Minutes>::new(&[10, 20, 0, 1]);
    ///
    /// assert_eq!(time.total::<Seconds>(), 60);
    /// assert_eq!(time.total::<Microseconds>(), 60_020_010);
    /// ```
    #[must_use]
    pub const fn total<U: Granularity>(&self) -> i128 {
        let target = U::UNIT.nanos() as i128;
        let mut total = 0;
        let mut index = Self::LOW_INDEX;
        while index <= Self::HIGH_INDEX {
            let unit = Unit::ALL[index].nanos() as i128;
            let value = self.fields[index] as i128;
            total += if unit >= target { value * (unit / target) } else { value / (target / unit) };
            index += 1;
        }
        total
    }

    /// Returns the exact value of the time in nanoseconds.
    #[must_use]
    pub const fn as_nanos(&self) -> i128 {
        let mut total = 0;
        let mut index = Self::LOW_INDEX;
        while index <= Self::HIGH_INDEX {
            total += self.fields[index] as i128 * Unit::ALL[index].nanos() as i128;
            index += 1;
        }
        total
    }

    /// Returns `true` if the time amounts to zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.as_nanos() == 0
    }

    /// Returns `true` if the time amounts to less than zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.as_nanos() < 0
    }
}

const fn contains<L: Granularity, H: Granularity>(unit: Unit) -> bool {
    L::UNIT.index() <= unit.index() && unit.index() <= H::UNIT.index()
}

/// Single finest-to-coarsest carry pass over `[low, high]`.
///
/// Euclidean division keeps every unit below `high` within `[0, ratio)`, whatever its sign.
const fn normalize_range(mut fields: Fields, low: usize, high: usize) -> Option<Fields> {
    let mut index = low;
    while index < high {
        let ratio = Unit::carry_ratio(index);
        let carry = fields[index].div_euclid(ratio);
        fields[index] = fields[index].rem_euclid(ratio);
        fields[index + 1] = match fields[index + 1].checked_add(carry) {
            Some(value) => value,
            None => return None,
        };
        index += 1;
    }
    Some(fields)
}

/// Applies `rhs` to `lhs` unit by unit, carrying (or borrowing) in the same pass.
const fn combine(lhs: &Fields, rhs: &Fields, low: usize, high: usize, subtract: bool) -> Option<Fields> {
    let mut fields = *lhs;
    let mut index = low;
    loop {
        let applied = if subtract {
            fields[index].checked_sub(rhs[index])
        } else {
            fields[index].checked_add(rhs[index])
        };
        fields[index] = match applied {
            Some(value) => value,
            None => return None,
        };

        if index == high {
            return Some(fields);
        }

        let ratio = Unit::carry_ratio(index);
        let carry = fields[index].div_euclid(ratio);
        fields[index] = fields[index].rem_euclid(ratio);
        fields[index + 1] = match fields[index + 1].checked_add(carry) {
            Some(value) => value,
            None => return None,
        };
        index += 1;
    }
}

const fn convert_range(src: &Fields, src_low: usize, src_high: usize, dst_low: usize, dst_high: usize) -> Option<Fields> {
    let mut fields = [0; Unit::COUNT];

    // units present on both sides
    let mut index = if src_low > dst_low { src_low } else { dst_low };
    let shared_high = if src_high < dst_high { src_high } else { dst_high };
    while index <= shared_high {
        fields[index] = src[index];
        index += 1;
    }

    // fold everything at or above the new high unit into it
    if dst_high < src_high {
        let floor = if src_low > dst_high { src_low } else { dst_high };
        let mut folded = src[src_high];
        let mut index = src_high;
        while index > dst_high {
            index -= 1;
            folded = match folded.checked_mul(Unit::carry_ratio(index)) {
                Some(value) => value,
                None => return None,
            };
            if index >= floor {
                folded = match folded.checked_add(src[index]) {
                    Some(value) => value,
                    None => return None,
                };
            }
        }
        fields[dst_high] = folded;
    }

    normalize_range(fields, dst_low, dst_high)
}

impl<L: Granularity, H: Granularity> Default for Time<L, H> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<L: Granularity, H: Granularity> PartialEq for Time<L, H> {
    fn eq(&self, other: &Self) -> bool {
        self.as_nanos() == other.as_nanos()
    }
}

impl<L: Granularity, H: Granularity> Eq for Time<L, H> {}

impl<L: Granularity, H: Granularity> PartialOrd for Time<L, H> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<L: Granularity, H: Granularity> Ord for Time<L, H> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_nanos().cmp(&other.as_nanos())
    }
}

impl<L: Granularity, H: Granularity> Hash for Time<L, H> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.as_nanos().hash(state);
    }
}

impl<L1, H1, L2, H2> Add<Time<L2, H2>> for Time<L1, H1>
where
    L1: Ordered<L2>,
    H1: Ordered<H2>,
    L2: Granularity,
    H2: Granularity,
{
    type Output = Time<<L1 as Ordered<L2>>::Finer, <H1 as Ordered<H2>>::Coarser>;

    fn add(self, rhs: Time<L2, H2>) -> Self::Output {
        let lhs: Self::Output = self.convert();
        lhs.checked_add(rhs.convert()).expect("overflow when adding times")
    }
}

impl<L1, H1, L2, H2> Sub<Time<L2, H2>> for Time<L1, H1>
where
    L1: Ordered<L2>,
    H1: Ordered<H2>,
    L2: Granularity,
    H2: Granularity,
{
    type Output = Time<<L1 as Ordered<L2>>::Finer, <H1 as Ordered<H2>>::Coarser>;

    fn sub(self, rhs: Time<L2, H2>) -> Self::Output {
        let lhs: Self::Output = self.convert();
        lhs.checked_sub(rhs.convert()).expect("overflow when subtracting times")
    }
}

impl<L: Granularity, H: Granularity> AddAssign for Time<L, H> {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.checked_add(rhs).expect("overflow when adding times");
    }
}

impl<L: Granularity, H: Granularity> SubAssign for Time<L, H> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.checked_sub(rhs).expect("overflow when subtracting times");
    }
}

impl<L: Granularity, H: Granularity> Neg for Time<L, H> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.checked_neg().expect("overflow when negating time")
    }
}

impl<L: Granularity, H: Granularity> Sum for Time<L, H> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, time| acc.checked_add(time).expect("overflow when adding times"))
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::fmt::{Debug, Display};

    use rstest::rstest;

    use super::*;
    use crate::time;
    use crate::unit::{Microseconds, Milliseconds, Minutes, Nanoseconds};

    static_assertions::assert_impl_all!(Time<Seconds, Hours>: Debug, Display, Clone, Copy, Send, Sync, Default, Ord, Hash);
    static_assertions::assert_type_eq_all!(
        <Time<Microseconds, Minutes> as Add<Time<Seconds, Hours>>>::Output,
        Time<Microseconds, Hours>
    );
    static_assertions::assert_type_eq_all!(<Time<Seconds> as Sub<Time<Minutes>>>::Output, Time<Seconds, Minutes>);

    fn fields<L: Granularity, H: Granularity>(time: Time<L, H>) -> Vec<i64> {
        time.entries().map(|(_, magnitude)| magnitude).collect()
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = std::hash::DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn new_stores_verbatim() {
        let time = Time::<Milliseconds, Seconds>::new(&[1500, 0]);

        assert_eq!(fields(time), [1500, 0]);
        assert_eq!(Time::<Milliseconds, Seconds>::LEN, 2);
    }

    #[test]
    #[should_panic(expected = "exactly one magnitude per unit")]
    fn new_rejects_wrong_count() {
        let _ = Time::<Seconds, Hours>::new(&[20, 14]);
    }

    #[test]
    #[should_panic(expected = "finest first, without gaps")]
    fn from_units_rejects_gaps() {
        let _ = Time::<Seconds, Minutes>::from_units(&[(Unit::Seconds, 1), (Unit::Hours, 2)]);
    }

    #[test]
    fn zero_and_default() {
        let time = Time::<Nanoseconds, Hours>::default();

        assert!(time.is_zero());
        assert_eq!(time, Time::ZERO);
        assert_eq!(fields(time), [0; 6]);
        assert_eq!(fields(time![]), [0]);
    }

    #[test]
    fn single_unit_time() {
        let mut time = Time::<Minutes>::new(&[90]);
        time.normalize();

        assert_eq!(time.get::<Minutes>(), 90);
        assert_eq!((time + time).get::<Minutes>(), 180);
    }

    #[test]
    fn bounds_accessors() {
        let time = Time::<Microseconds, Minutes>::ZERO;

        assert_eq!(time.low(), Unit::Microseconds);
        assert_eq!(time.high(), Unit::Minutes);
        assert_eq!(time.get_unit(Unit::Seconds), Some(0));
        assert_eq!(time.get_unit(Unit::Hours), None);
        assert_eq!(time.get_unit(Unit::Nanoseconds), None);
    }

    #[rstest]
    #[case::under_ratio(999, [999, 0])]
    #[case::exact_ratio(1000, [0, 1])]
    #[case::with_surplus(1500, [500, 1])]
    #[case::many_carries(12_345, [345, 12])]
    #[case::negative(-1, [999, -1])]
    #[case::negative_exact(-2000, [0, -2])]
    fn normalize_carries_into_next_unit(#[case] millis: i64, #[case] expected: [i64; 2]) {
        let time = Time::<Milliseconds, Seconds>::new(&[millis, 0]).normalized();

        assert_eq!(fields(time), expected);
    }

    #[test]
    fn normalize_carries_transitively() {
        let time = Time::<Milliseconds, Hours>::new(&[3_723_500, 0, 0, 0]).normalized();

        assert_eq!(fields(time), [500, 3, 2, 1]);
        assert_eq!(time.total::<Milliseconds>(), 3_723_500);
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = Time::<Nanoseconds, Hours>::new(&[1_234_567, 8_901, 2_345, 678, 90, -3]).normalized();
        let twice = once.normalized();

        assert_eq!(fields(once), fields(twice));
    }

    #[test]
    fn normalize_overflow() {
        let time = Time::<Minutes, Hours>::new(&[120, i64::MAX]);

        assert!(time.checked_normalized().is_none());
    }

    #[test]
    #[should_panic(expected = "overflow when normalizing time")]
    fn set_overflow_panics() {
        let mut time = Time::<Minutes, Hours>::new(&[0, i64::MAX]);
        time.set::<Minutes>(60);
    }

    #[test]
    fn set_normalizes() {
        let mut time = Time::<Seconds, Hours>::ZERO;
        time.set::<Seconds>(3_725);

        assert_eq!(fields(time), [5, 2, 1]);

        time.set::<Hours>(-1);
        assert_eq!(fields(time), [5, 2, -1]);
    }

    #[test]
    fn widen_keeps_everything() {
        let time = Time::<Seconds, Minutes>::new(&[5, 10]);
        let wide: Time<Seconds, Hours> = time.widen();

        assert_eq!(fields(wide), [5, 10, 0]);
        assert_eq!(fields(time.widen::<Nanoseconds, Hours>()), [0, 0, 0, 5, 10, 0]);
    }

    #[test]
    fn widen_normalizes() {
        let time = Time::<Seconds, Minutes>::new(&[5, 130]);

        assert_eq!(fields(time.widen::<Seconds, Hours>()), [5, 10, 2]);
    }

    #[test]
    #[should_panic(expected = "overflow when normalizing time")]
    fn widen_overflow() {
        let _ = Time::<Seconds, Minutes>::new(&[60, i64::MAX]).widen::<Seconds, Minutes>();
    }

    #[test]
    fn convert_folds_higher_units() {
        let time = Time::<Seconds, Hours>::new(&[5, 10, 3]);

        assert_eq!(fields(time.convert::<Seconds, Minutes>()), [5, 190]);
        assert_eq!(fields(time.convert::<Seconds, Seconds>()), [11_405]);
        assert_eq!(fields(time.convert::<Minutes, Hours>()), [10, 3]);
    }

    #[test]
    fn convert_drops_lower_units() {
        let time = Time::<Microseconds, Minutes>::new(&[5, 9, 2, 1]);
        let narrow: Time<Milliseconds, Seconds> = time.convert();

        assert_eq!(fields(narrow), [9, 62]);
    }

    #[test]
    fn convert_from_coarser_only_source() {
        let time = Time::<Minutes, Hours>::new(&[10, 3]);
        let narrow: Time<Nanoseconds, Seconds> = time.convert();

        assert_eq!(fields(narrow), [0, 0, 0, 11_400]);
    }

    #[test]
    fn convert_to_disjoint_coarser_bounds_drops_everything() {
        let time = Time::<Seconds, Minutes>::new(&[30, 90]);
        let coarse: Time<Hours> = time.convert();

        assert!(coarse.is_zero());
    }

    #[test]
    fn convert_shifted_window_carries() {
        let time = Time::<Seconds, Minutes>::new(&[0, 90]);
        let shifted: Time<Minutes, Hours> = time.convert();

        assert_eq!(fields(shifted), [30, 1]);
    }

    #[test]
    fn convert_overflow() {
        let time = Time::<Seconds, Hours>::new(&[0, 0, i64::MAX]);

        assert!(time.checked_convert::<Nanoseconds, Seconds>().is_none());
    }

    #[test]
    fn widen_and_back_round_trips() {
        let original = Time::<Milliseconds, Minutes>::new(&[250, 42, 7]);
        let back: Time<Milliseconds, Minutes> = original.widen::<Nanoseconds, Hours>().convert();

        assert_eq!(fields(back), fields(original));
    }

    #[test]
    fn add_same_bounds_carries() {
        let a = Time::<Seconds, Hours>::new(&[45, 59, 1]);
        let b = Time::<Seconds, Hours>::new(&[30, 0, 0]);

        assert_eq!(fields(a + b), [15, 0, 2]);
    }

    #[test]
    fn add_mixed_bounds_scenario() {
        let a = Time::<Microseconds, Minutes>::new(&[10, 20, 0, 1]);
        let b = Time::<Microseconds, Hours>::new(&[990, 980, 20, 10, 2]);

        let sum = a + b;

        assert_eq!(fields(sum), [0, 1, 21, 11, 2]);
        assert_eq!(sum.total::<Microseconds>(), a.total::<Microseconds>() + b.total::<Microseconds>());
        assert_eq!(sum.total::<Microseconds>(), 7_881_001_000);
    }

    #[test]
    fn add_disjoint_bounds() {
        let a = Time::<Milliseconds>::new(&[1_500]);
        let b = Time::<Minutes>::new(&[2]);

        let sum: Time<Milliseconds, Minutes> = a + b;

        assert_eq!(fields(sum), [500, 1, 2]);
    }

    #[test]
    fn add_is_commutative() {
        let a = Time::<Microseconds, Minutes>::new(&[10, 20, 0, 1]);
        let b = Time::<Seconds, Hours>::new(&[20, 10, 14]);

        assert_eq!(fields(a + b), fields(b + a));
    }

    #[test]
    fn add_is_associative() {
        let a = Time::<Microseconds, Minutes>::new(&[10, 20, 0, 1]);
        let b = Time::<Microseconds, Hours>::new(&[990, 980, 20, 10, 2]);
        let c = Time::<Seconds, Hours>::new(&[20, 10, 14]);

        assert_eq!(((a + b) + c).as_nanos(), (a + (b + c)).as_nanos());
    }

    #[test]
    fn add_assign_and_sum() {
        let mut time = Time::<Seconds, Minutes>::new(&[40, 0]);
        time += Time::new(&[40, 0]);

        assert_eq!(fields(time), [20, 1]);

        let total: Time<Seconds, Minutes> = std::iter::repeat_n(Time::new(&[30, 0]), 5).sum();
        assert_eq!(fields(total), [30, 2]);
    }

    #[test]
    fn add_overflow() {
        let max = Time::<Minutes, Hours>::new(&[0, i64::MAX]);
        let hour = Time::<Minutes, Hours>::new(&[60, 0]);

        assert!(max.checked_add(hour).is_none());
    }

    #[test]
    #[should_panic(expected = "overflow when adding times")]
    fn add_overflow_panics() {
        let max = Time::<Hours>::new(&[i64::MAX]);
        let _ = max + Time::<Hours>::new(&[1]);
    }

    #[test]
    fn sub_borrows_from_next_unit() {
        let a = Time::<Seconds, Hours>::new(&[5, 0, 2]);
        let b = Time::<Seconds, Hours>::new(&[10, 0, 0]);

        assert_eq!(fields(a - b), [55, 59, 1]);
    }

    #[test]
    fn sub_below_zero_is_carried_by_coarsest_unit() {
        let a = Time::<Seconds, Minutes>::new(&[5, 0]);
        let b = Time::<Seconds, Minutes>::new(&[10, 0]);

        let diff = a - b;

        assert_eq!(fields(diff), [55, -1]);
        assert!(diff.is_negative());
        assert_eq!(diff.total::<Seconds>(), -5);
    }

    #[test]
    fn sub_mixed_bounds() {
        let target = Time::<Minutes, Hours>::new(&[30, 14]);
        let now = Time::<Seconds, Hours>::new(&[20, 10, 14]);

        let remaining: Time<Seconds, Hours> = target - now;

        assert_eq!(fields(remaining), [40, 19, 0]);
    }

    #[test]
    fn sub_inverts_add() {
        let a = Time::<Microseconds, Hours>::new(&[10, 20, 0, 1, 0]);
        let b = Time::<Microseconds, Hours>::new(&[990, 980, 20, 10, 2]);

        assert_eq!(fields((a + b) - b), fields(a));
        assert_eq!(a - a, Time::ZERO);
    }

    #[test]
    fn sub_assign() {
        let mut time = Time::<Seconds, Minutes>::new(&[0, 1]);
        time -= Time::new(&[1, 0]);

        assert_eq!(fields(time), [59, 0]);
    }

    #[test]
    fn neg() {
        let time = Time::<Seconds, Minutes>::new(&[5, 1]);

        assert_eq!(fields(-time), [55, -2]);
        assert_eq!(fields(-(-time)), [5, 1]);
        assert!(Time::<Hours>::new(&[i64::MIN]).checked_neg().is_none());
    }

    #[test]
    fn total_truncates_per_unit() {
        let time = Time::<Microseconds, Minutes>::new(&[10, 20, 0, 1]);

        assert_eq!(time.total::<Seconds>(), 60);
        assert_eq!(time.total::<Milliseconds>(), 60_020);
        assert_eq!(time.total::<Hours>(), 0);
        assert_eq!(time.as_nanos(), 60_020_010_000);
    }

    #[test]
    fn equality_and_ordering_use_total() {
        let unnormalized = Time::<Seconds, Minutes>::new(&[60, 0]);
        let normalized = Time::<Seconds, Minutes>::new(&[0, 1]);

        assert_eq!(unnormalized, normalized);
        assert_eq!(hash_of(&unnormalized), hash_of(&normalized));
        assert_ne!(fields(unnormalized), fields(normalized));
        assert_ne!(Time::<Seconds, Minutes>::new(&[1, 1]), normalized);
        assert!(Time::<Seconds, Minutes>::new(&[59, 0]) < normalized);
        assert!(Time::<Seconds, Minutes>::new(&[0, -1]) < Time::ZERO);
    }

    #[test]
    fn entries_are_finest_first() {
        let time = Time::<Milliseconds, Minutes>::new(&[1, 2, 3]);
        let entries: Vec<_> = time.entries().collect();

        assert_eq!(entries, [(Unit::Milliseconds, 1), (Unit::Seconds, 2), (Unit::Minutes, 3)]);
    }

    #[test]
    fn const_evaluation() {
        const A: Time<Seconds, Minutes> = Time::new(&[50, 1]);
        const B: Time<Seconds, Minutes> = Time::new(&[20, 0]);
        const SUM: Option<Time<Seconds, Minutes>> = A.checked_add(B);
        const WIDE: Time<Seconds, Hours> = A.widen();

        assert_eq!(SUM.map(fields), Some(vec![10, 2]));
        assert_eq!(fields(WIDE), [50, 1, 0]);
    }
}
