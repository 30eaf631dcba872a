//! Calendar-agnostic time values.

use std::fmt;

use crate::error::CalendarError;
use crate::rational::RationalDuration;

/// Whole seconds since the internal epoch plus an exact fraction of a second.
///
/// The fraction is always normalized into `[0, 1)`; negative times carry
/// their sign in the whole seconds, so half a second before the epoch is
/// `seconds() == -1` with fraction `1/2`. The same type doubles as a
/// duration (time of day, step interval).
///
/// Ordering compares whole seconds first and then the fractions by
/// cross-multiplication, so `5 1/3 s == 5 2/6 s`.
///
/// # Example
///
/// ```
/// use horae_calendar::BaseTime;
///
/// let half = BaseTime::from_seconds(0, 1, 2).unwrap();
/// let one = BaseTime::from_whole_seconds(1);
/// assert!(half < one);
/// assert_eq!(half.checked_add(half).unwrap(), one);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BaseTime(RationalDuration);

impl BaseTime {
    /// The epoch.
    pub const ZERO: Self = Self(RationalDuration::ZERO);

    /// Creates a time from whole seconds and a fractional second.
    ///
    /// The fraction may be improper or negative; it is carried into the
    /// whole seconds.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRational`] if `fraction_denominator <= 0`,
    /// or [`CalendarError::ArithmeticOverflow`] if the carry leaves the `i64`
    /// range.
    pub fn from_seconds(
        whole: i64,
        fraction_numerator: i64,
        fraction_denominator: i64,
    ) -> Result<Self, CalendarError> {
        RationalDuration::new(whole, fraction_numerator, fraction_denominator).map(Self)
    }

    /// Creates a time with no fractional second.
    pub const fn from_whole_seconds(seconds: i64) -> Self {
        Self(RationalDuration::from_integer(seconds))
    }

    /// Wraps an exact quantity of seconds.
    pub fn from_rational(seconds: RationalDuration) -> Self {
        Self(seconds)
    }

    /// Returns the whole seconds (the floor of the time).
    pub fn seconds(self) -> i64 {
        self.0.whole()
    }

    /// Returns the numerator of the fractional second.
    pub fn fraction_numerator(self) -> i64 {
        self.0.numerator()
    }

    /// Returns the denominator of the fractional second.
    pub fn fraction_denominator(self) -> i64 {
        self.0.denominator()
    }

    /// Returns the fractional second as a value in `[0, 1)`.
    pub fn fraction(self) -> RationalDuration {
        self.0.fraction()
    }

    /// Returns the time as an exact number of seconds.
    pub fn as_rational(self) -> RationalDuration {
        self.0
    }

    /// Exact sum.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ArithmeticOverflow`] if the whole seconds
    /// leave the `i64` range.
    pub fn checked_add(self, other: Self) -> Result<Self, CalendarError> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Exact difference `self - other`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ArithmeticOverflow`] if the whole seconds
    /// leave the `i64` range.
    pub fn checked_sub(self, other: Self) -> Result<Self, CalendarError> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Exact product with an integer factor.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ArithmeticOverflow`] if the whole seconds
    /// leave the `i64` range.
    pub fn multiply(self, factor: i64) -> Result<Self, CalendarError> {
        self.0.multiply(factor).map(Self)
    }

    /// Splits into whole `unit`s (floored) and the remainder in `[0, unit)`.
    ///
    /// Used to split a time into days and time of day.
    pub(crate) fn div_rem_seconds(self, unit: i64) -> (i64, Self) {
        debug_assert!(unit > 0);
        let quotient = self.0.whole().div_euclid(unit);
        let remainder = self.0.whole().rem_euclid(unit);
        (quotient, Self(self.0.with_whole(remainder)))
    }
}

impl From<RationalDuration> for BaseTime {
    fn from(seconds: RationalDuration) -> Self {
        Self(seconds)
    }
}

impl fmt::Display for BaseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_seconds_normalizes() {
        let t = BaseTime::from_seconds(10, 5, 2).unwrap();
        assert_eq!(t.seconds(), 12);
        assert_eq!(t.fraction_numerator(), 1);
        assert_eq!(t.fraction_denominator(), 2);
    }

    #[test]
    fn negative_fraction_borrows() {
        let t = BaseTime::from_seconds(0, -1, 2).unwrap();
        assert_eq!(t.seconds(), -1);
        assert_eq!(t.fraction_numerator(), 1);
        assert_eq!(t.fraction_denominator(), 2);
    }

    #[test]
    fn ordering_whole_then_fraction() {
        let a = BaseTime::from_seconds(0, 1, 2).unwrap();
        let b = BaseTime::from_seconds(1, 0, 1).unwrap();
        assert!(a < b);
        assert!(BaseTime::from_seconds(3, 1, 3).unwrap() < BaseTime::from_seconds(3, 1, 2).unwrap());
    }

    #[test]
    fn equality_ignores_unreduced_fraction() {
        assert_eq!(
            BaseTime::from_seconds(5, 1, 3).unwrap(),
            BaseTime::from_seconds(5, 2, 6).unwrap()
        );
    }

    #[test]
    fn add_and_sub_are_exact() {
        let third = BaseTime::from_seconds(0, 1, 3).unwrap();
        let mut t = BaseTime::ZERO;
        for _ in 0..3 {
            t = t.checked_add(third).unwrap();
        }
        assert_eq!(t, BaseTime::from_whole_seconds(1));
        assert_eq!(t.checked_sub(third).unwrap(), BaseTime::from_seconds(0, 2, 3).unwrap());
    }

    #[test]
    fn add_overflow() {
        let a = BaseTime::from_whole_seconds(i64::MAX);
        let b = BaseTime::from_whole_seconds(1);
        assert!(matches!(
            a.checked_add(b),
            Err(CalendarError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn fraction_overflow_into_max() {
        let a = BaseTime::from_seconds(i64::MAX, 1, 2).unwrap();
        let b = BaseTime::from_seconds(0, 1, 2).unwrap();
        assert!(a.checked_add(b).is_err());
    }

    #[test]
    fn sub_overflow() {
        let a = BaseTime::from_whole_seconds(i64::MIN);
        assert!(a.checked_sub(BaseTime::from_whole_seconds(1)).is_err());
    }

    #[test]
    fn div_rem_negative() {
        let t = BaseTime::from_seconds(-1, 1, 4).unwrap();
        let (days, rest) = t.div_rem_seconds(86_400);
        assert_eq!(days, -1);
        assert_eq!(rest, BaseTime::from_seconds(86_399, 1, 4).unwrap());
    }

    #[test]
    fn display() {
        assert_eq!(BaseTime::from_whole_seconds(12345).to_string(), "12345s");
        assert_eq!(BaseTime::from_seconds(5, 1, 3).unwrap().to_string(), "5 1/3s");
    }

    #[test]
    fn copy_and_hash() {
        fn assert_impl<T: Copy + std::hash::Hash + Send + Sync>() {}
        assert_impl::<BaseTime>();
    }
}
