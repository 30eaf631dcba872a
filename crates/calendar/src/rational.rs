//! Exact rational durations.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use num_integer::Integer;

use crate::error::CalendarError;

/// An exact quantity `whole + numerator/denominator` (days or seconds).
///
/// Values are always normalized: `denominator > 0`,
/// `0 <= numerator < denominator`, and the fraction is in lowest terms
/// (`0/1` when there is no fractional part). Negative quantities carry their
/// sign in `whole`, so `-0.25` is stored as `-1 + 3/4`.
///
/// Arithmetic is carried out in `i128` intermediates and checked on the way
/// back to `i64`; nothing is ever rounded or saturated.
///
/// # Example
///
/// ```
/// use horae_calendar::RationalDuration;
///
/// let gregorian_year = RationalDuration::new(365, 97, 400).unwrap();
/// let seconds = gregorian_year.multiply(86_400).unwrap();
/// assert_eq!(seconds, RationalDuration::from_integer(31_556_952));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RationalDuration {
    whole: i64,
    numerator: i64,
    denominator: i64,
}

impl RationalDuration {
    /// Zero.
    pub const ZERO: Self = Self::from_integer(0);

    /// Creates a normalized `whole + numerator/denominator`.
    ///
    /// The numerator may lie outside `[0, denominator)`; the excess is
    /// carried into the whole part.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRational`] if `denominator <= 0`, or
    /// [`CalendarError::ArithmeticOverflow`] if the carried whole part does
    /// not fit in an `i64`.
    pub fn new(whole: i64, numerator: i64, denominator: i64) -> Result<Self, CalendarError> {
        if denominator <= 0 {
            return Err(CalendarError::InvalidRational {
                numerator,
                denominator,
            });
        }
        Self::normalize(
            whole.into(),
            numerator.into(),
            denominator.into(),
            "rational normalization",
        )
    }

    /// Creates a value with no fractional part.
    pub const fn from_integer(whole: i64) -> Self {
        Self {
            whole,
            numerator: 0,
            denominator: 1,
        }
    }

    /// Builds a value from parts that are already normalized and reduced.
    pub(crate) const fn from_reduced(whole: i64, numerator: i64, denominator: i64) -> Self {
        Self {
            whole,
            numerator,
            denominator,
        }
    }

    /// Carries `numerator` into `whole`, reduces the fraction and narrows
    /// back to `i64`.
    ///
    /// `denominator` must be positive; every caller passes either a checked
    /// user denominator or a product of two normalized denominators.
    pub(crate) fn normalize(
        whole: i128,
        numerator: i128,
        denominator: i128,
        operation: &'static str,
    ) -> Result<Self, CalendarError> {
        debug_assert!(denominator > 0);
        let (carry, rem) = numerator.div_mod_floor(&denominator);
        let whole = whole
            .checked_add(carry)
            .ok_or(CalendarError::overflow(operation))?;
        let (numerator, denominator) = if rem == 0 {
            (0, 1)
        } else {
            let g = rem.gcd(&denominator);
            (rem / g, denominator / g)
        };
        let narrow = |v: i128| i64::try_from(v).map_err(|_| CalendarError::overflow(operation));
        Ok(Self {
            whole: narrow(whole)?,
            numerator: narrow(numerator)?,
            denominator: narrow(denominator)?,
        })
    }

    /// Returns the whole part (the floor of the value).
    pub fn whole(&self) -> i64 {
        self.whole
    }

    /// Returns the numerator of the fractional part.
    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Returns the denominator of the fractional part.
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Returns the fractional part alone, in `[0, 1)`.
    pub fn fraction(self) -> Self {
        Self {
            whole: 0,
            ..self
        }
    }

    /// Replaces the whole part, keeping the (already normalized) fraction.
    pub(crate) fn with_whole(self, whole: i64) -> Self {
        Self { whole, ..self }
    }

    /// Returns `true` if the value has no fractional part.
    pub fn is_integer(&self) -> bool {
        self.numerator == 0
    }

    /// Returns `true` if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.whole == 0 && self.numerator == 0
    }

    /// Returns `true` if the value is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.whole > 0 || (self.whole == 0 && self.numerator > 0)
    }

    /// Exact sum.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ArithmeticOverflow`] if the result does not
    /// fit in the `i64` representation.
    pub fn checked_add(self, other: Self) -> Result<Self, CalendarError> {
        let whole = i128::from(self.whole) + i128::from(other.whole);
        let numerator = i128::from(self.numerator) * i128::from(other.denominator)
            + i128::from(other.numerator) * i128::from(self.denominator);
        let denominator = i128::from(self.denominator) * i128::from(other.denominator);
        Self::normalize(whole, numerator, denominator, "rational addition")
    }

    /// Exact difference `self - other`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ArithmeticOverflow`] if the result does not
    /// fit in the `i64` representation.
    pub fn checked_sub(self, other: Self) -> Result<Self, CalendarError> {
        let whole = i128::from(self.whole) - i128::from(other.whole);
        let numerator = i128::from(self.numerator) * i128::from(other.denominator)
            - i128::from(other.numerator) * i128::from(self.denominator);
        let denominator = i128::from(self.denominator) * i128::from(other.denominator);
        Self::normalize(whole, numerator, denominator, "rational subtraction")
    }

    /// Exact product with an integer factor.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ArithmeticOverflow`] if the result does not
    /// fit in the `i64` representation.
    pub fn multiply(self, factor: i64) -> Result<Self, CalendarError> {
        let factor = i128::from(factor);
        Self::normalize(
            i128::from(self.whole) * factor,
            i128::from(self.numerator) * factor,
            i128::from(self.denominator),
            "rational multiplication",
        )
    }

    /// Floored division by a positive duration: `(q, r)` with
    /// `self = q * divisor + r` and `0 <= r < divisor`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ArithmeticOverflow`] if an intermediate or
    /// the quotient does not fit.
    pub(crate) fn div_rem_floor(self, divisor: Self) -> Result<(i64, Self), CalendarError> {
        debug_assert!(divisor.is_positive());
        let overflow = || CalendarError::overflow("rational division");
        let improper = |r: Self| {
            i128::from(r.whole)
                .checked_mul(i128::from(r.denominator))
                .and_then(|w| w.checked_add(i128::from(r.numerator)))
                .ok_or_else(overflow)
        };
        // self = a/b, divisor = c/d; a/b = q * c/d + r/(b*d)
        let a = improper(self)?;
        let c = improper(divisor)?;
        let b = i128::from(self.denominator);
        let d = i128::from(divisor.denominator);
        let lhs = a.checked_mul(d).ok_or_else(overflow)?;
        let rhs = c.checked_mul(b).ok_or_else(overflow)?;
        let (quotient, rem) = lhs.div_mod_floor(&rhs);
        let quotient = i64::try_from(quotient).map_err(|_| overflow())?;
        let denominator = b.checked_mul(d).ok_or_else(overflow)?;
        let remainder = Self::normalize(0, rem, denominator, "rational division")?;
        Ok((quotient, remainder))
    }
}

impl Default for RationalDuration {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for RationalDuration {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RationalDuration {}

impl PartialOrd for RationalDuration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RationalDuration {
    /// Compares whole parts, then fractions by cross-multiplication.
    ///
    /// Both fractions lie in `[0, 1)` with denominators below `2^63`, so the
    /// `i128` products cannot overflow.
    fn cmp(&self, other: &Self) -> Ordering {
        self.whole.cmp(&other.whole).then_with(|| {
            let lhs = i128::from(self.numerator) * i128::from(other.denominator);
            let rhs = i128::from(other.numerator) * i128::from(self.denominator);
            lhs.cmp(&rhs)
        })
    }
}

impl Hash for RationalDuration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Normalized values are canonical, so field hashing agrees with `Eq`.
        self.whole.hash(state);
        self.numerator.hash(state);
        self.denominator.hash(state);
    }
}

impl fmt::Display for RationalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numerator == 0 {
            write!(f, "{}", self.whole)
        } else {
            write!(f, "{} {}/{}", self.whole, self.numerator, self.denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_improper_fraction() {
        let r = RationalDuration::new(1, 7, 4).unwrap();
        assert_eq!(r.whole(), 2);
        assert_eq!(r.numerator(), 3);
        assert_eq!(r.denominator(), 4);
    }

    #[test]
    fn new_normalizes_negative_numerator() {
        // 0 + (-1/4) = -1 + 3/4
        let r = RationalDuration::new(0, -1, 4).unwrap();
        assert_eq!(r.whole(), -1);
        assert_eq!(r.numerator(), 3);
        assert_eq!(r.denominator(), 4);
    }

    #[test]
    fn new_reduces_fraction() {
        let r = RationalDuration::new(5, 2, 6).unwrap();
        assert_eq!((r.numerator(), r.denominator()), (1, 3));
        let z = RationalDuration::new(5, 4, 4).unwrap();
        assert_eq!((z.whole(), z.numerator(), z.denominator()), (6, 0, 1));
    }

    #[test]
    fn new_rejects_zero_denominator() {
        assert_eq!(
            RationalDuration::new(1, 1, 0).unwrap_err(),
            CalendarError::InvalidRational {
                numerator: 1,
                denominator: 0,
            }
        );
    }

    #[test]
    fn new_rejects_negative_denominator() {
        assert!(matches!(
            RationalDuration::new(1, 1, -3),
            Err(CalendarError::InvalidRational { .. })
        ));
    }

    #[test]
    fn new_overflowing_carry() {
        assert_eq!(
            RationalDuration::new(i64::MAX, 1, 1).unwrap_err(),
            CalendarError::overflow("rational normalization")
        );
    }

    #[test]
    fn add_carries_fraction() {
        let a = RationalDuration::new(1, 2, 3).unwrap();
        let b = RationalDuration::new(2, 1, 2).unwrap();
        // 1 2/3 + 2 1/2 = 4 1/6
        assert_eq!(a.checked_add(b).unwrap(), RationalDuration::new(4, 1, 6).unwrap());
    }

    #[test]
    fn sub_borrows_fraction() {
        let a = RationalDuration::new(1, 1, 4).unwrap();
        let b = RationalDuration::new(0, 1, 2).unwrap();
        assert_eq!(a.checked_sub(b).unwrap(), RationalDuration::new(0, 3, 4).unwrap());
    }

    #[test]
    fn add_overflow() {
        let a = RationalDuration::from_integer(i64::MAX);
        let b = RationalDuration::from_integer(1);
        assert!(matches!(
            a.checked_add(b),
            Err(CalendarError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn add_denominator_overflow() {
        // Two large coprime denominators: the reduced product exceeds i64.
        let a = RationalDuration::new(0, 1, i64::MAX).unwrap();
        let b = RationalDuration::new(0, 1, i64::MAX - 1).unwrap();
        assert!(matches!(
            a.checked_add(b),
            Err(CalendarError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn multiply_gregorian_year() {
        let year = RationalDuration::new(365, 97, 400).unwrap();
        assert_eq!(
            year.multiply(86_400).unwrap(),
            RationalDuration::from_integer(31_556_952)
        );
    }

    #[test]
    fn div_rem_floor_fractional_divisor() {
        let year = RationalDuration::new(100, 1, 2).unwrap();
        let t = RationalDuration::from_integer(201);
        assert_eq!(t.div_rem_floor(year).unwrap(), (2, RationalDuration::ZERO));
        let t = RationalDuration::from_integer(250);
        assert_eq!(
            t.div_rem_floor(year).unwrap(),
            (2, RationalDuration::from_integer(49))
        );
    }

    #[test]
    fn div_rem_floor_negative_dividend() {
        let year = RationalDuration::new(100, 1, 2).unwrap();
        let t = RationalDuration::new(-1, 1, 3).unwrap();
        // -2/3 = -1 * 100.5 + 99 5/6
        assert_eq!(
            t.div_rem_floor(year).unwrap(),
            (-1, RationalDuration::new(99, 5, 6).unwrap())
        );
    }

    #[test]
    fn div_rem_floor_overflow() {
        let tiny = RationalDuration::new(0, 1, i64::MAX).unwrap();
        assert!(matches!(
            RationalDuration::from_integer(i64::MAX).div_rem_floor(tiny),
            Err(CalendarError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn compare_cross_multiplies() {
        let a = RationalDuration::new(5, 1, 3).unwrap();
        let b = RationalDuration::new(5, 2, 5).unwrap();
        assert!(a < b);
        assert_eq!(
            RationalDuration::new(5, 1, 3).unwrap(),
            RationalDuration::new(5, 2, 6).unwrap()
        );
    }

    #[test]
    fn compare_extreme_denominators() {
        let a = RationalDuration::new(0, i64::MAX - 2, i64::MAX - 1).unwrap();
        let b = RationalDuration::new(0, i64::MAX - 1, i64::MAX).unwrap();
        assert!(a < b);
    }

    #[test]
    fn sign_predicates() {
        assert!(RationalDuration::ZERO.is_zero());
        assert!(!RationalDuration::ZERO.is_positive());
        assert!(RationalDuration::new(0, 1, 2).unwrap().is_positive());
        assert!(!RationalDuration::new(-1, 1, 2).unwrap().is_positive());
    }

    #[test]
    fn display() {
        assert_eq!(RationalDuration::new(365, 97, 400).unwrap().to_string(), "365 97/400");
        assert_eq!(RationalDuration::from_integer(360).to_string(), "360");
    }
}
