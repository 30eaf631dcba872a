//! Fixed rule tables for the built-in calendar kinds.

use crate::kind::CalendarKind;
use crate::rational::RationalDuration;

/// Seconds in a day for every built-in kind that has days.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Number of days in each month (index 0 = January) outside leap years.
pub(crate) const GREGORIAN_DAYS_PER_MONTH: [i32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Number of days in each month of the 360-day calendar.
pub(crate) const DAY360_DAYS_PER_MONTH: [i32; 12] = [30; 12];

/// Years in one repetition of the Gregorian leap pattern.
pub(crate) const GREGORIAN_CYCLE_YEARS: i64 = 400;

/// Days in one 400-year Gregorian cycle (`400 * 365 + 97`).
pub(crate) const GREGORIAN_CYCLE_DAYS: i64 = 146_097;

/// Julian day number of 0000-01-01 in the proleptic Gregorian calendar.
///
/// Gregorian and Julian-day calendars place BaseTime zero at the start of
/// Julian day 0, so this is the day offset of the Gregorian reference year.
pub(crate) const JULIAN_DAY_OF_YEAR_ZERO: i64 = 1_721_060;

/// Mean Gregorian year: 365 97/400 days.
const GREGORIAN_DAYS_PER_YEAR: RationalDuration = RationalDuration::from_reduced(365, 97, 400);

/// Returns `true` if `year` is a Gregorian leap year.
///
/// ```
/// use horae_calendar::is_leap_year;
///
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// ```
pub fn is_leap_year(year: i64) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// The fixed rules of a built-in kind.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BuiltinRules {
    pub days_per_month: &'static [i32],
    pub months_per_year: i32,
    pub seconds_per_day: i64,
    pub days_per_year: RationalDuration,
}

/// Returns the fixed rules for `kind`, or `None` for [`CalendarKind::Custom`].
pub(crate) fn builtin_rules(kind: CalendarKind) -> Option<BuiltinRules> {
    let rules = match kind {
        CalendarKind::Gregorian | CalendarKind::JulianDay => BuiltinRules {
            days_per_month: &GREGORIAN_DAYS_PER_MONTH,
            months_per_year: 12,
            seconds_per_day: SECONDS_PER_DAY,
            days_per_year: GREGORIAN_DAYS_PER_YEAR,
        },
        CalendarKind::NoLeap => BuiltinRules {
            days_per_month: &GREGORIAN_DAYS_PER_MONTH,
            months_per_year: 12,
            seconds_per_day: SECONDS_PER_DAY,
            days_per_year: RationalDuration::from_integer(365),
        },
        CalendarKind::Day360 => BuiltinRules {
            days_per_month: &DAY360_DAYS_PER_MONTH,
            months_per_year: 12,
            seconds_per_day: SECONDS_PER_DAY,
            days_per_year: RationalDuration::from_integer(360),
        },
        CalendarKind::NoCalendar => BuiltinRules {
            days_per_month: &[],
            months_per_year: 0,
            seconds_per_day: 0,
            days_per_year: RationalDuration::ZERO,
        },
        CalendarKind::Custom => return None,
    };
    Some(rules)
}
