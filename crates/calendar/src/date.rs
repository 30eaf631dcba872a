//! Calendar dates with a time of day.

use std::fmt;

use crate::base_time::BaseTime;

/// A date and time of day as seen through a particular calendar.
///
/// Which fields are present depends on the calendar kind:
///
/// | Kind | `year` | `month` | `day` |
/// |------|--------|---------|-------|
/// | Gregorian, NoLeap, Day360, Custom | yes | yes | day of month |
/// | JulianDay | – | – | Julian day number |
/// | NoCalendar | – | – | – |
///
/// `time_of_day` is an exact [`BaseTime`] duration; for a no-calendar
/// calendar it is the whole time value.
///
/// # Example
///
/// ```
/// use horae_calendar::{BaseTime, CalendarTime};
///
/// let noon = CalendarTime::ymd(2000, 2, 29).with_time_of_day(BaseTime::from_whole_seconds(43_200));
/// assert_eq!(noon.year(), Some(2000));
/// assert_eq!(noon.time_of_day().seconds(), 43_200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CalendarTime {
    year: Option<i64>,
    month: Option<u32>,
    day: Option<i64>,
    time_of_day: BaseTime,
}

impl CalendarTime {
    /// Creates a year/month/day date at the start of the day.
    pub fn ymd(year: i64, month: u32, day: i64) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            time_of_day: BaseTime::ZERO,
        }
    }

    /// Creates a Julian-day date at the start of the day.
    pub fn day_number(day: i64) -> Self {
        Self {
            day: Some(day),
            ..Self::default()
        }
    }

    /// Creates a value with no date fields, only a time.
    pub fn seconds_only(time: BaseTime) -> Self {
        Self {
            time_of_day: time,
            ..Self::default()
        }
    }

    /// Sets the year.
    pub fn with_year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the month.
    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// Sets the day (day of month, or Julian day number).
    pub fn with_day(mut self, day: i64) -> Self {
        self.day = Some(day);
        self
    }

    /// Sets the time of day.
    pub fn with_time_of_day(mut self, time_of_day: BaseTime) -> Self {
        self.time_of_day = time_of_day;
        self
    }

    /// Returns the year, if present.
    pub fn year(&self) -> Option<i64> {
        self.year
    }

    /// Returns the month (1-based), if present.
    pub fn month(&self) -> Option<u32> {
        self.month
    }

    /// Returns the day, if present.
    pub fn day(&self) -> Option<i64> {
        self.day
    }

    /// Returns the time of day.
    pub fn time_of_day(&self) -> BaseTime {
        self.time_of_day
    }

    /// Returns `true` if any of year, month or day is set.
    pub fn has_date_fields(&self) -> bool {
        self.year.is_some() || self.month.is_some() || self.day.is_some()
    }
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.year, self.month, self.day) {
            (Some(y), Some(m), Some(d)) => write!(f, "{y:04}-{m:02}-{d:02} {}", self.time_of_day),
            (None, None, Some(d)) => write!(f, "day {d} {}", self.time_of_day),
            _ => write!(f, "{}", self.time_of_day),
        }
    }
}
