//! Calendar kinds and their numeric codes.

use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// The rule family a [`Calendar`](crate::Calendar) follows.
///
/// The numeric codes (`1..=6`) are stable; they are what persisted calendars
/// store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CalendarKind {
    /// Proleptic Gregorian: Feb has 29 days when
    /// `year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)`.
    Gregorian = 1,
    /// Dates are a single Julian day number; shares the Gregorian epoch.
    JulianDay = 2,
    /// Gregorian months with February fixed at 28 days.
    NoLeap = 3,
    /// Twelve months of exactly 30 days.
    Day360 = 4,
    /// Caller-defined months, day length and year length.
    Custom = 5,
    /// Raw seconds only; no date fields.
    NoCalendar = 6,
}

impl CalendarKind {
    /// All kinds, in code order.
    pub const ALL: [Self; 6] = [
        Self::Gregorian,
        Self::JulianDay,
        Self::NoLeap,
        Self::Day360,
        Self::Custom,
        Self::NoCalendar,
    ];

    /// Returns the stable numeric code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Returns the canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Gregorian => "gregorian",
            Self::JulianDay => "julian_day",
            Self::NoLeap => "no_leap",
            Self::Day360 => "360_day",
            Self::Custom => "custom",
            Self::NoCalendar => "no_calendar",
        }
    }

    /// Returns `true` for kinds whose dates are year/month/day triples.
    pub fn has_ymd_dates(self) -> bool {
        matches!(
            self,
            Self::Gregorian | Self::NoLeap | Self::Day360 | Self::Custom
        )
    }
}

impl TryFrom<i32> for CalendarKind {
    type Error = CalendarError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|k| k.code() == code)
            .ok_or_else(|| CalendarError::InvalidCalendarType {
                value: code.to_string(),
            })
    }
}

impl FromStr for CalendarKind {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "gregorian" | "standard" => Ok(Self::Gregorian),
            "julian_day" | "julianday" => Ok(Self::JulianDay),
            "no_leap" | "noleap" | "365_day" => Ok(Self::NoLeap),
            "360_day" | "day360" => Ok(Self::Day360),
            "custom" => Ok(Self::Custom),
            "no_calendar" | "nocalendar" | "none" => Ok(Self::NoCalendar),
            _ => Err(CalendarError::InvalidCalendarType {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
