//! Calendar rule tables: construction, identity, equality and validation.

use std::fmt;

use tracing::debug;

use crate::error::CalendarError;
use crate::kind::CalendarKind;
use crate::rational::RationalDuration;
use crate::registry;
use crate::tables::{self, builtin_rules};

/// Rules for a caller-defined calendar.
///
/// Defaults derived from the month table: `months_per_year` is its length,
/// `seconds_per_day` is 86 400 and `days_per_year` is the sum of its
/// entries.
///
/// # Example
///
/// ```
/// use horae_calendar::{CustomRules, RationalDuration};
///
/// let rules = CustomRules::new(vec![30, 30, 30, 30])
///     .with_seconds_per_day(3_600)
///     .with_days_per_year(RationalDuration::new(120, 1, 4).unwrap());
///
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CustomRules {
    days_per_month: Vec<i32>,
    months_per_year: i32,
    seconds_per_day: i64,
    days_per_year: RationalDuration,
}

impl CustomRules {
    /// Creates rules from a month table, deriving the remaining fields.
    pub fn new(days_per_month: Vec<i32>) -> Self {
        let months_per_year = i32::try_from(days_per_month.len()).unwrap_or(i32::MAX);
        let total: i64 = days_per_month.iter().copied().map(i64::from).sum();
        Self {
            days_per_month,
            months_per_year,
            seconds_per_day: tables::SECONDS_PER_DAY,
            days_per_year: RationalDuration::from_integer(total),
        }
    }

    /// Sets the declared number of months per year.
    pub fn with_months_per_year(mut self, months_per_year: i32) -> Self {
        self.months_per_year = months_per_year;
        self
    }

    /// Sets the length of a day in seconds.
    pub fn with_seconds_per_day(mut self, seconds_per_day: i64) -> Self {
        self.seconds_per_day = seconds_per_day;
        self
    }

    /// Sets the (possibly fractional) number of days per year.
    pub fn with_days_per_year(mut self, days_per_year: RationalDuration) -> Self {
        self.days_per_year = days_per_year;
        self
    }

    /// Returns the month table.
    pub fn days_per_month(&self) -> &[i32] {
        &self.days_per_month
    }

    /// Returns the declared number of months per year.
    pub fn months_per_year(&self) -> i32 {
        self.months_per_year
    }

    /// Returns the length of a day in seconds.
    pub fn seconds_per_day(&self) -> i64 {
        self.seconds_per_day
    }

    /// Returns the number of days per year.
    pub fn days_per_year(&self) -> RationalDuration {
        self.days_per_year
    }

    /// Validates these rules.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidCalendarParameters`] if
    /// `months_per_year < 1`, the month table length differs from
    /// `months_per_year`, any month has fewer than one day,
    /// `seconds_per_day < 1`, or `days_per_year` is not positive.
    pub fn validate(&self) -> Result<(), CalendarError> {
        check_custom_rules(
            &self.days_per_month,
            self.months_per_year,
            self.seconds_per_day,
            self.days_per_year,
        )
        .map_err(|reason| CalendarError::InvalidCalendarParameters { reason })
    }
}

/// Shared by construction-time and reconstruction-time validation; returns
/// the violated rule.
fn check_custom_rules(
    days_per_month: &[i32],
    months_per_year: i32,
    seconds_per_day: i64,
    days_per_year: RationalDuration,
) -> Result<(), String> {
    if months_per_year < 1 {
        return Err(format!("months per year must be >= 1, got {months_per_year}"));
    }
    if usize::try_from(months_per_year).ok() != Some(days_per_month.len()) {
        return Err(format!(
            "month table has {} entries but months per year is {months_per_year}",
            days_per_month.len()
        ));
    }
    if let Some((i, &days)) = days_per_month.iter().enumerate().find(|(_, d)| **d < 1) {
        return Err(format!("month {} has {days} days (must be >= 1)", i + 1));
    }
    if seconds_per_day < 1 {
        return Err(format!("seconds per day must be >= 1, got {seconds_per_day}"));
    }
    if !days_per_year.is_positive() {
        return Err(format!("days per year must be positive, got {days_per_year}"));
    }
    Ok(())
}

/// An immutable calendar: a kind plus its rule table.
///
/// Conversions live in [`Calendar::to_time`] and [`Calendar::to_date`].
/// Every instance carries a process-unique id; cloning yields a new id.
/// Equality ignores id and name (see the `PartialEq` impl).
///
/// # Example
///
/// ```
/// use horae_calendar::{Calendar, CalendarKind};
///
/// let a = Calendar::builtin("model", CalendarKind::Gregorian).unwrap();
/// let b = Calendar::builtin("obs", CalendarKind::Gregorian).unwrap();
/// assert_eq!(a, b);
/// assert_ne!(a.id(), b.id());
/// ```
#[derive(Debug)]
pub struct Calendar {
    name: String,
    kind: CalendarKind,
    days_per_month: Vec<i32>,
    months_per_year: i32,
    seconds_per_day: i64,
    seconds_per_year: i64,
    days_per_year: RationalDuration,
    id: i64,
}

impl Calendar {
    /// Creates a calendar of a built-in kind.
    ///
    /// An empty `name` is replaced by a default derived from the id
    /// (`Calendar001`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidCalendarType`] for
    /// [`CalendarKind::Custom`], which needs [`Calendar::custom`].
    pub fn builtin(name: &str, kind: CalendarKind) -> Result<Self, CalendarError> {
        let rules = builtin_rules(kind).ok_or_else(|| CalendarError::InvalidCalendarType {
            value: format!("{kind} (custom calendars need explicit rules)"),
        })?;
        Self::assemble(
            name,
            kind,
            rules.days_per_month.to_vec(),
            rules.months_per_year,
            rules.seconds_per_day,
            rules.days_per_year,
        )
    }

    /// Creates a calendar from caller-defined rules.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidCalendarParameters`] if the rules fail
    /// [`CustomRules::validate`], or [`CalendarError::ArithmeticOverflow`] if
    /// the year length in seconds does not fit in an `i64`.
    pub fn custom(name: &str, rules: CustomRules) -> Result<Self, CalendarError> {
        rules.validate()?;
        Self::assemble(
            name,
            CalendarKind::Custom,
            rules.days_per_month,
            rules.months_per_year,
            rules.seconds_per_day,
            rules.days_per_year,
        )
    }

    fn assemble(
        name: &str,
        kind: CalendarKind,
        days_per_month: Vec<i32>,
        months_per_year: i32,
        seconds_per_day: i64,
        days_per_year: RationalDuration,
    ) -> Result<Self, CalendarError> {
        let seconds_per_year = days_per_year.multiply(seconds_per_day)?.whole();
        let calendar = Self::from_parts(
            name,
            kind,
            days_per_month,
            months_per_year,
            seconds_per_day,
            seconds_per_year,
            days_per_year,
        );
        debug!(id = calendar.id, name = %calendar.name, %kind, "calendar created");
        Ok(calendar)
    }

    /// Registers a calendar from raw fields without checking them.
    ///
    /// Used by persistence, which validates afterwards.
    pub(crate) fn from_parts(
        name: &str,
        kind: CalendarKind,
        days_per_month: Vec<i32>,
        months_per_year: i32,
        seconds_per_day: i64,
        seconds_per_year: i64,
        days_per_year: RationalDuration,
    ) -> Self {
        let id = registry::register();
        let name = if name.is_empty() {
            format!("Calendar{id:03}")
        } else {
            name.to_string()
        };
        Self {
            name,
            kind,
            days_per_month,
            months_per_year,
            seconds_per_day,
            seconds_per_year,
            days_per_year,
            id,
        }
    }

    /// Destroys the calendar, releasing its registry entry.
    ///
    /// Dropping has the same effect; this form logs the destruction.
    pub fn destroy(self) {
        debug!(id = self.id, name = %self.name, "calendar destroyed");
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the calendar. The name is descriptive only.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the kind.
    pub fn kind(&self) -> CalendarKind {
        self.kind
    }

    /// Returns the process-unique id.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the month table (non-leap lengths).
    pub fn days_per_month(&self) -> &[i32] {
        &self.days_per_month
    }

    /// Returns the number of months per year (0 for no-calendar).
    pub fn months_per_year(&self) -> i32 {
        self.months_per_year
    }

    /// Returns the length of a day in seconds (0 for no-calendar).
    pub fn seconds_per_day(&self) -> i64 {
        self.seconds_per_day
    }

    /// Returns `floor(days_per_year * seconds_per_day)`.
    pub fn seconds_per_year(&self) -> i64 {
        self.seconds_per_year
    }

    /// Returns the (mean) number of days per year.
    pub fn days_per_year(&self) -> RationalDuration {
        self.days_per_year
    }

    /// Returns `true` if Feb gains a day in Gregorian leap years.
    pub(crate) fn is_leap_aware(&self) -> bool {
        matches!(self.kind, CalendarKind::Gregorian | CalendarKind::JulianDay)
    }

    /// Returns `true` if `year` has a leap day in this calendar.
    pub fn is_leap_year(&self, year: i64) -> bool {
        self.is_leap_aware() && tables::is_leap_year(year)
    }

    /// Returns the number of days in `month` (1-based) of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidOperation`] for a no-calendar
    /// calendar, or [`CalendarError::InvalidDate`] if `month` is out of range.
    pub fn days_in_month(&self, year: i64, month: u32) -> Result<i64, CalendarError> {
        self.require_days("days_in_month")?;
        if month < 1 || i64::from(month) > i64::from(self.months_per_year) {
            return Err(CalendarError::invalid_date(format!(
                "month {month} out of range 1..={}",
                self.months_per_year
            )));
        }
        Ok(self.month_length(year, month))
    }

    /// Returns the number of days in `year`.
    ///
    /// Custom calendars count every day that starts within the year, so a
    /// year of `100 1/2` days has 101.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidOperation`] for a no-calendar calendar.
    pub fn days_in_year(&self, year: i64) -> Result<i64, CalendarError> {
        self.require_days("days_in_year")?;
        Ok(self.year_length(year))
    }

    pub(crate) fn require_days(&self, operation: &str) -> Result<(), CalendarError> {
        if self.kind == CalendarKind::NoCalendar {
            return Err(CalendarError::InvalidOperation {
                kind: self.kind,
                reason: format!("{operation} needs a calendar with days"),
            });
        }
        Ok(())
    }

    /// Length of `month` (1-based, already range-checked) in days.
    ///
    /// The final month of a custom calendar absorbs any days of the year the
    /// month table does not cover.
    pub(crate) fn month_length(&self, year: i64, month: u32) -> i64 {
        let base = i64::from(self.days_per_month[(month - 1) as usize]);
        if self.kind == CalendarKind::Custom && i64::from(month) == i64::from(self.months_per_year) {
            let before: i64 = self.days_per_month[..(month - 1) as usize]
                .iter()
                .copied()
                .map(i64::from)
                .sum();
            return base.max(self.custom_days_per_year() - before);
        }
        if month == 2 && self.is_leap_year(year) {
            base + 1
        } else {
            base
        }
    }

    /// Length of `year` in days: the month table plus any leap day, or for
    /// custom calendars every day that starts within the year.
    pub(crate) fn year_length(&self, year: i64) -> i64 {
        if self.kind == CalendarKind::Custom {
            return self.custom_days_per_year();
        }
        let base: i64 = self.days_per_month.iter().copied().map(i64::from).sum();
        if self.is_leap_year(year) { base + 1 } else { base }
    }

    /// `ceil(days_per_year)`: a fractional year ends part way through its
    /// last day.
    fn custom_days_per_year(&self) -> i64 {
        if self.days_per_year.is_integer() {
            self.days_per_year.whole()
        } else {
            self.days_per_year.whole().saturating_add(1)
        }
    }

    /// Checks the rule-table invariants.
    ///
    /// Intended for calendars reconstructed from external state.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidCalendarState`] naming the first
    /// violated invariant.
    pub fn validate(&self) -> Result<(), CalendarError> {
        let state = |reason: String| CalendarError::InvalidCalendarState { reason };
        if self.id < 1 {
            return Err(state(format!("id must be positive, got {}", self.id)));
        }
        match builtin_rules(self.kind) {
            Some(rules) => {
                if self.days_per_month != rules.days_per_month
                    || self.months_per_year != rules.months_per_year
                    || self.seconds_per_day != rules.seconds_per_day
                    || self.days_per_year != rules.days_per_year
                {
                    return Err(state(format!(
                        "{} calendar does not hold the fixed {} rule table",
                        self.name, self.kind
                    )));
                }
            }
            None => check_custom_rules(
                &self.days_per_month,
                self.months_per_year,
                self.seconds_per_day,
                self.days_per_year,
            )
            .map_err(state)?,
        }
        let expected = self
            .days_per_year
            .multiply(self.seconds_per_day)
            .map_err(|e| state(e.to_string()))?
            .whole();
        if self.seconds_per_year != expected {
            return Err(state(format!(
                "seconds per year is {} but the rules give {expected}",
                self.seconds_per_year
            )));
        }
        Ok(())
    }
}

impl Clone for Calendar {
    /// Deep-copies the rules and name under a fresh id.
    fn clone(&self) -> Self {
        let copy = Self::from_parts(
            &self.name,
            self.kind,
            self.days_per_month.clone(),
            self.months_per_year,
            self.seconds_per_day,
            self.seconds_per_year,
            self.days_per_year,
        );
        debug!(id = copy.id, source = self.id, "calendar copied");
        copy
    }
}

impl Drop for Calendar {
    fn drop(&mut self) {
        registry::release();
    }
}

impl PartialEq for Calendar {
    /// Built-in calendars compare by kind; custom calendars also compare
    /// every rule field. Names and ids never matter.
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind {
            return false;
        }
        if self.kind != CalendarKind::Custom {
            return true;
        }
        self.days_per_month == other.days_per_month
            && self.months_per_year == other.months_per_year
            && self.seconds_per_day == other.seconds_per_day
            && self.seconds_per_year == other.seconds_per_year
            && self.days_per_year == other.days_per_year
    }
}

impl Eq for Calendar {}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, id {})", self.name, self.kind, self.id)?;
        if self.kind == CalendarKind::NoCalendar {
            return Ok(());
        }
        write!(
            f,
            ": {} months {:?}, {} s/day, {} days/year, {} s/year",
            self.months_per_year,
            self.days_per_month,
            self.seconds_per_day,
            self.days_per_year,
            self.seconds_per_year
        )
    }
}
