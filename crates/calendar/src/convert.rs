//! Date <-> time conversion.
//!
//! Built-in kinds count days from a reference year. Whole cycles of the
//! leap pattern are skipped arithmetically (400 years for the Gregorian
//! family, one year for NoLeap and Day360), then the remaining years are
//! stepped one at a time by their own length, then the months, then the
//! days. The inverse walks the same steps in reverse, so both directions
//! agree exactly.
//!
//! Custom years are exactly `days_per_year * seconds_per_day` seconds long,
//! so year `k` starts at `k` times that (possibly fractional) length. Months
//! and days are laid out from each year's start; days the month table leaves
//! uncovered belong to the final month, and a fractional year ends part way
//! through its last day.
//!
//! Epochs: the Gregorian family puts BaseTime zero at the start of Julian
//! day 0; every other dated kind puts it at year 0, month 1, day 1.

use num_integer::Integer;
use tracing::trace;

use crate::base_time::BaseTime;
use crate::calendar::Calendar;
use crate::date::CalendarTime;
use crate::error::CalendarError;
use crate::kind::CalendarKind;
use crate::rational::RationalDuration;
use crate::tables::{GREGORIAN_CYCLE_DAYS, GREGORIAN_CYCLE_YEARS, JULIAN_DAY_OF_YEAR_ZERO};

impl Calendar {
    /// Converts a date and time of day into a [`BaseTime`].
    ///
    /// - Year/month/day kinds require `year`; an omitted month or day means 1.
    ///   The time of day may fall outside `[0, seconds_per_day)` and carries
    ///   into neighbouring days.
    /// - [`CalendarKind::JulianDay`] takes the Julian day number in `day` and
    ///   rejects `year`/`month`.
    /// - [`CalendarKind::NoCalendar`] rejects every date field and returns
    ///   the time of day unchanged.
    ///
    /// # Errors
    ///
    /// - [`CalendarError::InvalidDate`] for a missing year, a month outside
    ///   `1..=months_per_year`, a day outside the month (leap-aware), or a
    ///   custom-calendar day that starts after the end of its year.
    /// - [`CalendarError::InvalidOperation`] for date fields the kind does not use.
    /// - [`CalendarError::ArithmeticOverflow`] if the result does not fit.
    ///
    /// # Example
    ///
    /// ```
    /// use horae_calendar::{BaseTime, Calendar, CalendarKind, CalendarTime};
    ///
    /// let cal = Calendar::builtin("model", CalendarKind::Day360).unwrap();
    /// let t0 = cal.to_time(&CalendarTime::ymd(1, 1, 1)).unwrap();
    /// let t1 = cal.to_time(&CalendarTime::ymd(2, 1, 1)).unwrap();
    /// assert_eq!(t1.checked_sub(t0).unwrap(), BaseTime::from_whole_seconds(360 * 86_400));
    /// ```
    pub fn to_time(&self, date: &CalendarTime) -> Result<BaseTime, CalendarError> {
        let time = if self.kind().has_ymd_dates() {
            let year = date
                .year()
                .ok_or_else(|| CalendarError::invalid_date("year is required"))?;
            let month = date.month().unwrap_or(1);
            let day = date.day().unwrap_or(1);
            self.check_date(year, month, day)?;
            if self.kind() == CalendarKind::Custom {
                self.custom_time(year, month, day, date.time_of_day())?
            } else {
                let days = self.days_from_date(year, month, day) + self.epoch_offset_days();
                self.time_from_days(days, date.time_of_day())?
            }
        } else if self.kind() == CalendarKind::JulianDay {
            if date.year().is_some() || date.month().is_some() {
                return Err(CalendarError::InvalidOperation {
                    kind: self.kind(),
                    reason: "year and month are not used; give a Julian day number".to_string(),
                });
            }
            let day = date
                .day()
                .ok_or_else(|| CalendarError::invalid_date("Julian day number is required"))?;
            self.time_from_days(i128::from(day), date.time_of_day())?
        } else {
            if date.has_date_fields() {
                return Err(CalendarError::InvalidOperation {
                    kind: self.kind(),
                    reason: "date fields supplied to a calendar without dates".to_string(),
                });
            }
            date.time_of_day()
        };
        trace!(calendar = %self.name(), %date, %time, "date converted to time");
        Ok(time)
    }

    /// Converts a [`BaseTime`] into a date and time of day.
    ///
    /// The time of day is always in `[0, seconds_per_day)`. Julian-day
    /// calendars return only the day number; no-calendar calendars return no
    /// date fields and the time unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ArithmeticOverflow`] if the year does not fit
    /// in an `i64`.
    ///
    /// # Example
    ///
    /// ```
    /// use horae_calendar::{BaseTime, Calendar, CalendarKind, CalendarTime};
    ///
    /// let cal = Calendar::builtin("model", CalendarKind::Gregorian).unwrap();
    /// let leap_day = CalendarTime::ymd(2000, 2, 29).with_time_of_day(BaseTime::from_whole_seconds(60));
    /// let t = cal.to_time(&leap_day).unwrap();
    /// assert_eq!(cal.to_date(&t).unwrap(), leap_day);
    /// ```
    pub fn to_date(&self, time: &BaseTime) -> Result<CalendarTime, CalendarError> {
        let date = match self.kind() {
            CalendarKind::NoCalendar => CalendarTime::seconds_only(*time),
            CalendarKind::JulianDay => {
                let (days, time_of_day) = time.div_rem_seconds(self.seconds_per_day());
                CalendarTime::day_number(days).with_time_of_day(time_of_day)
            }
            CalendarKind::Custom => self.custom_date(time)?,
            _ => {
                let (days, time_of_day) = time.div_rem_seconds(self.seconds_per_day());
                let (year, month, day) =
                    self.date_from_days(i128::from(days) - self.epoch_offset_days())?;
                CalendarTime::ymd(year, month, day).with_time_of_day(time_of_day)
            }
        };
        trace!(calendar = %self.name(), %time, %date, "time converted to date");
        Ok(date)
    }

    fn check_date(&self, year: i64, month: u32, day: i64) -> Result<(), CalendarError> {
        if month < 1 || i64::from(month) > i64::from(self.months_per_year()) {
            return Err(CalendarError::invalid_date(format!(
                "month {month} out of range 1..={}",
                self.months_per_year()
            )));
        }
        let max_day = self.month_length(year, month);
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::invalid_date(format!(
                "day {day} out of range for month {month} of year {year} (max {max_day})"
            )));
        }
        if self.kind() == CalendarKind::Custom {
            let day_of_year = self.days_before_month(year, month) + day - 1;
            if RationalDuration::from_integer(day_of_year) >= self.days_per_year() {
                return Err(CalendarError::invalid_date(format!(
                    "day {day} of month {month} starts after the end of the {}-day year",
                    self.days_per_year()
                )));
            }
        }
        Ok(())
    }

    /// Day offset of the reference year from BaseTime zero.
    fn epoch_offset_days(&self) -> i128 {
        if self.is_leap_aware() {
            i128::from(JULIAN_DAY_OF_YEAR_ZERO)
        } else {
            0
        }
    }

    /// `(years, days)` in one repetition of the year-length pattern.
    fn year_cycle(&self) -> (i64, i64) {
        if self.is_leap_aware() {
            (GREGORIAN_CYCLE_YEARS, GREGORIAN_CYCLE_DAYS)
        } else {
            (1, self.year_length(0))
        }
    }

    /// Days in the months of `year` before `month`.
    fn days_before_month(&self, year: i64, month: u32) -> i64 {
        (1..month).map(|m| self.month_length(year, m)).sum()
    }

    /// Splits a zero-based day of the year into `(month, day)`.
    ///
    /// Anything past the earlier months lands in the final month.
    fn month_and_day(&self, year: i64, mut day_of_year: i64) -> (u32, i64) {
        let mut month = 1_u32;
        while i64::from(month) < i64::from(self.months_per_year()) {
            let length = self.month_length(year, month);
            if day_of_year < length {
                break;
            }
            day_of_year -= length;
            month += 1;
        }
        (month, day_of_year + 1)
    }

    /// Days from the reference year's first day to the given (valid) date.
    fn days_from_date(&self, year: i64, month: u32, day: i64) -> i128 {
        let (cycle_years, cycle_days) = self.year_cycle();
        let (cycles, year_of_cycle) = year.div_mod_floor(&cycle_years);
        let mut days = i128::from(cycles) * i128::from(cycle_days);
        // Leap status repeats every cycle, so the year within the cycle
        // stands in for the real year.
        for y in 0..year_of_cycle {
            days += i128::from(self.year_length(y));
        }
        days + i128::from(self.days_before_month(year, month)) + i128::from(day - 1)
    }

    /// Inverse of [`Self::days_from_date`].
    fn date_from_days(&self, days: i128) -> Result<(i64, u32, i64), CalendarError> {
        let (cycle_years, cycle_days) = self.year_cycle();
        let (cycles, mut remaining) = days.div_mod_floor(&i128::from(cycle_days));
        let mut year_of_cycle = 0_i64;
        loop {
            let length = i128::from(self.year_length(year_of_cycle));
            if remaining < length {
                break;
            }
            remaining -= length;
            year_of_cycle += 1;
        }
        let year = i64::try_from(cycles * i128::from(cycle_years) + i128::from(year_of_cycle))
            .map_err(|_| CalendarError::overflow("date conversion"))?;
        // remaining < one year's days, so it fits.
        let day_of_year =
            i64::try_from(remaining).map_err(|_| CalendarError::overflow("date conversion"))?;
        let (month, day) = self.month_and_day(year, day_of_year);
        Ok((year, month, day))
    }

    /// `days * seconds_per_day + time_of_day`, checked.
    ///
    /// Summed in `i128` before narrowing: near `i64::MIN` the day start alone
    /// can be out of range while the final time is not.
    fn time_from_days(&self, days: i128, time_of_day: BaseTime) -> Result<BaseTime, CalendarError> {
        let seconds = days
            .checked_mul(i128::from(self.seconds_per_day()))
            .and_then(|s| s.checked_add(i128::from(time_of_day.seconds())))
            .and_then(|s| i64::try_from(s).ok())
            .ok_or(CalendarError::overflow("date conversion"))?;
        Ok(BaseTime::from_rational(time_of_day.as_rational().with_whole(seconds)))
    }

    /// Exact length of a custom year in seconds.
    fn custom_year_seconds(&self) -> Result<RationalDuration, CalendarError> {
        self.days_per_year().multiply(self.seconds_per_day())
    }

    fn custom_time(
        &self,
        year: i64,
        month: u32,
        day: i64,
        time_of_day: BaseTime,
    ) -> Result<BaseTime, CalendarError> {
        let year_start = self.custom_year_seconds()?.multiply(year)?;
        let day_of_year = self.days_before_month(year, month) + day - 1;
        let into_year = day_of_year
            .checked_mul(self.seconds_per_day())
            .ok_or(CalendarError::overflow("date conversion"))?;
        BaseTime::from_rational(year_start)
            .checked_add(BaseTime::from_whole_seconds(into_year))?
            .checked_add(time_of_day)
    }

    fn custom_date(&self, time: &BaseTime) -> Result<CalendarTime, CalendarError> {
        let (year, into_year) = time
            .as_rational()
            .div_rem_floor(self.custom_year_seconds()?)?;
        let (day_of_year, time_of_day) =
            BaseTime::from_rational(into_year).div_rem_seconds(self.seconds_per_day());
        let (month, day) = self.month_and_day(year, day_of_year);
        Ok(CalendarTime::ymd(year, month, day).with_time_of_day(time_of_day))
    }
}
