//! Fixed-step time sequences.

use crate::base_time::BaseTime;
use crate::calendar::Calendar;
use crate::date::CalendarTime;
use crate::error::CalendarError;

const MAX_RESERVED_STEPS: usize = 4_096;

/// Converts `start + k * step` to dates for `k` in `0..n_steps`.
///
/// This is the conversion a time-stepping loop performs once per step. The
/// step is exact, so a step of a third of a second never drifts.
///
/// # Errors
///
/// Returns [`CalendarError::ArithmeticOverflow`] if a step leaves the
/// BaseTime range, or any error from [`Calendar::to_date`].
///
/// # Example
///
/// ```
/// use horae_calendar::{BaseTime, Calendar, CalendarKind, CalendarTime, time_sequence};
///
/// let cal = Calendar::builtin("model", CalendarKind::NoLeap).unwrap();
/// let start = cal.to_time(&CalendarTime::ymd(2000, 12, 30)).unwrap();
/// let day = BaseTime::from_whole_seconds(86_400);
/// let dates = time_sequence(&cal, start, day, 3).unwrap();
/// assert_eq!(dates[2], CalendarTime::ymd(2001, 1, 1));
/// ```
#[tracing::instrument(skip(calendar), fields(calendar = %calendar.name()))]
pub fn time_sequence(
    calendar: &Calendar,
    start: BaseTime,
    step: BaseTime,
    n_steps: usize,
) -> Result<Vec<CalendarTime>, CalendarError> {
    // n_steps may be far more than the BaseTime range can reach.
    let mut dates = Vec::with_capacity(n_steps.min(MAX_RESERVED_STEPS));
    if n_steps == 0 {
        return Ok(dates);
    }
    let mut current = start;
    dates.push(calendar.to_date(&current)?);
    for _ in 1..n_steps {
        current = current.checked_add(step)?;
        dates.push(calendar.to_date(&current)?);
    }
    Ok(dates)
}
