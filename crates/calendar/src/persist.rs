//! Byte encoding of calendars for checkpoint/restart.
//!
//! The encoding is `bincode` over a flat record holding the name, kind code
//! and every rule field. Ids are not persisted; a restored calendar gets a
//! fresh one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::Calendar;
use crate::error::CalendarError;
use crate::kind::CalendarKind;
use crate::rational::RationalDuration;

#[derive(Debug, Serialize, Deserialize)]
struct CalendarRecord {
    name: String,
    kind: i32,
    days_per_month: Vec<i32>,
    months_per_year: i32,
    seconds_per_day: i64,
    seconds_per_year: i64,
    /// `(whole, numerator, denominator)`.
    days_per_year: (i64, i64, i64),
}

impl From<&Calendar> for CalendarRecord {
    fn from(calendar: &Calendar) -> Self {
        let dpy = calendar.days_per_year();
        Self {
            name: calendar.name().to_string(),
            kind: calendar.kind().code(),
            days_per_month: calendar.days_per_month().to_vec(),
            months_per_year: calendar.months_per_year(),
            seconds_per_day: calendar.seconds_per_day(),
            seconds_per_year: calendar.seconds_per_year(),
            days_per_year: (dpy.whole(), dpy.numerator(), dpy.denominator()),
        }
    }
}

/// Encodes a calendar's name, kind and rules.
///
/// # Errors
///
/// Returns [`CalendarError::Persistence`] if encoding fails.
pub fn serialize(calendar: &Calendar) -> Result<Vec<u8>, CalendarError> {
    bincode::serialize(&CalendarRecord::from(calendar)).map_err(|e| CalendarError::Persistence {
        reason: e.to_string(),
    })
}

/// Restores a calendar written by [`serialize`].
///
/// The result is validated before it is returned and carries a fresh id.
///
/// # Errors
///
/// Returns [`CalendarError::Persistence`] if the bytes cannot be decoded, or
/// [`CalendarError::InvalidCalendarState`] if they decode to an unknown kind
/// or an inconsistent rule table.
///
/// # Example
///
/// ```
/// use horae_calendar::{Calendar, CalendarKind, deserialize, serialize};
///
/// let cal = Calendar::builtin("model", CalendarKind::NoLeap).unwrap();
/// let restored = deserialize(&serialize(&cal).unwrap()).unwrap();
/// assert_eq!(restored, cal);
/// assert_eq!(restored.name(), "model");
/// ```
pub fn deserialize(bytes: &[u8]) -> Result<Calendar, CalendarError> {
    let record: CalendarRecord =
        bincode::deserialize(bytes).map_err(|e| CalendarError::Persistence {
            reason: e.to_string(),
        })?;
    let state = |e: CalendarError| CalendarError::InvalidCalendarState {
        reason: e.to_string(),
    };
    let kind = CalendarKind::try_from(record.kind).map_err(state)?;
    let (whole, numerator, denominator) = record.days_per_year;
    let days_per_year = RationalDuration::new(whole, numerator, denominator).map_err(state)?;
    let calendar = Calendar::from_parts(
        &record.name,
        kind,
        record.days_per_month,
        record.months_per_year,
        record.seconds_per_day,
        record.seconds_per_year,
        days_per_year,
    );
    calendar.validate()?;
    debug!(id = calendar.id(), name = %calendar.name(), %kind, "calendar restored");
    Ok(calendar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CustomRules;

    fn encode(record: &CalendarRecord) -> Vec<u8> {
        bincode::serialize(record).unwrap()
    }

    #[test]
    fn builtin_roundtrip() {
        for kind in CalendarKind::ALL {
            if kind == CalendarKind::Custom {
                continue;
            }
            let cal = Calendar::builtin("saved", kind).unwrap();
            let restored = deserialize(&serialize(&cal).unwrap()).unwrap();
            assert_eq!(restored, cal);
            assert_eq!(restored.kind(), kind);
            assert_ne!(restored.id(), cal.id());
        }
    }

    #[test]
    fn custom_roundtrip_keeps_fraction() {
        let rules = CustomRules::new(vec![30; 12])
            .with_seconds_per_day(86_164)
            .with_days_per_year(RationalDuration::new(360, 1, 4).unwrap());
        let cal = Calendar::custom("sidereal", rules).unwrap();
        let restored = deserialize(&serialize(&cal).unwrap()).unwrap();
        assert_eq!(restored, cal);
        assert_eq!(restored.days_per_year(), RationalDuration::new(360, 1, 4).unwrap());
        assert_eq!(restored.seconds_per_year(), cal.seconds_per_year());
    }

    #[test]
    fn truncated_bytes() {
        let cal = Calendar::builtin("saved", CalendarKind::Gregorian).unwrap();
        let bytes = serialize(&cal).unwrap();
        assert!(matches!(
            deserialize(&bytes[..bytes.len() / 2]),
            Err(CalendarError::Persistence { .. })
        ));
        assert!(matches!(
            deserialize(&[]),
            Err(CalendarError::Persistence { .. })
        ));
    }

    #[test]
    fn unknown_kind_code() {
        let mut record = CalendarRecord::from(&Calendar::builtin("x", CalendarKind::NoLeap).unwrap());
        record.kind = 42;
        assert!(matches!(
            deserialize(&encode(&record)),
            Err(CalendarError::InvalidCalendarState { .. })
        ));
    }

    #[test]
    fn zero_denominator() {
        let mut record = CalendarRecord::from(&Calendar::builtin("x", CalendarKind::NoLeap).unwrap());
        record.days_per_year = (365, 0, 0);
        assert!(matches!(
            deserialize(&encode(&record)),
            Err(CalendarError::InvalidCalendarState { .. })
        ));
    }

    #[test]
    fn tampered_builtin_table() {
        let mut record = CalendarRecord::from(&Calendar::builtin("x", CalendarKind::NoLeap).unwrap());
        record.days_per_month[1] = 29;
        assert!(matches!(
            deserialize(&encode(&record)),
            Err(CalendarError::InvalidCalendarState { .. })
        ));
    }

    #[test]
    fn tampered_custom_table() {
        let cal = Calendar::custom("c", CustomRules::new(vec![10, 10])).unwrap();
        let mut record = CalendarRecord::from(&cal);
        record.days_per_month.push(10);
        assert!(matches!(
            deserialize(&encode(&record)),
            Err(CalendarError::InvalidCalendarState { .. })
        ));
    }
}
