//! Pure conversion functions: TOML config structs and CLI strings -> crate API types.

use anyhow::{Context, Result, bail};

use horae_calendar::{BaseTime, Calendar, CalendarKind, CalendarTime, CustomRules, RationalDuration};

use crate::config::{CalendarToml, StepToml};

/// Parses a calendar kind name (`gregorian`, `no_leap`, `360_day`, ...).
pub fn parse_kind(s: &str) -> Result<CalendarKind> {
    s.parse::<CalendarKind>()
        .with_context(|| format!("unknown calendar kind: {s:?}"))
}

/// Builds a [`Calendar`] from the `[calendar]` table.
///
/// Built-in kinds reject the custom rule fields.
pub fn build_calendar(t: &CalendarToml) -> Result<Calendar> {
    let kind = parse_kind(&t.kind)?;
    if kind != CalendarKind::Custom {
        if t.days_per_month.is_some()
            || t.months_per_year.is_some()
            || t.seconds_per_day.is_some()
            || t.days_per_year.is_some()
        {
            bail!("calendar rule fields are only allowed for kind = \"custom\", got {kind}");
        }
        return Ok(Calendar::builtin(&t.name, kind)?);
    }

    let Some(days_per_month) = t.days_per_month.clone() else {
        bail!("custom calendar needs days_per_month");
    };
    let mut rules = CustomRules::new(days_per_month);
    if let Some(m) = t.months_per_year {
        rules = rules.with_months_per_year(m);
    }
    if let Some(s) = t.seconds_per_day {
        rules = rules.with_seconds_per_day(s);
    }
    if let Some([whole, numerator, denominator]) = t.days_per_year {
        rules = rules.with_days_per_year(
            RationalDuration::new(whole, numerator, denominator)
                .context("invalid days_per_year")?,
        );
    }
    Ok(Calendar::custom(&t.name, rules)?)
}

/// Parses `Y`, `Y-M` or `Y-M-D`; the year may carry a leading `-`.
pub fn parse_date(s: &str) -> Result<CalendarTime> {
    let (sign, body) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s),
    };
    let parts: Vec<&str> = body.split('-').collect();
    if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
        bail!("date must be Y-M-D, got {s:?}");
    }
    let year: i64 = parts[0]
        .parse()
        .with_context(|| format!("invalid year in {s:?}"))?;
    let mut date = CalendarTime::default().with_year(sign * year);
    if let Some(m) = parts.get(1) {
        let month: u32 = m.parse().with_context(|| format!("invalid month in {s:?}"))?;
        date = date.with_month(month);
    }
    if let Some(d) = parts.get(2) {
        let day: i64 = d.parse().with_context(|| format!("invalid day in {s:?}"))?;
        date = date.with_day(day);
    }
    Ok(date)
}

/// Parses a fraction `N/D`.
pub fn parse_fraction(s: &str) -> Result<(i64, i64)> {
    let Some((n, d)) = s.split_once('/') else {
        bail!("fraction must be N/D, got {s:?}");
    };
    let n: i64 = n
        .trim()
        .parse()
        .with_context(|| format!("invalid numerator in {s:?}"))?;
    let d: i64 = d
        .trim()
        .parse()
        .with_context(|| format!("invalid denominator in {s:?}"))?;
    Ok((n, d))
}

/// Parses `S` or `S/N/D` into an exact time.
pub fn parse_seconds(s: &str) -> Result<BaseTime> {
    let (whole, fraction) = match s.split_once('/') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (s, None),
    };
    let whole: i64 = whole
        .trim()
        .parse()
        .with_context(|| format!("invalid seconds in {s:?}"))?;
    let (n, d) = match fraction {
        Some(f) => parse_fraction(f)?,
        None => (0, 1),
    };
    Ok(BaseTime::from_seconds(whole, n, d)?)
}

/// Resolves the start of the `[step]` loop.
pub fn step_start(calendar: &Calendar, step: &StepToml) -> Result<BaseTime> {
    let offset = BaseTime::from_whole_seconds(step.start_seconds);
    let date = match (&step.start, calendar.kind()) {
        (Some(s), CalendarKind::JulianDay) => {
            let day: i64 = s
                .parse()
                .with_context(|| format!("julian_day start must be a day number, got {s:?}"))?;
            CalendarTime::day_number(day).with_time_of_day(offset)
        }
        (Some(s), _) => parse_date(s)?.with_time_of_day(offset),
        (None, _) => CalendarTime::seconds_only(offset),
    };
    calendar
        .to_time(&date)
        .with_context(|| format!("invalid step start for {} calendar", calendar.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar_toml(kind: &str) -> CalendarToml {
        CalendarToml {
            name: "test".to_string(),
            kind: kind.to_string(),
            days_per_month: None,
            months_per_year: None,
            seconds_per_day: None,
            days_per_year: None,
        }
    }

    #[test]
    fn date_forms() {
        assert_eq!(parse_date("2000-02-29").unwrap(), CalendarTime::ymd(2000, 2, 29));
        assert_eq!(parse_date("-44-3-15").unwrap(), CalendarTime::ymd(-44, 3, 15));
        let year_only = parse_date("1999").unwrap();
        assert_eq!(year_only.year(), Some(1999));
        assert_eq!(year_only.month(), None);
        assert!(parse_date("2000--01").is_err());
        assert!(parse_date("2000-01-01-01").is_err());
        assert!(parse_date("year").is_err());
    }

    #[test]
    fn seconds_forms() {
        assert_eq!(parse_seconds("90").unwrap(), BaseTime::from_whole_seconds(90));
        assert_eq!(
            parse_seconds("5/1/3").unwrap(),
            BaseTime::from_seconds(5, 1, 3).unwrap()
        );
        assert_eq!(parse_seconds("-1").unwrap(), BaseTime::from_whole_seconds(-1));
        assert!(parse_seconds("5/1/0").is_err());
        assert!(parse_seconds("5/1").is_err());
    }

    #[test]
    fn builtin_calendar() {
        let cal = build_calendar(&calendar_toml("noleap")).unwrap();
        assert_eq!(cal.kind(), CalendarKind::NoLeap);
        assert_eq!(cal.name(), "test");
    }

    #[test]
    fn builtin_rejects_rules() {
        let mut t = calendar_toml("gregorian");
        t.days_per_month = Some(vec![30; 12]);
        assert!(build_calendar(&t).is_err());
    }

    #[test]
    fn custom_calendar() {
        let mut t = calendar_toml("custom");
        assert!(build_calendar(&t).is_err());
        t.days_per_month = Some(vec![30, 30, 30]);
        t.seconds_per_day = Some(3_600);
        t.days_per_year = Some([90, 1, 2]);
        let cal = build_calendar(&t).unwrap();
        assert_eq!(cal.months_per_year(), 3);
        assert_eq!(cal.seconds_per_year(), 325_800);
    }

    #[test]
    fn unknown_kind() {
        assert!(build_calendar(&calendar_toml("lunar")).is_err());
    }

    #[test]
    fn start_for_each_kind() {
        let g = build_calendar(&calendar_toml("gregorian")).unwrap();
        let step = StepToml {
            start: Some("2000-01-01".to_string()),
            ..StepToml::default()
        };
        assert_eq!(
            step_start(&g, &step).unwrap(),
            BaseTime::from_whole_seconds(2_451_545 * 86_400)
        );

        let none = build_calendar(&calendar_toml("no_calendar")).unwrap();
        let step = StepToml {
            start_seconds: 42,
            ..StepToml::default()
        };
        assert_eq!(step_start(&none, &step).unwrap(), BaseTime::from_whole_seconds(42));

        let j = build_calendar(&calendar_toml("julian_day")).unwrap();
        let step = StepToml {
            start: Some("2451545".to_string()),
            ..StepToml::default()
        };
        assert_eq!(
            step_start(&j, &step).unwrap(),
            BaseTime::from_whole_seconds(2_451_545 * 86_400)
        );
    }
}
