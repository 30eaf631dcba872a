//! `to-time` and `to-date` commands: one-off conversions.

use anyhow::{Context, Result};
use tracing::info;

use horae_calendar::{BaseTime, CalendarTime};

use crate::cli::{ToDateArgs, ToTimeArgs};
use crate::config::HoraeConfig;
use crate::convert;

/// Converts a date to seconds since the calendar epoch and prints it.
pub fn run_to_time(args: ToTimeArgs) -> Result<()> {
    let config = HoraeConfig::load(&args.config)?;
    let calendar = convert::build_calendar(&config.calendar)?;
    info!(calendar = %calendar, "calendar ready");

    let time_of_day = convert::parse_seconds(&args.seconds)?;
    let date = match (&args.date, args.day) {
        (Some(d), _) => convert::parse_date(d)?,
        (None, Some(n)) => CalendarTime::day_number(n),
        (None, None) => CalendarTime::default(),
    }
    .with_time_of_day(time_of_day);

    let time = calendar
        .to_time(&date)
        .with_context(|| format!("cannot convert {date} with {} calendar", calendar.kind()))?;
    println!("{time}");
    Ok(())
}

/// Converts seconds since the calendar epoch to a date and prints it.
pub fn run_to_date(args: ToDateArgs) -> Result<()> {
    let config = HoraeConfig::load(&args.config)?;
    let calendar = convert::build_calendar(&config.calendar)?;
    info!(calendar = %calendar, "calendar ready");

    let (n, d) = match &args.fraction {
        Some(f) => convert::parse_fraction(f)?,
        None => (0, 1),
    };
    let time = BaseTime::from_seconds(args.seconds, n, d)?;
    let date = calendar
        .to_date(&time)
        .with_context(|| format!("cannot convert {time} with {} calendar", calendar.kind()))?;
    println!("{date}");
    Ok(())
}
