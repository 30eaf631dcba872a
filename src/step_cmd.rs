//! Step command: run a fixed-interval model clock and print each date.

use anyhow::{Result, bail};
use tracing::{info, info_span};

use horae_calendar::{BaseTime, time_sequence};

use crate::cli::StepArgs;
use crate::config::HoraeConfig;
use crate::convert;

/// Run the time-stepping loop described by `[step]`.
pub fn run(args: StepArgs) -> Result<()> {
    let _cmd = info_span!("step").entered();
    let config = HoraeConfig::load(&args.config)?;
    let calendar = convert::build_calendar(&config.calendar)?;

    let count = args.count.unwrap_or(config.step.count);
    if config.step.interval_seconds == 0 && count > 1 {
        bail!("interval_seconds must be non-zero");
    }
    let start = convert::step_start(&calendar, &config.step)?;
    let interval = BaseTime::from_whole_seconds(config.step.interval_seconds);
    info!(%start, %interval, count, "stepping");

    for (i, date) in time_sequence(&calendar, start, interval, count)?.iter().enumerate() {
        println!("{i}\t{date}");
    }
    info!("done");
    Ok(())
}
