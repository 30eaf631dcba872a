//! Export and inspect commands: calendar files for checkpoint/restart.

use anyhow::{Context, Result};
use tracing::info;

use horae_calendar::{deserialize, serialize};

use crate::cli::{ExportArgs, InspectArgs};
use crate::config::HoraeConfig;
use crate::convert;

/// Encode the configured calendar and write it to `--output`.
pub fn run_export(args: ExportArgs) -> Result<()> {
    let config = HoraeConfig::load(&args.config)?;
    let calendar = convert::build_calendar(&config.calendar)?;
    let bytes = serialize(&calendar)?;
    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("failed to write calendar: {}", args.output.display()))?;
    info!(path = %args.output.display(), n_bytes = bytes.len(), "calendar written");
    println!("{calendar}");
    Ok(())
}

/// Read, validate and print a calendar written by `export`.
pub fn run_inspect(args: InspectArgs) -> Result<()> {
    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("failed to read calendar: {}", args.input.display()))?;
    let calendar = deserialize(&bytes)
        .with_context(|| format!("invalid calendar file: {}", args.input.display()))?;
    println!("{calendar}");
    Ok(())
}
