//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Horae model-calendar toolkit.
#[derive(Parser)]
#[command(
    name = "horae",
    version,
    about = "Exact calendar arithmetic for model clocks"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Convert a date to seconds since the calendar epoch.
    ToTime(ToTimeArgs),
    /// Convert seconds since the calendar epoch to a date.
    ToDate(ToDateArgs),
    /// Run the `[step]` loop from the config, printing one date per step.
    Step(StepArgs),
    /// Write the configured calendar to a file.
    Export(ExportArgs),
    /// Read, validate and print a calendar file.
    Inspect(InspectArgs),
}

/// Arguments for the `to-time` subcommand.
#[derive(clap::Args)]
pub struct ToTimeArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "horae.toml")]
    pub config: PathBuf,

    /// Date as `Y-M-D` (year may be negative; month and day may be omitted).
    #[arg(short, long, conflicts_with = "day")]
    pub date: Option<String>,

    /// Julian day number (julian_day calendars).
    #[arg(long, allow_hyphen_values = true)]
    pub day: Option<i64>,

    /// Time of day as `S` or `S/N/D` (S seconds plus N/D of a second).
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    pub seconds: String,
}

/// Arguments for the `to-date` subcommand.
#[derive(clap::Args)]
pub struct ToDateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "horae.toml")]
    pub config: PathBuf,

    /// Whole seconds since the calendar epoch.
    #[arg(short, long, allow_hyphen_values = true)]
    pub seconds: i64,

    /// Fraction of a second as `N/D`.
    #[arg(short, long)]
    pub fraction: Option<String>,
}

/// Arguments for the `step` subcommand.
#[derive(clap::Args)]
pub struct StepArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "horae.toml")]
    pub config: PathBuf,

    /// Override the number of steps from config.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

/// Arguments for the `export` subcommand.
#[derive(clap::Args)]
pub struct ExportArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "horae.toml")]
    pub config: PathBuf,

    /// Path for the encoded calendar.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the `inspect` subcommand.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to an encoded calendar written by `export`.
    #[arg(short, long)]
    pub input: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn definitions_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_verbosity_and_step_count() {
        let cli = Cli::try_parse_from(["horae", "step", "-vv", "-n", "5"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Step(args) = cli.command else {
            panic!("expected step");
        };
        assert_eq!(args.count, Some(5));
        assert_eq!(args.config, PathBuf::from("horae.toml"));
    }

    #[test]
    fn to_time_date_conflicts_with_day() {
        let parsed = Cli::try_parse_from(["horae", "to-time", "-d", "2000-01-01", "--day", "5"]);
        assert!(parsed.is_err());
    }
}
