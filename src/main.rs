//! `horae`: convert, step and store model-clock calendars from the command line.

mod cli;
mod config;
mod convert;
mod logging;
mod step_cmd;
mod store_cmd;
mod time_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::ToTime(args) => time_cmd::run_to_time(args),
        Command::ToDate(args) => time_cmd::run_to_date(args),
        Command::Step(args) => step_cmd::run(args),
        Command::Export(args) => store_cmd::run_export(args),
        Command::Inspect(args) => store_cmd::run_inspect(args),
    }
}
