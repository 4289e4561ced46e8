mod cli;
mod commands;
mod config;
mod convert;
mod logging;
mod pipeline;
mod report;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::pipeline::Session;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Guide => {
            print!("{}", report::GUIDE);
            Ok(())
        }
        Command::Trajectories => commands::trajectories(&Session::open(cli)?),
        Command::Initial => commands::initial(&Session::open(cli)?),
        Command::Matrix => commands::matrix(&Session::open(cli)?),
        Command::Day(args) => commands::day(&Session::open(cli)?, args),
        Command::Counts => commands::counts(&Session::open(cli)?),
        Command::Stationary(args) => commands::stationary(&Session::open(cli)?, args),
        Command::Report(args) => commands::full_report(&Session::open(cli)?, args),
    }
}
