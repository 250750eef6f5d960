mod analysis;
mod animal;
mod capability;
mod config;
mod ecosystem;
mod engine;
mod event;
mod microbe;
mod organism;
mod plant;
mod population;
mod report;
mod stats;
mod stop;
mod utils;

use crate::config::Config;
use crate::engine::Engine;
use crate::stop::StopSignal;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{
    io::{self, Write},
    path::PathBuf,
};

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// TOML configuration file; the built-in ecosystem is used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run tick by tick, printing the status, until Enter is pressed.
    Run {
        #[arg(long)]
        max_ticks: Option<usize>,
    },

    /// Run a fixed number of ticks without delay and print a JSON summary.
    Batch {
        #[arg(long)]
        n_ticks: usize,
    },

    /// Validate the configuration and print the seeded ecosystem.
    Check,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let cfg = match &args.config {
        Some(file) => Config::from_file(file).context("failed to load config")?,
        None => Config::default(),
    };
    log::debug!("{cfg:#?}");

    let mut engine =
        Engine::generate_initial_condition(cfg).context("failed to generate initial condition")?;
    let mut out = io::stdout().lock();

    match args.command {
        Command::Run { max_ticks } => {
            let stop = StopSignal::listen_for_enter()?;
            engine
                .run_interactive(&mut out, &stop, max_ticks)
                .context("failed to run simulation")?;
        }
        Command::Batch { n_ticks } => {
            let report = engine.run_batch(n_ticks);
            serde_json::to_writer_pretty(&mut out, &report).context("failed to write report")?;
            writeln!(out)?;
        }
        Command::Check => {
            writeln!(out, "{}", engine.status())?;
        }
    }

    Ok(())
}
