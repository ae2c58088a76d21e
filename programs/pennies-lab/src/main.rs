//! Pennies Lab - iterated matching pennies experiments
//!
//! Runs single games or parameter sweeps between a matching "player" and a
//! non-matching "hider", and writes the trial tables as CSV for analysis.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "pennies-lab")]
#[command(version, about = "Matching pennies simulations between decision agents", long_about = None)]
struct Cli {
    /// Log each game as it finishes
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game and write its trial table
    Play(commands::play::PlayArgs),

    /// Sweep player bias or hider memory window
    Sweep(commands::sweep::SweepArgs),
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
        .context("initialize logger")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Play(args) => commands::play::execute(args),
        Commands::Sweep(args) => commands::sweep::execute(args),
    }
}
