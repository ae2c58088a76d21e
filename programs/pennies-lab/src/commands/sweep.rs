//! Parameter sweeps

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use pennies_logic::{run_sweep, ExperimentConfig, SweepParameter, SweepPoint};

use crate::output;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SweepKind {
    /// Player bias against a perfect-memory hider
    Bias,
    /// Hider memory window against a biased player
    Window,
    /// Both sweeps
    All,
}

impl SweepKind {
    fn parameters(self) -> Vec<SweepParameter> {
        match self {
            SweepKind::Bias => vec![SweepParameter::Bias],
            SweepKind::Window => vec![SweepParameter::Window],
            SweepKind::All => vec![SweepParameter::Bias, SweepParameter::Window],
        }
    }
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Which sweep to run
    #[arg(value_enum)]
    pub kind: SweepKind,

    /// JSON experiment configuration; the flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Trials per game
    #[arg(long)]
    pub trials: Option<u32>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory the CSV tables are written to
    #[arg(long, default_value = "data")]
    pub out_dir: PathBuf,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

impl SweepArgs {
    fn resolve(&self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::load(path)
                .with_context(|| format!("load experiment config {}", path.display()))?,
            None => ExperimentConfig::default(),
        };
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn print_summary(parameter: SweepParameter, points: &[SweepPoint]) {
    println!("{:<10}{:>12}{:>12}", parameter.column(), "matched", "accuracy");
    for point in points {
        println!(
            "{:<10}{:>12}{:>12.3}",
            point.value.label(),
            point.result.player_wins,
            point.result.player_accuracy()
        );
    }
}

pub fn execute(args: SweepArgs) -> Result<()> {
    let config = args.resolve()?;
    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    for parameter in args.kind.parameters() {
        let points = run_sweep(&config, parameter)?;
        let written = output::write_sweep_files(&args.out_dir, parameter, &points)?;
        log::info!(
            "{:<8}wrote {} tables to {}",
            parameter.column(),
            written.len(),
            args.out_dir.display()
        );
        print_summary(parameter, &points);
    }
    Ok(())
}
