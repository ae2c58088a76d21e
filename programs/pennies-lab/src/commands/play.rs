//! Single game

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pennies_logic::{describe_strategy, play_game, GameConfig, Strategy};

use super::parse_strategy;
use crate::output;

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// JSON game configuration; the flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of trials
    #[arg(long)]
    pub trials: Option<u32>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Player strategy: random[:bias], wsls, memory[:window]
    #[arg(long, value_parser = parse_strategy)]
    pub player: Option<Strategy>,

    /// Hider strategy: random[:bias], wsls, memory[:window]
    #[arg(long, value_parser = parse_strategy)]
    pub hider: Option<Strategy>,

    /// Write the trial table to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

impl PlayArgs {
    fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("load game config {}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(player) = self.player {
            config.player = player;
        }
        if let Some(hider) = self.hider {
            config.hider = hider;
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args.resolve()?;
    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    log::info!("player: {}", describe_strategy(&config.player));
    log::info!("hider:  {}", describe_strategy(&config.hider));

    let result = play_game(&config)?;

    match &args.output {
        Some(path) => output::write_trials_file(path, &result)?,
        None => output::write_trials(io::stdout().lock(), &result)?,
    }

    log::info!(
        "{} trials, player matched {} ({:.3})",
        result.trial_count,
        result.player_wins,
        result.player_accuracy()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> PlayArgs {
        PlayArgs {
            config: None,
            trials: None,
            seed: None,
            player: None,
            hider: None,
            output: None,
            print_config: false,
        }
    }

    #[test]
    fn test_resolve_defaults() {
        assert_eq!(args().resolve().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_flags_override() {
        let args = PlayArgs {
            trials: Some(10),
            seed: Some(3),
            hider: Some(Strategy::WinStayLoseSwitch),
            ..args()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.trials, 10);
        assert_eq!(config.seed, 3);
        assert_eq!(config.hider, Strategy::WinStayLoseSwitch);
        assert_eq!(config.player, GameConfig::default().player);
    }

    #[test]
    fn test_zero_trials_rejected() {
        let args = PlayArgs { trials: Some(0), ..args() };
        assert!(args.resolve().is_err());
    }
}
