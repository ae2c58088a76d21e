//! Game and experiment configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::strategy::{BiasConfig, MemoryConfig, Strategy};

/// Trials per game in the standard experiments
pub const DEFAULT_TRIALS: u32 = 120;

/// Seed used when none is given
pub const DEFAULT_SEED: u64 = 42;

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        operation: format!("read config {}", path.display()),
        source,
    })
}

fn check_trials(trials: u32) -> Result<()> {
    if trials == 0 {
        return Err(Error::invalid("trial count must be positive"));
    }
    Ok(())
}

/// Configuration for a single game
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub trials: u32,
    pub seed: u64,
    pub player: Strategy,
    pub hider: Strategy,
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json_str(&read_config(path)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        check_trials(self.trials)?;
        self.player.validate()?;
        self.hider.validate()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
            player: Strategy::unbiased(),
            hider: Strategy::perfect_memory(),
        }
    }
}

/// Player bias sweep against a fixed hider
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiasSweep {
    /// Player bias toward 0 at each point
    pub values: Vec<f64>,
    pub hider: Strategy,
}

impl Default for BiasSweep {
    fn default() -> Self {
        Self {
            values: vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0],
            hider: Strategy::perfect_memory(),
        }
    }
}

/// Perfect-memory hider window sweep against a fixed player
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowSweep {
    /// Hider memory window at each point, `null` for the whole history
    pub values: Vec<Option<i64>>,
    pub player: Strategy,
}

impl Default for WindowSweep {
    fn default() -> Self {
        Self {
            values: vec![
                Some(1),
                Some(2),
                Some(5),
                Some(10),
                Some(20),
                Some(30),
                Some(40),
                Some(50),
                None,
            ],
            player: Strategy::RandomBias(BiasConfig { bias: 0.7 }),
        }
    }
}

/// Configuration for the parameter sweeps
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub trials: u32,
    pub seed: u64,
    pub bias_sweep: BiasSweep,
    pub window_sweep: WindowSweep,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
            bias_sweep: BiasSweep::default(),
            window_sweep: WindowSweep::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json_str(&read_config(path)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        check_trials(self.trials)?;

        self.bias_sweep.hider.validate()?;
        for bias in &self.bias_sweep.values {
            BiasConfig::new(*bias)?;
        }

        self.window_sweep.player.validate()?;
        for window in &self.window_sweep.values {
            MemoryConfig::new(*window)?;
        }
        Ok(())
    }
}
