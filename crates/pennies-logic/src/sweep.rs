//! Parameter sweeps
//!
//! Each sweep point is an independent game with its own agents and its own
//! generator (seeded from the experiment seed and the point's position), so
//! points run in parallel and still come back identical on every run.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::config::ExperimentConfig;
use crate::error::Result;
use crate::game::{run_game, GameResult};
use crate::random::SeededRng;
use crate::strategy::{Strategy, describe_strategy};

/// Which parameter a sweep varies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    /// Player bias toward 0
    Bias,
    /// Hider memory window
    Window,
}

impl SweepParameter {
    /// Column name the swept value is stored under
    pub fn column(self) -> &'static str {
        match self {
            SweepParameter::Bias => "bias",
            SweepParameter::Window => "window",
        }
    }
}

/// Value of the swept parameter at one point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SweepValue {
    Bias(f64),
    Window(Option<i64>),
}

impl SweepValue {
    pub fn parameter(&self) -> SweepParameter {
        match self {
            SweepValue::Bias(_) => SweepParameter::Bias,
            SweepValue::Window(_) => SweepParameter::Window,
        }
    }

    /// Text form used in file names and table cells
    pub fn label(&self) -> String {
        match self {
            SweepValue::Bias(bias) => bias.to_string(),
            SweepValue::Window(Some(window)) => window.to_string(),
            SweepValue::Window(None) => "none".to_string(),
        }
    }

    /// (player, hider) strategies for this point
    fn lineup(&self, config: &ExperimentConfig) -> Result<(Strategy, Strategy)> {
        match self {
            SweepValue::Bias(bias) => Ok((Strategy::random(*bias)?, config.bias_sweep.hider)),
            SweepValue::Window(window) => Ok((
                config.window_sweep.player,
                Strategy::perfect_memory_window(*window)?,
            )),
        }
    }
}

/// One finished sweep point
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub value: SweepValue,
    pub result: GameResult,
}

/// Points of a sweep, in configuration order
pub fn sweep_values(config: &ExperimentConfig, parameter: SweepParameter) -> Vec<SweepValue> {
    match parameter {
        SweepParameter::Bias => config.bias_sweep.values.iter().copied().map(SweepValue::Bias).collect(),
        SweepParameter::Window => config
            .window_sweep
            .values
            .iter()
            .copied()
            .map(SweepValue::Window)
            .collect(),
    }
}

fn run_point(config: &ExperimentConfig, value: SweepValue, index: u32) -> Result<SweepPoint> {
    let (player, hider) = value.lineup(config)?;
    log::debug!(
        "{:<8}{:<8} player: {} hider: {}",
        value.parameter().column(),
        value.label(),
        describe_strategy(&player),
        describe_strategy(&hider)
    );

    let mut player = Agent::new(player)?;
    let mut hider = Agent::new(hider)?;
    let rng = SeededRng::from_u64(config.seed, index);
    let result = run_game(&mut player, &mut hider, config.trials, &rng)?;

    Ok(SweepPoint { value, result })
}

/// Run every point of one sweep
///
/// All-or-nothing: an invalid point fails the whole sweep.
pub fn run_sweep(config: &ExperimentConfig, parameter: SweepParameter) -> Result<Vec<SweepPoint>> {
    config.validate()?;
    let values = sweep_values(config, parameter);
    log::info!(
        "{:<8}sweep: {} points x {} trials",
        parameter.column(),
        values.len(),
        config.trials
    );

    values
        .par_iter()
        .enumerate()
        .map(|(index, value)| run_point(config, *value, index as u32))
        .collect()
}
