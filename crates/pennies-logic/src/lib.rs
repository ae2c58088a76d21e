//! Game Logic for Pennies Lab
//!
//! Core logic for the iterated matching pennies game between a "player"
//! that wins by matching and a "hider" that wins by not matching.
//! This crate holds:
//! - Decision strategies and the agents that carry their history
//! - The trial-by-trial game loop
//! - Parameter sweeps used by the experiment runner

mod error;
mod random;
mod strategy;
mod agent;
mod game;
mod config;
mod sweep;

use serde::{Deserialize, Serialize};

pub use error::{Error, Result};
pub use random::SeededRng;
pub use strategy::{describe_strategy, BiasConfig, Choice, MemoryConfig, Strategy};
pub use agent::Agent;
pub use game::{play_game, run_game, GameResult, TrialRecord};
pub use config::{BiasSweep, ExperimentConfig, GameConfig, WindowSweep, DEFAULT_SEED, DEFAULT_TRIALS};
pub use sweep::{run_sweep, sweep_values, SweepParameter, SweepPoint, SweepValue};

/// Side of the table an agent plays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Wins when both choices match
    Player,
    /// Wins when the choices differ
    Hider,
}

impl Role {
    pub fn index(self) -> usize {
        match self {
            Role::Player => 0,
            Role::Hider => 1,
        }
    }

    /// Whether this role won a trial with the given choices
    pub fn feedback(self, hider: Choice, player: Choice) -> bool {
        let (player_won, hider_won) = outcome(hider, player);
        match self {
            Role::Player => player_won,
            Role::Hider => hider_won,
        }
    }
}

/// Outcome of one trial
/// Returns (player_won, hider_won)
pub fn outcome(hider: Choice, player: Choice) -> (bool, bool) {
    let matched = hider == player;
    (matched, !matched)
}
