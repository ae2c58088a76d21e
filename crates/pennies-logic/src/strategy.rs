//! Strategy definitions and execution

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A pick in the matching pennies game
///
/// Serialized as the integer 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Choice {
    Zero,
    One,
}

impl Choice {
    /// The other choice
    pub fn flip(self) -> Self {
        match self {
            Choice::Zero => Choice::One,
            Choice::One => Choice::Zero,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Choice::Zero => 0,
            Choice::One => 1,
        }
    }
}

impl From<Choice> for u8 {
    fn from(choice: Choice) -> u8 {
        choice.index() as u8
    }
}

impl TryFrom<u8> for Choice {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Choice::Zero),
            1 => Ok(Choice::One),
            other => Err(Error::invalid(format!("choice must be 0 or 1, got {}", other))),
        }
    }
}

/// Parameters for the memoryless random strategy
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiasConfig {
    /// Probability of choosing `Zero` (0.0-1.0)
    pub bias: f64,
}

impl BiasConfig {
    pub fn new(bias: f64) -> Result<Self> {
        let config = Self { bias };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if (0.0..=1.0).contains(&self.bias) {
            Ok(())
        } else {
            Err(Error::invalid(format!("bias {} is outside [0, 1]", self.bias)))
        }
    }
}

impl Default for BiasConfig {
    fn default() -> Self {
        Self { bias: 0.5 }
    }
}

/// Parameters for the perfect-memory strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Most recent trials to consider. `None` and `Some(0)` both mean the
    /// whole history.
    #[serde(default)]
    pub memory_window: Option<i64>,
}

impl MemoryConfig {
    pub fn new(memory_window: Option<i64>) -> Result<Self> {
        let config = Self { memory_window };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.memory_window {
            Some(window) if window < 0 => Err(Error::invalid(format!(
                "memory window {} is negative",
                window
            ))),
            _ => Ok(()),
        }
    }

    /// Number of most recent entries to read out of a history of `len`
    pub fn effective_window(&self, len: usize) -> usize {
        match self.memory_window {
            Some(window) if window > 0 && (window as u64) < len as u64 => window as usize,
            _ => len,
        }
    }
}

/// Decision strategy an agent is built around
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Zero with probability `bias`, One otherwise. Ignores history.
    RandomBias(BiasConfig),
    /// Repeat the last choice after a win, switch after a loss.
    WinStayLoseSwitch,
    /// Pick the choice whose (windowed) feedback score is higher.
    PerfectMemory(MemoryConfig),
}

impl Strategy {
    /// Random choice with the given bias toward `Zero`
    pub fn random(bias: f64) -> Result<Self> {
        Ok(Strategy::RandomBias(BiasConfig::new(bias)?))
    }

    /// Fair coin
    pub fn unbiased() -> Self {
        Strategy::RandomBias(BiasConfig::default())
    }

    /// Perfect memory over the whole history
    pub fn perfect_memory() -> Self {
        Strategy::PerfectMemory(MemoryConfig::default())
    }

    /// Perfect memory restricted to the last `memory_window` trials
    pub fn perfect_memory_window(memory_window: Option<i64>) -> Result<Self> {
        Ok(Strategy::PerfectMemory(MemoryConfig::new(memory_window)?))
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Strategy::RandomBias(config) => config.validate(),
            Strategy::WinStayLoseSwitch => Ok(()),
            Strategy::PerfectMemory(config) => config.validate(),
        }
    }

    /// Whether the strategy reads the agent's history and feedback
    pub fn uses_history(&self) -> bool {
        !matches!(self, Strategy::RandomBias(_))
    }

    /// Choose for the next trial
    ///
    /// # Arguments
    /// * `history` - Our past choices
    /// * `feedback` - Whether each past choice won, parallel to `history`
    /// * `rng` - Random source for this decision
    pub fn decide<R: Rng>(&self, history: &[Choice], feedback: &[bool], rng: &mut R) -> Choice {
        match self {
            Strategy::RandomBias(config) => random_decision(config.bias, rng),
            Strategy::WinStayLoseSwitch => win_stay_lose_switch(history, feedback, rng),
            Strategy::PerfectMemory(config) => perfect_memory(history, feedback, config, rng),
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::unbiased()
    }
}

/// Random: `Zero` with probability `bias`
fn random_decision<R: Rng>(bias: f64, rng: &mut R) -> Choice {
    if rng.random::<f64>() < bias {
        Choice::Zero
    } else {
        Choice::One
    }
}

/// Win-stay, lose-switch
fn win_stay_lose_switch<R: Rng>(history: &[Choice], feedback: &[bool], rng: &mut R) -> Choice {
    match (history.last(), feedback.last()) {
        (Some(last), Some(true)) => *last,
        (Some(last), Some(false)) => last.flip(),
        _ => random_decision(0.5, rng),
    }
}

/// Perfect memory: score each choice +1 per win and -1 per loss over the
/// window and go with the higher score. Ties are a fair coin.
fn perfect_memory<R: Rng>(
    history: &[Choice],
    feedback: &[bool],
    config: &MemoryConfig,
    rng: &mut R,
) -> Choice {
    if history.is_empty() {
        return random_decision(0.5, rng);
    }

    let window = config.effective_window(history.len());
    let mut score = [0i64; 2];
    for (choice, won) in history.iter().rev().zip(feedback.iter().rev()).take(window) {
        score[choice.index()] += if *won { 1 } else { -1 };
    }

    match score[0].cmp(&score[1]) {
        Ordering::Equal => random_decision(0.5, rng),
        Ordering::Less => Choice::One,
        Ordering::Greater => Choice::Zero,
    }
}

/// Get a human-readable description of a strategy
pub fn describe_strategy(strategy: &Strategy) -> String {
    match strategy {
        Strategy::RandomBias(config) => format!(
            "Random choice, {:.0}% chance of 0.",
            config.bias * 100.0
        ),
        Strategy::WinStayLoseSwitch => {
            "Repeats last choice after a win, switches after a loss.".to_string()
        }
        Strategy::PerfectMemory(config) => {
            let base = "Picks the choice with the better win/loss score";
            match config.memory_window {
                Some(window) if window > 0 => format!("{} over the last {} trials.", base, window),
                _ => format!("{} over the whole game.", base),
            }
        }
    }
}
