//! Agents: a strategy plus the history it has accumulated

use rand::Rng;

use crate::error::{Error, Result};
use crate::strategy::{Choice, Strategy};

/// A decision maker in the game
///
/// History and feedback only grow, one entry each per trial, through
/// [`Agent::record`]. Memory windows are applied when reading, never here.
#[derive(Clone, Debug)]
pub struct Agent {
    strategy: Strategy,
    history: Vec<Choice>,
    feedback: Vec<bool>,
}

impl Agent {
    /// Create an agent with empty history, rejecting invalid parameters
    pub fn new(strategy: Strategy) -> Result<Self> {
        strategy.validate()?;
        Ok(Self {
            strategy,
            history: Vec::new(),
            feedback: Vec::new(),
        })
    }

    /// Choose for the current trial. Does not touch history.
    pub fn decide<R: Rng>(&self, rng: &mut R) -> Choice {
        if self.uses_history() {
            self.strategy.decide(&self.history, &self.feedback, rng)
        } else {
            self.strategy.decide(&[], &[], rng)
        }
    }

    /// Append this trial's choice and whether it won
    pub fn record(&mut self, choice: Choice, feedback: bool) {
        self.history.push(choice);
        self.feedback.push(feedback);
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn uses_history(&self) -> bool {
        self.strategy.uses_history()
    }

    pub fn history(&self) -> &[Choice] {
        &self.history
    }

    pub fn feedback(&self) -> &[bool] {
        &self.feedback
    }

    pub fn trials_recorded(&self) -> usize {
        self.history.len()
    }

    /// Confirm history and feedback are the same length
    pub fn check_invariant(&self) -> Result<()> {
        if self.history.len() == self.feedback.len() {
            Ok(())
        } else {
            Err(Error::StateInvariantViolation {
                history: self.history.len(),
                feedback: self.feedback.len(),
            })
        }
    }
}
