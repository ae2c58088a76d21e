//! Game execution engine

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::random::SeededRng;
use crate::strategy::Choice;
use crate::{outcome, Role};

/// Result of a single trial
///
/// `feedback` is the player's: true when the two choices matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial: u32,
    pub hider: Choice,
    pub player: Choice,
    pub feedback: bool,
}

impl TrialRecord {
    /// Whether the given role won this trial
    pub fn won(&self, role: Role) -> bool {
        role.feedback(self.hider, self.player)
    }

    pub fn choice(&self, role: Role) -> Choice {
        match role {
            Role::Player => self.player,
            Role::Hider => self.hider,
        }
    }
}

/// Result of a complete game
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub trials: Vec<TrialRecord>,
    pub player_wins: u32,
    pub hider_wins: u32,
    pub trial_count: u32,
}

impl GameResult {
    /// Final fraction of trials the player matched
    pub fn player_accuracy(&self) -> f64 {
        if self.trial_count == 0 {
            return 0.0;
        }
        self.player_wins as f64 / self.trial_count as f64
    }

    /// Running fraction of trials the player has matched so far,
    /// one value per trial
    pub fn proportion_correct(&self) -> Vec<f64> {
        running_mean(self.trials.iter().map(|t| t.feedback))
    }

    /// Running fraction of `One` choices made by `role`, one value per trial
    pub fn choice_rate(&self, role: Role) -> Vec<f64> {
        running_mean(self.trials.iter().map(|t| t.choice(role) == Choice::One))
    }
}

fn running_mean(hits: impl Iterator<Item = bool>) -> Vec<f64> {
    let mut count = 0u32;
    hits.enumerate()
        .map(|(i, hit)| {
            count += hit as u32;
            count as f64 / (i + 1) as f64
        })
        .collect()
}

/// Run a complete game between a player and a hider
///
/// # Arguments
/// * `player` - Agent that wins by matching
/// * `hider` - Agent that wins by not matching
/// * `trials` - Number of trials to play, at least one
/// * `rng` - Base generator for this game; each trial and role draws
///   from its own stream derived from it
///
/// # Returns
/// Every trial in order, numbered from 1. On error nothing is returned,
/// even if some trials had already been played.
pub fn run_game(
    player: &mut Agent,
    hider: &mut Agent,
    trials: u32,
    rng: &SeededRng,
) -> Result<GameResult> {
    if trials == 0 {
        return Err(Error::invalid("trial count must be positive"));
    }
    player.check_invariant()?;
    hider.check_invariant()?;

    let mut records: Vec<TrialRecord> = Vec::with_capacity(trials as usize);
    let mut player_wins = 0u32;
    let mut hider_wins = 0u32;

    for trial in 1..=trials {
        let mut rng_hider = rng.for_trial(trial, Role::Hider);
        let mut rng_player = rng.for_trial(trial, Role::Player);

        // Neither agent sees the other's choice for this trial
        let hider_choice = hider.decide(&mut rng_hider);
        let player_choice = player.decide(&mut rng_player);

        let (player_won, hider_won) = outcome(hider_choice, player_choice);
        player_wins += player_won as u32;
        hider_wins += hider_won as u32;

        player.record(player_choice, player_won);
        hider.record(hider_choice, hider_won);
        player.check_invariant()?;
        hider.check_invariant()?;

        records.push(TrialRecord {
            trial,
            hider: hider_choice,
            player: player_choice,
            feedback: player_won,
        });
    }

    log::debug!(
        "game finished: {} trials, player matched {} ({:.3})",
        trials,
        player_wins,
        player_wins as f64 / trials as f64
    );

    Ok(GameResult {
        trials: records,
        player_wins,
        hider_wins,
        trial_count: trials,
    })
}

/// Build both agents from a configuration and play one game
pub fn play_game(config: &GameConfig) -> Result<GameResult> {
    config.validate()?;
    let mut player = Agent::new(config.player)?;
    let mut hider = Agent::new(config.hider)?;
    let rng = SeededRng::from_u64(config.seed, 0);
    run_game(&mut player, &mut hider, config.trials, &rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;
    use proptest::prelude::*;

    fn agents(player: Strategy, hider: Strategy) -> (Agent, Agent) {
        (Agent::new(player).unwrap(), Agent::new(hider).unwrap())
    }

    fn strategy_for(kind: u8, bias: f64, window: Option<i64>) -> Strategy {
        match kind % 3 {
            0 => Strategy::random(bias).unwrap(),
            1 => Strategy::WinStayLoseSwitch,
            _ => Strategy::perfect_memory_window(window).unwrap(),
        }
    }

    #[test]
    fn test_game_length_and_indices() {
        let (mut player, mut hider) = agents(Strategy::random(0.5).unwrap(), Strategy::perfect_memory());
        let rng = SeededRng::from_u64(42, 0);

        let result = run_game(&mut player, &mut hider, 120, &rng).unwrap();

        assert_eq!(result.trials.len(), 120);
        assert_eq!(result.trial_count, 120);
        for (i, record) in result.trials.iter().enumerate() {
            assert_eq!(record.trial, i as u32 + 1);
            assert_eq!(record.feedback, record.hider == record.player);
        }
        assert_eq!(player.trials_recorded(), 120);
        assert_eq!(hider.trials_recorded(), 120);
    }

    #[test]
    fn test_feedback_asymmetry() {
        let (mut player, mut hider) = agents(Strategy::WinStayLoseSwitch, Strategy::perfect_memory());
        let rng = SeededRng::from_u64(7, 0);

        let result = run_game(&mut player, &mut hider, 50, &rng).unwrap();

        for (i, record) in result.trials.iter().enumerate() {
            assert_eq!(player.history()[i], record.player);
            assert_eq!(hider.history()[i], record.hider);
            assert_eq!(player.feedback()[i], record.feedback);
            assert_eq!(hider.feedback()[i], !record.feedback);
        }
        assert_eq!(result.player_wins + result.hider_wins, 50);
    }

    #[test]
    fn test_zero_trials_rejected() {
        let (mut player, mut hider) = agents(Strategy::unbiased(), Strategy::unbiased());
        let rng = SeededRng::from_u64(1, 0);

        let err = run_game(&mut player, &mut hider, 0, &rng).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
        assert_eq!(player.trials_recorded(), 0);
    }

    #[test]
    fn test_deterministic_game_is_reproducible() {
        let run = || {
            let (mut player, mut hider) =
                agents(Strategy::WinStayLoseSwitch, Strategy::perfect_memory_window(Some(5)).unwrap());
            run_game(&mut player, &mut hider, 120, &SeededRng::from_u64(99, 3)).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_different_seeds_differ() {
        let play = |seed| {
            let (mut player, mut hider) = agents(Strategy::unbiased(), Strategy::unbiased());
            run_game(&mut player, &mut hider, 60, &SeededRng::from_u64(seed, 0)).unwrap()
        };
        assert_ne!(play(1).trials, play(2).trials);
    }

    #[test]
    fn test_always_zero_vs_always_one() {
        let (mut player, mut hider) = agents(Strategy::random(1.0).unwrap(), Strategy::random(0.0).unwrap());
        let result = run_game(&mut player, &mut hider, 30, &SeededRng::from_u64(5, 0)).unwrap();

        for record in &result.trials {
            assert_eq!(record.player, Choice::Zero);
            assert_eq!(record.hider, Choice::One);
            assert!(!record.feedback);
            assert!(record.won(Role::Hider));
        }
        assert_eq!(result.player_wins, 0);
        assert_eq!(result.hider_wins, 30);
        assert_eq!(result.player_accuracy(), 0.0);
    }

    #[test]
    fn test_memory_hider_beats_fixed_player() {
        // Once the hider has seen the player commit to 0, it keeps away from it
        let (mut player, mut hider) = agents(Strategy::random(1.0).unwrap(), Strategy::perfect_memory());
        let result = run_game(&mut player, &mut hider, 120, &SeededRng::from_u64(42, 0)).unwrap();
        assert!(result.player_accuracy() < 0.1, "accuracy {}", result.player_accuracy());
    }

    #[test]
    fn test_wsls_hider_vs_fixed_player_settles() {
        // After the first loss the hider switches to 1 and then keeps winning
        let (mut player, mut hider) = agents(Strategy::random(1.0).unwrap(), Strategy::WinStayLoseSwitch);
        let result = run_game(&mut player, &mut hider, 40, &SeededRng::from_u64(11, 0)).unwrap();
        for record in result.trials.iter().skip(1) {
            assert_eq!(record.hider, Choice::One);
        }
    }

    #[test]
    fn test_agents_carry_prior_history() {
        let (mut player, mut hider) = agents(Strategy::WinStayLoseSwitch, Strategy::WinStayLoseSwitch);
        let rng = SeededRng::from_u64(8, 0);
        run_game(&mut player, &mut hider, 10, &rng).unwrap();
        let second = run_game(&mut player, &mut hider, 5, &rng).unwrap();

        assert_eq!(second.trials.len(), 5);
        assert_eq!(second.trials[0].trial, 1);
        assert_eq!(player.trials_recorded(), 15);
        assert_eq!(hider.trials_recorded(), 15);
    }

    #[test]
    fn test_proportion_correct() {
        let result = GameResult {
            trials: vec![
                TrialRecord { trial: 1, hider: Choice::Zero, player: Choice::Zero, feedback: true },
                TrialRecord { trial: 2, hider: Choice::Zero, player: Choice::One, feedback: false },
                TrialRecord { trial: 3, hider: Choice::One, player: Choice::One, feedback: true },
                TrialRecord { trial: 4, hider: Choice::One, player: Choice::Zero, feedback: false },
            ],
            player_wins: 2,
            hider_wins: 2,
            trial_count: 4,
        };

        assert_eq!(result.proportion_correct(), vec![1.0, 0.5, 2.0 / 3.0, 0.5]);
        assert_eq!(result.choice_rate(Role::Player), vec![0.0, 0.5, 2.0 / 3.0, 0.5]);
        assert_eq!(result.choice_rate(Role::Hider), vec![0.0, 0.0, 1.0 / 3.0, 0.5]);
        assert_eq!(result.player_accuracy(), 0.5);
    }

    #[test]
    fn test_play_game_from_config() {
        let config = GameConfig {
            trials: 25,
            seed: 4,
            player: Strategy::random(0.7).unwrap(),
            hider: Strategy::perfect_memory_window(Some(10)).unwrap(),
        };
        let a = play_game(&config).unwrap();
        let b = play_game(&config).unwrap();
        assert_eq!(a.trials.len(), 25);
        assert_eq!(a, b);
    }

    #[test]
    fn test_play_game_rejects_bad_config() {
        let config = GameConfig {
            trials: 25,
            seed: 4,
            player: Strategy::RandomBias(crate::BiasConfig { bias: -0.5 }),
            hider: Strategy::perfect_memory(),
        };
        assert!(matches!(
            play_game(&config),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_trial_record_csv_shape() {
        let record = TrialRecord { trial: 3, hider: Choice::One, player: Choice::Zero, feedback: false };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"trial":3,"hider":1,"player":0,"feedback":false}"#);
    }

    proptest! {
        #[test]
        fn prop_every_trial_recorded(
            seed in any::<u64>(),
            trials in 1u32..150,
            player_kind in 0u8..3,
            hider_kind in 0u8..3,
            bias in 0.0f64..=1.0,
            window in proptest::option::of(0i64..40),
        ) {
            let (mut player, mut hider) = agents(
                strategy_for(player_kind, bias, window),
                strategy_for(hider_kind, bias, window),
            );
            let result = run_game(&mut player, &mut hider, trials, &SeededRng::from_u64(seed, 0)).unwrap();

            prop_assert_eq!(result.trials.len(), trials as usize);
            prop_assert_eq!(player.history().len(), trials as usize);
            prop_assert_eq!(player.feedback().len(), trials as usize);
            prop_assert_eq!(hider.history().len(), trials as usize);
            prop_assert_eq!(hider.feedback().len(), trials as usize);
            prop_assert_eq!(result.player_wins + result.hider_wins, trials);

            for (i, record) in result.trials.iter().enumerate() {
                prop_assert_eq!(record.trial, i as u32 + 1);
                prop_assert_eq!(record.feedback, record.hider == record.player);
                prop_assert_eq!(hider.feedback()[i], !record.feedback);
            }
        }

        #[test]
        fn prop_same_seed_same_game(seed in any::<u64>(), game_index in any::<u32>()) {
            let play = || {
                let (mut player, mut hider) = agents(Strategy::random(0.7).unwrap(), Strategy::perfect_memory());
                run_game(&mut player, &mut hider, 40, &SeededRng::from_u64(seed, game_index)).unwrap()
            };
            prop_assert_eq!(play(), play());
        }
    }
}
