//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG for reproducible game execution.
//! Uses a simple but effective xorshift algorithm and plugs into
//! `rand` through `RngCore`, so strategies only ever see `impl Rng`.

use rand::{RngCore, SeedableRng};

use crate::Role;

/// Replaces an all-zero state, which xorshift would never leave
const NONZERO_STATE: u64 = 0x853c49e6748fea9b;

/// Seeded random number generator
///
/// Deterministic: same seed + index = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 32-byte seed and game index
    pub fn new(seed: &[u8; 32], game_index: u32) -> Self {
        let mut state = 0u64;
        for (i, chunk) in seed.chunks(8).enumerate() {
            let mut bytes = [0u8; 8];
            bytes[..chunk.len()].copy_from_slice(chunk);
            state ^= u64::from_le_bytes(bytes).wrapping_add(i as u64);
        }

        state ^= (game_index as u64).wrapping_mul(0x517cc1b727220a95);

        // Warm up the generator
        let mut rng = Self::from_state(state);
        for _ in 0..8 {
            rng.step();
        }

        rng
    }

    /// Create a new RNG from a numeric seed, as taken on the command line
    pub fn from_u64(seed: u64, game_index: u32) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self::new(&bytes, game_index)
    }

    /// Create the RNG one role draws from during one trial
    ///
    /// Each (trial, role) pair gets its own stream, so the hider's draws
    /// never shift the player's and decision order within a trial is free.
    pub fn for_trial(&self, trial: u32, role: Role) -> Self {
        let slot = ((trial as u64) << 1) | role.index() as u64;
        let mut rng = Self::from_state(self.state ^ slot.wrapping_mul(0x9e3779b97f4a7c15));
        rng.step(); // Mix
        rng
    }

    fn from_state(state: u64) -> Self {
        Self {
            state: if state == 0 { NONZERO_STATE } else { state },
        }
    }

    /// xorshift64*
    fn step(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for SeededRng {
    type Seed = [u8; 32];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(&seed, 0)
    }
}
