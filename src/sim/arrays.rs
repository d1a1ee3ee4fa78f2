//! Array pair generation
//!
//! Both sides of a race start from the same shuffle, drawn from a seeded RNG.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{VALUE_BASE, VALUE_STEP};
use crate::settings::ArraySize;

/// RNG state wrapper for serialization
///
/// Every round draws from its own stream so a restart gives a fresh shuffle
/// while the whole session replays from `seed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// RNG for the next round, advancing the stream
    pub fn next_round(&mut self) -> Pcg32 {
        let rng = self.to_rng();
        self.stream = self.stream.wrapping_add(1);
        rng
    }
}

/// Distinct values `10, 15, 20, ...` so bar order is unambiguous
pub fn value_set(n: usize) -> Vec<u32> {
    (0..n as u32).map(|i| VALUE_BASE + i * VALUE_STEP).collect()
}

/// A shuffled value set of length `n`
pub fn shuffled_values(n: usize, rng: &mut Pcg32) -> Vec<u32> {
    let mut values = value_set(n);
    values.shuffle(rng);
    values
}

/// The two starting arrays of a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayPair {
    pub player: Vec<u32>,
    pub algorithm: Vec<u32>,
}

impl ArrayPair {
    /// Generate an identical shuffle for both sides
    pub fn generate(size: ArraySize, rng: &mut Pcg32) -> Self {
        Self::from_values(shuffled_values(size.len(), rng))
    }

    /// Use a given arrangement for both sides
    pub fn from_values(values: Vec<u32>) -> Self {
        Self {
            player: values.clone(),
            algorithm: values,
        }
    }
}
