use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;

/// Uniform draw source. The run owns one behind a box so tests can swap the
/// seeded generator for a scripted sequence.
pub trait RandomSource: std::fmt::Debug {
    /// Uniform draw in [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Uniform draw in [0, bound); returns 0 when bound is 0.
    fn pick(&mut self, bound: u64) -> u64;

    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for RngState {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn pick(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }
}

/// Replays a fixed queue of unit-interval draws, then falls back to 0.0.
/// `pick` maps the next draw onto the requested range, so a queued value of
/// `k as f64 / bound as f64` forces outcome `k`.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    draws: VecDeque<f64>,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    pub fn push(&mut self, draw: f64) {
        self.draws.push_back(draw);
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(0.0)
    }

    fn pick(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        let scaled = (self.next_f64() * bound as f64) as u64;
        scaled.min(bound - 1)
    }
}
