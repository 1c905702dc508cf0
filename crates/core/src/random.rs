// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Random source abstraction for testable stage behaviour

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Produces uniformly distributed draws
pub trait RandomSource: Clone + Send + Sync + 'static {
    /// Uniform draw from `low..=high`
    fn between(&self, low: u32, high: u32) -> u32;

    /// `true` with the given probability in percent
    fn chance(&self, percent: u32) -> bool {
        self.between(1, 100) <= percent
    }
}

/// Real random source backed by `StdRng`
#[derive(Clone)]
pub struct StdRandom {
    rng: Arc<Mutex<StdRng>>,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible source for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn between(&self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(low..=high)
    }
}

/// Scripted random source for testing
///
/// Replays values in order. Each value is clamped into the requested range;
/// once the script runs out every draw returns the low bound.
#[derive(Clone, Default)]
pub struct ScriptedRandom {
    values: Arc<Mutex<VecDeque<u32>>>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: Arc::new(Mutex::new(values.into_iter().collect())),
        }
    }

    /// Append more values to the script
    pub fn push(&self, values: impl IntoIterator<Item = u32>) {
        let mut queue = self.values.lock().unwrap_or_else(|e| e.into_inner());
        queue.extend(values);
    }

    /// Values not yet drawn
    pub fn remaining(&self) -> usize {
        self.values.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl RandomSource for ScriptedRandom {
    fn between(&self, low: u32, high: u32) -> u32 {
        let next = self
            .values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        next.map_or(low, |value| value.clamp(low, high.max(low)))
    }
}

#[cfg(test)]
#[path = "random_tests.rs"]
mod tests;
