// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared progress counter

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Thread-safe integer accumulator shared between workers.
///
/// Clones share the same value. Every mutation is a single atomic step, so
/// concurrent `add_and_get` calls never lose updates and each caller sees the
/// value immediately after its own addition.
#[derive(Clone, Debug, Default)]
pub struct ProgressCounter {
    value: Arc<AtomicI64>,
}

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter starting at `value`
    pub fn with_value(value: i64) -> Self {
        Self {
            value: Arc::new(AtomicI64::new(value)),
        }
    }

    /// Current value
    pub fn get(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Atomically add `delta` (any sign) and return the resulting value
    pub fn add_and_get(&self, delta: i64) -> i64 {
        self.value.fetch_add(delta, Ordering::SeqCst) + delta
    }

    /// Overwrite the value
    pub fn set(&self, value: i64) {
        self.value.store(value, Ordering::SeqCst);
    }

    /// Subtract `amount` only if the current value covers it.
    ///
    /// Check and subtraction happen in one compare-and-swap, so two callers
    /// can never both succeed against the same balance. Returns the value
    /// left after the subtraction, or `None` if the value was too low.
    pub fn try_take(&self, amount: i64) -> Option<i64> {
        self.value
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                (current >= amount).then_some(current - amount)
            })
            .ok()
            .map(|previous| previous - amount)
    }
}

#[cfg(test)]
#[path = "counter_tests.rs"]
mod tests;
