// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fuel pool with blocking consumption
//!
//! One side produces fuel in bursts, the other side waits until enough has
//! accumulated for a single request. Waiters are woken on every production and
//! re-check the balance before taking anything.

use crate::counter::ProgressCounter;
use std::sync::Arc;
use tokio::sync::Notify;

/// Shared store of fungible fuel units.
///
/// The balance is produced minus consumed at every instant and is never
/// observed negative.
#[derive(Clone, Debug, Default)]
pub struct ResourcePool {
    balance: ProgressCounter,
    produced: Arc<Notify>,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool pre-filled with `balance` units
    pub fn with_balance(balance: u32) -> Self {
        Self {
            balance: ProgressCounter::with_value(i64::from(balance)),
            produced: Arc::new(Notify::new()),
        }
    }

    /// Current balance
    pub fn balance(&self) -> i64 {
        self.balance.get()
    }

    /// Add `amount` units and wake every waiting consumer.
    ///
    /// Returns the balance right after this production.
    pub fn produce(&self, amount: u32) -> i64 {
        let level = self.balance.add_and_get(i64::from(amount));
        self.produced.notify_waiters();
        level
    }

    /// Take `amount` units if the balance covers it, without waiting
    pub fn try_consume(&self, amount: u32) -> Option<i64> {
        self.balance.try_take(i64::from(amount))
    }

    /// Wait until the balance covers `amount`, then take it.
    ///
    /// Returns the balance left after this consumption. Cancel-safe: the
    /// subtraction is the last step and happens without an intervening await,
    /// so dropping the future never takes fuel.
    pub async fn consume(&self, amount: u32) -> i64 {
        loop {
            // Register before checking so a production between the check and
            // the await still wakes us.
            let produced = self.produced.notified();
            if let Some(left) = self.try_consume(amount) {
                return left;
            }
            tracing::trace!(amount, balance = self.balance(), "waiting for fuel");
            produced.await;
        }
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
