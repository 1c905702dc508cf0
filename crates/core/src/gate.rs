// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot completion gate

use std::sync::Arc;
use tokio::sync::watch;

/// Completion signal that many tasks can wait on.
///
/// The gate moves from pending to signalled exactly once. Waiters that arrive
/// after the signal pass straight through, so it does not matter whether
/// `signal` or `wait` runs first.
#[derive(Clone, Debug)]
pub struct CompletionGate {
    state: Arc<watch::Sender<bool>>,
}

impl CompletionGate {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    /// Open the gate and release every waiter.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn signal(&self) -> bool {
        self.state.send_if_modified(|open| {
            if *open {
                false
            } else {
                *open = true;
                true
            }
        })
    }

    pub fn is_signaled(&self) -> bool {
        *self.state.borrow()
    }

    /// Wait until the gate has been signalled
    pub async fn wait(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives inside `self`, so the channel cannot close while
        // we are waiting on it.
        let _ = rx.wait_for(|open| *open).await;
    }
}

impl Default for CompletionGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
