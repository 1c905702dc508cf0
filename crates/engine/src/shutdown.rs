// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative cancellation of suspended workers

use crate::error::StageError;
use rf_core::CompletionGate;
use std::future::Future;
use std::time::Duration;

/// Pipeline-wide shutdown request.
///
/// Every suspension point of a worker (sleep, gate wait, fuel wait) is raced
/// against this signal, so a shutdown interrupts the worker wherever it is
/// waiting.
#[derive(Clone, Debug, Default)]
pub struct ShutdownSignal {
    requested: CompletionGate,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. Returns `true` for the first request only.
    pub fn trigger(&self) -> bool {
        self.requested.signal()
    }

    pub fn is_triggered(&self) -> bool {
        self.requested.is_signaled()
    }

    /// Run `fut` to completion unless shutdown is requested first.
    ///
    /// `fut` is dropped on shutdown, so it must be cancel-safe.
    pub async fn guard<F: Future>(&self, fut: F) -> Result<F::Output, StageError> {
        tokio::select! {
            biased;
            _ = self.requested.wait() => Err(StageError::Cancelled),
            output = fut => Ok(output),
        }
    }

    /// Sleep for `duration` unless shutdown is requested first
    pub async fn sleep(&self, duration: Duration) -> Result<(), StageError> {
        self.guard(tokio::time::sleep(duration)).await
    }
}
