// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Firmware loading (robot-4)

use super::{StageOutcome, WorkerContext};
use crate::error::StageError;
use crate::params::FirmwareParams;
use rf_core::{
    CompletionGate, GateName, Observer, ProgressCounter, RandomSource, Stage, StageEvent,
};

const STAGE: Stage = Stage::FirmwareLoading;

/// Loads firmware once basic construction is complete.
///
/// Each attempt may fault, in which case it contributes nothing but still
/// costs the full reload delay.
pub struct FirmwareLoader<R, O> {
    ctx: WorkerContext<R, O>,
    params: FirmwareParams,
    progress: ProgressCounter,
    upstream: CompletionGate,
    done: CompletionGate,
}

impl<R: RandomSource, O: Observer> FirmwareLoader<R, O> {
    pub fn new(
        ctx: WorkerContext<R, O>,
        params: FirmwareParams,
        progress: ProgressCounter,
        upstream: CompletionGate,
        done: CompletionGate,
    ) -> Self {
        Self {
            ctx,
            params,
            progress,
            upstream,
            done,
        }
    }

    pub async fn run(self) -> StageOutcome {
        let result = self.load().await;
        self.ctx.conclude(STAGE, result)
    }

    async fn load(&self) -> Result<(), StageError> {
        tracing::debug!("waiting for basic construction");
        self.ctx.shutdown.guard(self.upstream.wait()).await?;

        let target = self.params.target;
        while self.progress.get() < target {
            // Both draws happen every attempt so the random stream stays
            // aligned regardless of faults.
            let increment = self.ctx.draw(&self.params.increment);
            if self.ctx.random.chance(self.params.fault_percent) {
                self.ctx.emit(StageEvent::Fault {
                    robot: self.ctx.robot,
                    stage: STAGE,
                });
            } else {
                let level = self.progress.add_and_get(i64::from(increment));
                self.ctx.progress(STAGE, level);
                if level >= target {
                    self.open_gate(level);
                }
            }
            self.ctx.shutdown.sleep(self.params.delay).await?;
        }
        self.open_gate(self.progress.get());
        Ok(())
    }

    fn open_gate(&self, value: i64) {
        self.ctx
            .open_gate(&self.done, GateName::Firmware, STAGE, value);
    }
}

#[cfg(test)]
#[path = "firmware_tests.rs"]
mod tests;
