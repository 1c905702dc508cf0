// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Basic construction assembly (robot-2 and robot-3)

use super::{StageOutcome, WorkerContext};
use crate::error::StageError;
use crate::params::AssemblyParams;
use rf_core::{CompletionGate, GateName, Observer, ProgressCounter, RandomSource, Stage};

const STAGE: Stage = Stage::BasicConstruction;

/// One of the two assemblers sharing the basic construction counter.
///
/// Both instances add to the same counter. The one whose increment crosses
/// the target opens the gate; overshoot past the target is expected because
/// the other instance may already be past its loop check.
pub struct BasicAssembler<R, O> {
    ctx: WorkerContext<R, O>,
    params: AssemblyParams,
    progress: ProgressCounter,
    done: CompletionGate,
}

impl<R: RandomSource, O: Observer> BasicAssembler<R, O> {
    pub fn new(
        ctx: WorkerContext<R, O>,
        params: AssemblyParams,
        progress: ProgressCounter,
        done: CompletionGate,
    ) -> Self {
        Self {
            ctx,
            params,
            progress,
            done,
        }
    }

    pub async fn run(self) -> StageOutcome {
        let result = self.assemble().await;
        self.ctx.conclude(STAGE, result)
    }

    async fn assemble(&self) -> Result<(), StageError> {
        let target = self.params.target;
        while self.progress.get() < target {
            let increment = self.ctx.draw(&self.params.increment);
            let level = self.progress.add_and_get(i64::from(increment));
            self.ctx.progress(STAGE, level);
            if level >= target {
                self.open_gate(level);
            }
            self.ctx.shutdown.sleep(self.params.delay).await?;
        }
        // The other assembler may have crossed the target
        self.open_gate(self.progress.get());
        Ok(())
    }

    fn open_gate(&self, value: i64) {
        self.ctx
            .open_gate(&self.done, GateName::BasicConstruction, STAGE, value);
    }
}

#[cfg(test)]
#[path = "assembly_tests.rs"]
mod tests;
