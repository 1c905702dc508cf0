// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Final operation (robot-5)

use super::{StageOutcome, WorkerContext};
use crate::error::StageError;
use crate::params::FinalOperationParams;
use rf_core::{
    CompletionGate, Observer, ProgressCounter, RandomSource, ResourcePool, RunFlag, Stage,
    StageEvent,
};

const STAGE: Stage = Stage::FinalOperation;

/// Shapes the part into its final form once firmware is loaded.
///
/// Every iteration burns fuel from the pool, waiting for the extractor when
/// the pool is short. Completing the stage stops fuel extraction.
pub struct FinalOperator<R, O> {
    ctx: WorkerContext<R, O>,
    params: FinalOperationParams,
    progress: ProgressCounter,
    pool: ResourcePool,
    upstream: CompletionGate,
    run_flag: RunFlag,
}

impl<R: RandomSource, O: Observer> FinalOperator<R, O> {
    pub fn new(
        ctx: WorkerContext<R, O>,
        params: FinalOperationParams,
        progress: ProgressCounter,
        pool: ResourcePool,
        upstream: CompletionGate,
        run_flag: RunFlag,
    ) -> Self {
        Self {
            ctx,
            params,
            progress,
            pool,
            upstream,
            run_flag,
        }
    }

    pub async fn run(self) -> StageOutcome {
        let result = self.operate().await;
        self.ctx.conclude(STAGE, result)
    }

    async fn operate(&self) -> Result<(), StageError> {
        tracing::debug!("waiting for firmware");
        self.ctx.shutdown.guard(self.upstream.wait()).await?;

        while self.progress.get() < self.params.target {
            let needed = self.ctx.draw(&self.params.fuel);
            let available = self.pool.balance();
            if available < i64::from(needed) {
                self.ctx.emit(StageEvent::Starved {
                    robot: self.ctx.robot,
                    stage: STAGE,
                    needed,
                    available,
                });
            }
            let left = self.ctx.shutdown.guard(self.pool.consume(needed)).await?;
            tracing::debug!(needed, left, "fuel consumed");

            let level = self.progress.add_and_get(self.params.increment);
            self.ctx.progress(STAGE, level);
            self.ctx.shutdown.sleep(self.params.delay).await?;
        }

        if self.run_flag.stop() {
            tracing::debug!("fuel extraction stopped");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "final_operation_tests.rs"]
mod tests;
