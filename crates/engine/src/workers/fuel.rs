// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fuel extraction (robot-1)

use super::{StageOutcome, WorkerContext};
use crate::error::StageError;
use crate::params::ExtractorParams;
use rf_core::{Observer, RandomSource, ResourcePool, RunFlag, Stage};

const STAGE: Stage = Stage::FuelExtraction;

/// Produces fuel into the pool until the run flag stops.
///
/// The flag is only checked at the top of the loop, so one iteration that is
/// already under way still completes after `stop()`.
pub struct FuelExtractor<R, O> {
    ctx: WorkerContext<R, O>,
    params: ExtractorParams,
    pool: ResourcePool,
    run_flag: RunFlag,
}

impl<R: RandomSource, O: Observer> FuelExtractor<R, O> {
    pub fn new(
        ctx: WorkerContext<R, O>,
        params: ExtractorParams,
        pool: ResourcePool,
        run_flag: RunFlag,
    ) -> Self {
        Self {
            ctx,
            params,
            pool,
            run_flag,
        }
    }

    pub async fn run(self) -> StageOutcome {
        let result = self.extract().await;
        self.ctx.conclude(STAGE, result)
    }

    async fn extract(&self) -> Result<(), StageError> {
        while self.run_flag.is_running() {
            let amount = self.ctx.draw(&self.params.production);
            let level = self.pool.produce(amount);
            self.ctx.progress(STAGE, level);
            self.ctx.shutdown.sleep(self.params.delay).await?;
        }
        tracing::debug!("run flag stopped, leaving extraction loop");
        Ok(())
    }
}

#[cfg(test)]
#[path = "fuel_tests.rs"]
mod tests;
