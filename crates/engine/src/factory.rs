// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline orchestration
//!
//! [`Factory::start`] wires the shared state, spawns the five robots and
//! hands back a [`PipelineHandle`]. Dropping the handle leaves the robots
//! running; awaiting [`PipelineHandle::join`] observes their termination.

use crate::error::PipelineError;
use crate::params::FactoryParams;
use crate::shutdown::ShutdownSignal;
use crate::workers::{
    BasicAssembler, FinalOperator, FirmwareLoader, FuelExtractor, StageOutcome, WorkerContext,
};
use rf_core::{
    CompletionGate, Observer, ProgressCounter, RandomSource, ResourcePool, RobotId, RunFlag,
    Stage, StdRandom, TracingObserver,
};
use std::future::Future;
use tokio::task::JoinHandle;
use tracing::Instrument;

pub const FUEL_EXTRACTOR: RobotId = RobotId(1);
pub const ASSEMBLERS: [RobotId; 2] = [RobotId(2), RobotId(3)];
pub const FIRMWARE_LOADER: RobotId = RobotId(4);
pub const FINAL_OPERATOR: RobotId = RobotId(5);

/// State shared between the robots.
///
/// All members are cheap handles; clones observe the same values.
#[derive(Clone, Debug, Default)]
pub struct PipelineState {
    pub fuel: ResourcePool,
    pub basic_construction: ProgressCounter,
    pub firmware: ProgressCounter,
    pub final_operation: ProgressCounter,
    /// Opens when basic construction reaches its target
    pub basic_construction_done: CompletionGate,
    /// Opens when firmware loading reaches its target
    pub firmware_done: CompletionGate,
    /// Keeps the fuel extractor running
    pub run_flag: RunFlag,
}

/// Builds and launches the pipeline
pub struct Factory<R, O> {
    params: FactoryParams,
    random: R,
    observer: O,
}

impl Default for Factory<StdRandom, TracingObserver> {
    fn default() -> Self {
        Self::new(FactoryParams::default(), StdRandom::from_entropy(), TracingObserver)
    }
}

impl<R: RandomSource, O: Observer> Factory<R, O> {
    pub fn new(params: FactoryParams, random: R, observer: O) -> Self {
        Self {
            params,
            random,
            observer,
        }
    }

    /// Spawn robot-1 through robot-5, in that order, and return immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self) -> PipelineHandle {
        let state = PipelineState::default();
        let shutdown = ShutdownSignal::new();
        let ctx = |robot| {
            WorkerContext::new(
                robot,
                self.random.clone(),
                self.observer.clone(),
                shutdown.clone(),
            )
        };

        let mut workers = Vec::with_capacity(5);

        let extractor = FuelExtractor::new(
            ctx(FUEL_EXTRACTOR),
            self.params.extractor.clone(),
            state.fuel.clone(),
            state.run_flag.clone(),
        );
        workers.push(spawn_robot(FUEL_EXTRACTOR, Stage::FuelExtraction, extractor.run()));

        for robot in ASSEMBLERS {
            let assembler = BasicAssembler::new(
                ctx(robot),
                self.params.assembly.clone(),
                state.basic_construction.clone(),
                state.basic_construction_done.clone(),
            );
            workers.push(spawn_robot(robot, Stage::BasicConstruction, assembler.run()));
        }

        let loader = FirmwareLoader::new(
            ctx(FIRMWARE_LOADER),
            self.params.firmware.clone(),
            state.firmware.clone(),
            state.basic_construction_done.clone(),
            state.firmware_done.clone(),
        );
        workers.push(spawn_robot(FIRMWARE_LOADER, Stage::FirmwareLoading, loader.run()));

        let operator = FinalOperator::new(
            ctx(FINAL_OPERATOR),
            self.params.final_operation.clone(),
            state.final_operation.clone(),
            state.fuel.clone(),
            state.firmware_done.clone(),
            state.run_flag.clone(),
        );
        workers.push(spawn_robot(FINAL_OPERATOR, Stage::FinalOperation, operator.run()));

        tracing::info!(robots = workers.len(), "pipeline started");

        PipelineHandle {
            state,
            shutdown,
            workers,
        }
    }
}

/// Start the pipeline with production parameters, entropy-seeded randomness
/// and tracing output.
///
/// Fire-and-forget: the returned handle may simply be dropped.
pub fn start() -> PipelineHandle {
    Factory::default().start()
}

fn spawn_robot(
    robot: RobotId,
    stage: Stage,
    work: impl Future<Output = StageOutcome> + Send + 'static,
) -> Worker {
    let span = tracing::info_span!("robot", %robot, stage = stage.name());
    Worker {
        robot,
        stage,
        task: tokio::spawn(work.instrument(span)),
    }
}

struct Worker {
    robot: RobotId,
    stage: Stage,
    task: JoinHandle<StageOutcome>,
}

/// Handle to a running pipeline
pub struct PipelineHandle {
    state: PipelineState,
    shutdown: ShutdownSignal,
    workers: Vec<Worker>,
}

impl PipelineHandle {
    /// Shared counters, pool, gates and run flag
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Ask every robot to stop at its current suspension point
    pub fn shutdown(&self) {
        if self.shutdown.trigger() {
            tracing::info!("pipeline shutdown requested");
        }
    }

    /// Signal that can stop the pipeline after the handle is consumed by
    /// [`PipelineHandle::join`]
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// `true` once every robot has left its loop
    pub fn is_finished(&self) -> bool {
        self.workers.iter().all(|w| w.task.is_finished())
    }

    /// Wait for all five robots
    pub async fn join(self) -> Result<PipelineReport, PipelineError> {
        let mut outcomes = Vec::with_capacity(self.workers.len());
        for worker in self.workers {
            let outcome = worker
                .task
                .await
                .map_err(|source| PipelineError::Join {
                    robot: worker.robot,
                    source,
                })?;
            outcomes.push((worker.robot, worker.stage, outcome));
        }

        let report = PipelineReport {
            outcomes,
            fuel_left: self.state.fuel.balance(),
            basic_construction: self.state.basic_construction.get(),
            firmware: self.state.firmware.get(),
            final_operation: self.state.final_operation.get(),
        };
        tracing::info!(completed = report.completed(), fuel_left = report.fuel_left, "pipeline joined");
        Ok(report)
    }
}

/// Final state of a joined pipeline
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineReport {
    /// One entry per robot, in launch order
    pub outcomes: Vec<(RobotId, Stage, StageOutcome)>,
    pub fuel_left: i64,
    pub basic_construction: i64,
    pub firmware: i64,
    pub final_operation: i64,
}

impl PipelineReport {
    /// Every robot finished its stage (none was cancelled)
    pub fn completed(&self) -> bool {
        self.outcomes
            .iter()
            .all(|(_, _, outcome)| *outcome == StageOutcome::Finished)
    }

    pub fn outcome(&self, robot: RobotId) -> Option<StageOutcome> {
        self.outcomes
            .iter()
            .find(|(r, _, _)| *r == robot)
            .map(|(_, _, outcome)| *outcome)
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
