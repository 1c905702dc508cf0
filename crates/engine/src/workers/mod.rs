// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker routines, one per pipeline stage

mod assembly;
mod final_operation;
mod firmware;
mod fuel;

pub use assembly::BasicAssembler;
pub use final_operation::FinalOperator;
pub use firmware::FirmwareLoader;
pub use fuel::FuelExtractor;

use crate::error::StageError;
use crate::shutdown::ShutdownSignal;
use rf_core::{
    CompletionGate, GateName, Observer, RandomSource, RobotId, Stage, StageEvent,
};
use std::ops::RangeInclusive;

/// How a worker left its loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageOutcome {
    /// The stage reached its end condition
    Finished,
    /// A shutdown interrupted the stage
    Cancelled,
}

/// What every worker needs besides its stage state
#[derive(Clone)]
pub struct WorkerContext<R, O> {
    pub robot: RobotId,
    pub random: R,
    pub observer: O,
    pub shutdown: ShutdownSignal,
}

impl<R: RandomSource, O: Observer> WorkerContext<R, O> {
    pub fn new(robot: RobotId, random: R, observer: O, shutdown: ShutdownSignal) -> Self {
        Self {
            robot,
            random,
            observer,
            shutdown,
        }
    }

    fn draw(&self, range: &RangeInclusive<u32>) -> u32 {
        self.random.between(*range.start(), *range.end())
    }

    fn emit(&self, event: StageEvent) {
        self.observer.observe(&event);
    }

    fn progress(&self, stage: Stage, value: i64) {
        self.emit(StageEvent::Progress {
            robot: self.robot,
            stage,
            value,
        });
    }

    /// Signal `gate`, reporting only if this call opened it
    fn open_gate(&self, gate: &CompletionGate, name: GateName, stage: Stage, value: i64) {
        if gate.signal() {
            self.emit(StageEvent::GateOpened {
                robot: self.robot,
                stage,
                gate: name,
                value,
            });
        }
    }

    /// Turn the result of a stage loop into its outcome and final record.
    ///
    /// Cancellation is swallowed here: the worker just stops.
    fn conclude(&self, stage: Stage, result: Result<(), StageError>) -> StageOutcome {
        match result {
            Ok(()) => {
                self.emit(StageEvent::Finished {
                    robot: self.robot,
                    stage,
                });
                StageOutcome::Finished
            }
            Err(StageError::Cancelled) => {
                tracing::debug!(robot = %self.robot, stage = stage.name(), "interrupted by shutdown");
                self.emit(StageEvent::Cancelled {
                    robot: self.robot,
                    stage,
                });
                StageOutcome::Cancelled
            }
        }
    }
}
