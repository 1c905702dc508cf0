// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observer side channel for stage progress
//!
//! Workers report what they do through an [`Observer`]. Nothing reported here
//! feeds back into control flow, so observers must be cheap and must never
//! block the reporting worker.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Pipeline stage a robot works on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    FuelExtraction,
    BasicConstruction,
    FirmwareLoading,
    FinalOperation,
}

impl Stage {
    /// Human-readable worker name
    pub fn name(&self) -> &'static str {
        match self {
            Stage::FuelExtraction => "fuel extractor",
            Stage::BasicConstruction => "basic construction assembler",
            Stage::FirmwareLoading => "firmware loader",
            Stage::FinalOperation => "final operation doer",
        }
    }

    /// Name of the value this stage reports progress on
    pub fn metric(&self) -> &'static str {
        match self {
            Stage::FuelExtraction => "fuel level",
            Stage::BasicConstruction => "basic construction progress",
            Stage::FirmwareLoading => "firmware loader progress",
            Stage::FinalOperation => "final operation progress",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of a running worker (`robot-1` .. `robot-5`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RobotId(pub u8);

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "robot-{}", self.0)
    }
}

/// Gates between stages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateName {
    /// Opens when basic construction reaches its target
    BasicConstruction,
    /// Opens when firmware loading reaches its target
    Firmware,
}

impl fmt::Display for GateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateName::BasicConstruction => f.write_str("basic construction gate"),
            GateName::Firmware => f.write_str("firmware gate"),
        }
    }
}

/// A single record emitted by a worker
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageEvent {
    /// The stage's metric moved to `value`
    Progress {
        robot: RobotId,
        stage: Stage,
        value: i64,
    },
    /// A firmware attempt failed and contributed nothing
    Fault { robot: RobotId, stage: Stage },
    /// Not enough fuel for the next iteration
    Starved {
        robot: RobotId,
        stage: Stage,
        needed: u32,
        available: i64,
    },
    /// This robot opened `gate`; `value` is the counter read at that moment
    GateOpened {
        robot: RobotId,
        stage: Stage,
        gate: GateName,
        value: i64,
    },
    Finished { robot: RobotId, stage: Stage },
    /// The robot was interrupted by a shutdown and left its loop
    Cancelled { robot: RobotId, stage: Stage },
}

impl StageEvent {
    pub fn robot(&self) -> RobotId {
        match self {
            StageEvent::Progress { robot, .. }
            | StageEvent::Fault { robot, .. }
            | StageEvent::Starved { robot, .. }
            | StageEvent::GateOpened { robot, .. }
            | StageEvent::Finished { robot, .. }
            | StageEvent::Cancelled { robot, .. } => *robot,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            StageEvent::Progress { stage, .. }
            | StageEvent::Fault { stage, .. }
            | StageEvent::Starved { stage, .. }
            | StageEvent::GateOpened { stage, .. }
            | StageEvent::Finished { stage, .. }
            | StageEvent::Cancelled { stage, .. } => *stage,
        }
    }
}

impl fmt::Display for StageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageEvent::Progress { stage, value, .. } => {
                write!(f, "{} : {} = {}", stage, stage.metric(), value)
            }
            StageEvent::Fault { stage, .. } => {
                write!(f, "{} : fault, attempt discarded", stage)
            }
            StageEvent::Starved {
                stage,
                needed,
                available,
                ..
            } => write!(
                f,
                "{} : waiting for fuel, needed = {}, available = {}",
                stage, needed, available
            ),
            StageEvent::GateOpened {
                stage, gate, value, ..
            } => write!(f, "{} : {} opened at {}", stage, gate, value),
            StageEvent::Finished { stage, .. } => write!(f, "{}: finished", stage),
            StageEvent::Cancelled { stage, .. } => write!(f, "{}: cancelled", stage),
        }
    }
}

/// Receives stage records
pub trait Observer: Clone + Send + Sync + 'static {
    fn observe(&self, event: &StageEvent);
}

/// Writes every record through `tracing`
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, event: &StageEvent) {
        let robot = event.robot();
        let stage = event.stage().name();
        match event {
            StageEvent::Fault { .. } => tracing::warn!(%robot, stage, "{}", event),
            StageEvent::Starved { .. } => tracing::debug!(%robot, stage, "{}", event),
            _ => tracing::info!(%robot, stage, "{}", event),
        }
    }
}

/// Discards every record
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn observe(&self, _event: &StageEvent) {}
}

/// Keeps every record in memory, in arrival order, for tests
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<StageEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far
    pub fn events(&self) -> Vec<StageEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Records emitted by one robot
    pub fn events_for(&self, robot: RobotId) -> Vec<StageEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.robot() == robot)
            .collect()
    }

    /// Rendered lines, as the tracing observer would print them
    pub fn lines(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }
}

impl Observer for RecordingObserver {
    fn observe(&self, event: &StageEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}

#[cfg(test)]
#[path = "observer_tests.rs"]
mod tests;
