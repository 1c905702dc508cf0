// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rf-core: coordination primitives for the robot factory pipeline
//!
//! This crate provides:
//! - Shared atomic progress counters
//! - A fuel pool with blocking, overdraft-free consumption
//! - One-shot completion gates and the producer run flag
//! - Injectable randomness and the observer side channel

pub mod counter;
pub mod gate;
pub mod observer;
pub mod pool;
pub mod random;
pub mod run_flag;

// Re-exports
pub use counter::ProgressCounter;
pub use gate::CompletionGate;
pub use observer::{
    GateName, NullObserver, Observer, RecordingObserver, RobotId, Stage, StageEvent,
    TracingObserver,
};
pub use pool::ResourcePool;
pub use random::{RandomSource, ScriptedRandom, StdRandom};
pub use run_flag::RunFlag;
