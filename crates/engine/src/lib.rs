// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Robot factory pipeline engine
//!
//! Five robots cooperate on one unit of output:
//! - robot-1 extracts fuel until told to stop
//! - robot-2 and robot-3 assemble the basic construction on a shared counter
//! - robot-4 loads firmware once basic construction is done
//! - robot-5 spends fuel on the final operation once firmware is loaded, then
//!   stops robot-1

mod error;
mod factory;
pub mod params;
mod shutdown;
pub mod workers;

pub use error::{PipelineError, StageError};
pub use factory::{
    start, Factory, PipelineHandle, PipelineReport, PipelineState, ASSEMBLERS, FINAL_OPERATOR,
    FIRMWARE_LOADER, FUEL_EXTRACTOR,
};
pub use params::FactoryParams;
pub use shutdown::ShutdownSignal;
pub use workers::{StageOutcome, WorkerContext};
