// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed stage parameters
//!
//! Every delay, range and threshold of the pipeline. The `Default` of each
//! struct is the production configuration; there is no file or environment
//! based override.

use std::ops::RangeInclusive;
use std::time::Duration;

/// Points a progress counter must reach for its stage to be complete
pub const STAGE_TARGET: i64 = 100;

/// Fuel extractor (robot-1)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractorParams {
    /// Transport time after each extraction
    pub delay: Duration,
    /// Fuel produced per iteration
    pub production: RangeInclusive<u32>,
}

impl Default for ExtractorParams {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(3000),
            production: 500..=1000,
        }
    }
}

/// Basic construction assemblers (robot-2, robot-3)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssemblyParams {
    pub delay: Duration,
    pub increment: RangeInclusive<u32>,
    pub target: i64,
}

impl Default for AssemblyParams {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(2000),
            increment: 10..=20,
            target: STAGE_TARGET,
        }
    }
}

/// Firmware loader (robot-4)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirmwareParams {
    /// Reload time after every attempt, faulted or not
    pub delay: Duration,
    /// Base 25 plus a random term in 0..=10
    pub increment: RangeInclusive<u32>,
    /// Probability of a faulted attempt, in percent
    pub fault_percent: u32,
    pub target: i64,
}

impl Default for FirmwareParams {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1000),
            increment: 25..=35,
            fault_percent: 30,
            target: STAGE_TARGET,
        }
    }
}

/// Final operation doer (robot-5)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinalOperationParams {
    pub delay: Duration,
    /// Fuel required per iteration
    pub fuel: RangeInclusive<u32>,
    pub increment: i64,
    pub target: i64,
}

impl Default for FinalOperationParams {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1000),
            fuel: 350..=700,
            increment: 10,
            target: STAGE_TARGET,
        }
    }
}

/// Parameters for the whole pipeline
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FactoryParams {
    pub extractor: ExtractorParams,
    pub assembly: AssemblyParams,
    pub firmware: FirmwareParams,
    pub final_operation: FinalOperationParams,
}
