// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the pipeline engine

use rf_core::RobotId;
use thiserror::Error;
use tokio::task::JoinError;

/// Reasons a stage leaves its loop early
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StageError {
    #[error("stage cancelled by shutdown")]
    Cancelled,
}

/// Errors that can occur while joining the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{robot} did not complete: {source}")]
    Join {
        robot: RobotId,
        #[source]
        source: JoinError,
    },
}
