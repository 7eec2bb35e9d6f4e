// View Simulator - Errors
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Rejections reported by the simulation controller.

use thiserror::Error;

/// Why a request to the controller was rejected. Prior state is untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationError {
    /// Target view count must be at least one.
    #[error("Invalid target: {0} (must be at least 1)")]
    InvalidTarget(u32),

    /// Views per minute must be at least one.
    #[error("Invalid rate: {0} views per minute (must be at least 1)")]
    InvalidRate(u32),

    /// Target cannot drop below views already produced.
    #[error("Invalid target: {target} is below current progress {progress}")]
    TargetBelowProgress { target: u32, progress: u32 },

    /// Configuration is locked while the simulation runs.
    #[error("Simulation is running; pause it before reconfiguring")]
    Busy,
}

/// Result type alias for controller operations.
pub type Result<T> = std::result::Result<T, SimulationError>;
