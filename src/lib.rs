// View Simulator - Library Root
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! View Simulator - an educational generator of synthetic view traffic.
//!
//! A [`SimulationController`] produces fabricated [`ViewEvent`]s at a
//! configured rate until a target count is reached, keeping the most recent
//! ones in a bounded [`HistoryBuffer`] and the derived [`AggregateStats`]
//! up to date. Presentation layers poll [`SimulationController::current_state`]
//! or subscribe to [`SimulationEvent`]s.

pub mod config;
pub mod engine;
pub mod error;
pub mod factory;
pub mod models;
pub mod stats;

pub use config::{Settings, SimulationConfig};
pub use engine::{
    ManualScheduler, Phase, Scheduler, SimulationController, SimulationEvent, SimulationState,
    Snapshot, TokioScheduler,
};
pub use error::{Result, SimulationError};
pub use factory::EventFactory;
pub use models::{Device, ViewEvent};
pub use stats::{AggregateStats, HistoryBuffer, HISTORY_CAPACITY};
