// View Simulator - Engine Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Rate-controlled scheduling and the simulation state machine.

mod controller;
mod events;
mod scheduler;

pub use controller::{Phase, SimulationController, SimulationState, Snapshot};
pub use events::SimulationEvent;
pub use scheduler::{ManualScheduler, ScheduleHandle, Scheduler, Task, TokioScheduler};
