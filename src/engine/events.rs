// View Simulator - Engine Events
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Notifications emitted by the simulation controller.

use std::time::Duration;

use crate::models::ViewEvent;

/// Events emitted by the controller, in the order the mutations happened.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    Started {
        views_per_minute: u32,
        interval: Duration,
    },
    /// One accepted tick.
    ViewGenerated {
        view: ViewEvent,
        progress: u32,
    },
    Paused {
        progress: u32,
    },
    Reset,
    /// Progress reached the target.
    Completed {
        total: u32,
    },
}

impl SimulationEvent {
    /// Short title for a notification.
    pub fn title(&self) -> &'static str {
        match self {
            SimulationEvent::Started { .. } => "Simulation Started",
            SimulationEvent::ViewGenerated { .. } => "View Simulated",
            SimulationEvent::Paused { .. } => "Simulation Paused",
            SimulationEvent::Reset => "Simulation Reset",
            SimulationEvent::Completed { .. } => "Simulation Complete!",
        }
    }

    /// Human-readable description for a notification.
    pub fn message(&self) -> String {
        match self {
            SimulationEvent::Started {
                views_per_minute, ..
            } => format!("Generating {} views per minute", views_per_minute),
            SimulationEvent::ViewGenerated { view, .. } => view.headline(),
            SimulationEvent::Paused { .. } => "View generation paused".to_string(),
            SimulationEvent::Reset => "All data cleared".to_string(),
            SimulationEvent::Completed { total } => {
                format!("Successfully simulated {} views", total)
            }
        }
    }
}
