// View Simulator - View Event Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! A single fabricated view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Device;

/// One synthetic view. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewEvent {
    /// Opaque identifier, 9 base-36 characters.
    pub id: String,
    /// When the view was produced.
    pub timestamp: DateTime<Utc>,
    pub user_agent: String,
    /// Synthetic dotted-quad source address.
    pub source_address: String,
    pub country: String,
    pub device: Device,
    /// Seconds the viewer stayed, in `30..330`.
    pub dwell_time_seconds: u32,
    pub referrer: String,
}

impl ViewEvent {
    /// Get the one-line summary shown in the recent views list.
    pub fn summary_line(&self) -> String {
        format!(
            "{} • {}s • {}",
            self.source_address, self.dwell_time_seconds, self.referrer
        )
    }

    /// Get the headline used in per-view notifications.
    pub fn headline(&self) -> String {
        format!("Generated view from {} ({})", self.country, self.device)
    }

    /// Local wall-clock time of the view, `HH:MM:SS`.
    pub fn local_time(&self) -> String {
        self.timestamp
            .with_timezone(&chrono::Local)
            .format("%H:%M:%S")
            .to_string()
    }
}
