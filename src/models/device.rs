// View Simulator - Device Model
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Device classes a simulated viewer can use.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of device a view originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    Desktop,
    Mobile,
    Tablet,
}

impl Device {
    /// Get the display name for the device.
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Desktop => "Desktop",
            Device::Mobile => "Mobile",
            Device::Tablet => "Tablet",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
