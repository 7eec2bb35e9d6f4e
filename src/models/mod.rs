// View Simulator - Models
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Data models for simulated view events.

mod device;
mod event;
pub mod reference;

pub use device::Device;
pub use event::ViewEvent;
