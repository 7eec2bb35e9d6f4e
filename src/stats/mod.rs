// View Simulator - Statistics Module
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Rolling view history and the aggregates derived from it.

mod aggregate;
mod history;

pub use aggregate::AggregateStats;
pub use history::{HistoryBuffer, HISTORY_CAPACITY};
