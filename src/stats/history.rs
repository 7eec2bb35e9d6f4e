// View Simulator - History Buffer
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Bounded, newest-first store of recent views.

use std::collections::VecDeque;

use crate::models::ViewEvent;

/// Number of views kept in the rolling history.
pub const HISTORY_CAPACITY: usize = 50;

/// Most recent views, newest first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    events: VecDeque<ViewEvent>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    /// Create an empty buffer with the standard capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer holding at most `capacity` views.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend a view, evicting the oldest one when full.
    pub fn push(&mut self, event: ViewEvent) {
        if self.capacity == 0 {
            return;
        }
        if self.events.len() >= self.capacity {
            self.events.pop_back();
        }
        self.events.push_front(event);
    }

    /// Remove every view.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Iterate newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &ViewEvent> + '_ {
        self.events.iter()
    }

    /// Read-only view of the contents, newest first.
    pub fn snapshot(&self) -> Vec<&ViewEvent> {
        self.events.iter().collect()
    }

    /// The most recently pushed view.
    pub fn newest(&self) -> Option<&ViewEvent> {
        self.events.front()
    }

    /// Number of views held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no views are held.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Maximum number of views held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
