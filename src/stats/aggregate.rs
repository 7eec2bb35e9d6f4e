// View Simulator - Aggregate Statistics
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Breakdowns derived from the rolling history.

use std::collections::HashSet;

use serde::Serialize;

use super::HistoryBuffer;
use crate::models::Device;

/// Aggregates over the views currently in the history.
///
/// Counts are kept in first-seen order, scanning newest to oldest. Every
/// ratio uses `total` as its denominator so one snapshot is always
/// self-consistent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    /// Number of views the aggregates were computed over.
    pub total: usize,
    /// Views per device, first-seen order.
    pub devices: Vec<(Device, usize)>,
    /// Views per country, first-seen order.
    pub countries: Vec<(String, usize)>,
    /// Sum of dwell times in seconds.
    pub total_dwell_seconds: u64,
    /// Distinct source addresses.
    pub unique_sources: usize,
}

impl AggregateStats {
    /// Compute the aggregates for the buffer's current contents.
    pub fn compute(buffer: &HistoryBuffer) -> Self {
        let mut stats = Self {
            total: buffer.len(),
            ..Default::default()
        };
        let mut sources = HashSet::with_capacity(buffer.len());

        for event in buffer.iter() {
            match stats.devices.iter_mut().find(|(d, _)| *d == event.device) {
                Some((_, count)) => *count += 1,
                None => stats.devices.push((event.device, 1)),
            }
            match stats.countries.iter_mut().find(|(c, _)| *c == event.country) {
                Some((_, count)) => *count += 1,
                None => stats.countries.push((event.country.clone(), 1)),
            }
            stats.total_dwell_seconds += u64::from(event.dwell_time_seconds);
            sources.insert(event.source_address.as_str());
        }

        stats.unique_sources = sources.len();
        stats
    }

    /// Views recorded for `device`.
    pub fn device_count(&self, device: Device) -> usize {
        self.devices
            .iter()
            .find(|(d, _)| *d == device)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Views recorded for `country`.
    pub fn country_count(&self, country: &str) -> usize {
        self.countries
            .iter()
            .find(|(c, _)| c == country)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Countries with the most views, descending. Ties keep first-seen order.
    pub fn top_countries(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked = self.countries.clone();
        // Stable sort preserves first-seen order among equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Exact mean dwell time in seconds, 0 when empty.
    pub fn mean_dwell_seconds(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.total_dwell_seconds as f64 / self.total as f64
        }
    }

    /// Mean dwell time rounded to whole seconds.
    pub fn average_dwell_seconds(&self) -> u64 {
        self.mean_dwell_seconds().round() as u64
    }

    /// Percentage of views from `device`.
    pub fn device_share(&self, device: Device) -> f64 {
        self.percent(self.device_count(device))
    }

    /// Percentage of views from `country`.
    pub fn country_share(&self, country: &str) -> f64 {
        self.percent(self.country_count(country))
    }

    fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }
}
