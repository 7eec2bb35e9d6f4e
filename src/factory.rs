// View Simulator - Event Factory
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Synthesis of random view events from the reference tables.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::models::reference::{
    COUNTRIES, DEVICES, DWELL_SECONDS, OCTET_BOUND, REFERRERS, USER_AGENTS,
};
use crate::models::{Device, ViewEvent};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Produces independent random views.
///
/// The factory keeps no memory between calls; the only thing it owns is the
/// randomness source, which can be pinned with [`EventFactory::seeded`].
#[derive(Debug)]
pub struct EventFactory<R = StdRng> {
    rng: R,
}

impl EventFactory<StdRng> {
    /// Create a factory seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a deterministic factory.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for EventFactory<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> EventFactory<R> {
    /// Create a factory over any randomness source.
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Produce a view stamped with the current time.
    pub fn produce(&mut self) -> ViewEvent {
        self.produce_at(Utc::now())
    }

    /// Produce a view stamped with `timestamp`.
    pub fn produce_at(&mut self, timestamp: DateTime<Utc>) -> ViewEvent {
        ViewEvent {
            id: self.random_id(),
            timestamp,
            user_agent: self.pick(USER_AGENTS).to_string(),
            source_address: self.random_address(),
            country: self.pick(COUNTRIES).to_string(),
            device: self.random_device(),
            dwell_time_seconds: self.rng.gen_range(DWELL_SECONDS),
            referrer: self.pick(REFERRERS).to_string(),
        }
    }

    fn pick(&mut self, table: &'static [&'static str]) -> &'static str {
        // Tables are non-empty constants.
        table.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn random_device(&mut self) -> Device {
        DEVICES.choose(&mut self.rng).copied().unwrap_or(Device::Desktop)
    }

    fn random_address(&mut self) -> String {
        let mut octet = || self.rng.gen_range(0..OCTET_BOUND);
        format!("{}.{}.{}.{}", octet(), octet(), octet(), octet())
    }

    fn random_id(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| ID_ALPHABET[self.rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect()
    }
}
