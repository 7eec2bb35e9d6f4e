// View Simulator - Configuration
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Simulation parameters and their persistence in a local JSON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SimulationError;

/// Highest rate the presentation layer offers.
pub const RECOMMENDED_MAX_RATE: u32 = 60;

/// Parameters of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Views to produce before stopping.
    #[serde(default = "default_target")]
    pub target_views: u32,
    /// Views produced per minute.
    #[serde(default = "default_rate")]
    pub views_per_minute: u32,
}

fn default_target() -> u32 { 100 }
fn default_rate() -> u32 { 10 }

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            target_views: default_target(),
            views_per_minute: default_rate(),
        }
    }
}

impl SimulationConfig {
    /// Create a configuration without validating it.
    pub fn new(target_views: u32, views_per_minute: u32) -> Self {
        Self {
            target_views,
            views_per_minute,
        }
    }

    /// Check the parameters before they are applied.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.target_views == 0 {
            return Err(SimulationError::InvalidTarget(self.target_views));
        }
        if self.views_per_minute == 0 {
            return Err(SimulationError::InvalidRate(self.views_per_minute));
        }
        if self.views_per_minute > RECOMMENDED_MAX_RATE {
            warn!(
                "{} views per minute is above the recommended maximum of {}",
                self.views_per_minute, RECOMMENDED_MAX_RATE
            );
        }
        Ok(())
    }

    /// Delay between two ticks. A zero rate is treated as one per minute,
    /// and the delay never drops below one millisecond.
    pub fn tick_interval(&self) -> Duration {
        let millis = 60_000 / u64::from(self.views_per_minute.max(1));
        Duration::from_millis(millis.max(1))
    }
}

/// Settings manager that persists the last used configuration.
#[derive(Debug)]
pub struct Settings {
    config: SimulationConfig,
    path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Load settings from the user's config directory.
    pub fn new() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("view-simulator")
            .join("settings.json");
        Self::at(path)
    }

    /// Load settings from `path`, falling back to defaults.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = if path.exists() {
            match read_config(&path) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to load settings: {:#}", e);
                    SimulationConfig::default()
                }
            }
        } else {
            SimulationConfig::default()
        };

        Self { config, path }
    }

    /// Save settings to disk.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(&self.config)
            .context("Failed to serialize settings")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Get the stored configuration.
    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    /// Get the settings file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored configuration and save it.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        self.config = config;
        self.save()
    }
}

fn read_config(path: &Path) -> Result<SimulationConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
