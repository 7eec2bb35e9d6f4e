// View Simulator - Reference Tables
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Fixed tables every synthetic view draws its attributes from.

use super::Device;

/// User agent strings a simulated viewer may report.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X) AppleWebKit/605.1.15",
    "Mozilla/5.0 (Android 11; Mobile; rv:68.0) Gecko/68.0 Firefox/88.0",
];

/// Countries a view may come from.
pub const COUNTRIES: &[&str] = &[
    "United States",
    "Canada",
    "United Kingdom",
    "Germany",
    "France",
    "Australia",
    "Japan",
];

/// Device classes.
pub const DEVICES: &[Device] = &[Device::Desktop, Device::Mobile, Device::Tablet];

/// Traffic sources.
pub const REFERRERS: &[&str] = &[
    "Direct",
    "Google Search",
    "YouTube Search",
    "External Link",
    "Social Media",
];

/// Dwell time range in seconds (half-open).
pub const DWELL_SECONDS: std::ops::Range<u32> = 30..330;

/// Exclusive upper bound of each synthetic address octet.
pub const OCTET_BOUND: u8 = 255;
