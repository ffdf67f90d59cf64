// Copyright 2026 Skywatch Contributors
// SPDX-License-Identifier: Apache-2.0

//! Acquisition configuration.
//!
//! Every path and tuning knob lives in an explicit `Config` passed into the
//! components that need it. Nothing is derived from the location of the
//! running executable.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Space Devs launch list endpoint (dev tier, no API key required).
pub const SPACEDEVS_URL: &str = "https://lldev.thespacedevs.com/2.3.0/launches/";

/// SpaceX launch list endpoint (v4, unpaginated).
pub const SPACEX_URL: &str = "https://api.spacexdata.com/v4/launches";

/// Monthly sighting report index. A period is selected with `?id=e<yyyymm>`.
pub const SIGHTINGS_URL: &str = "https://nuforc.org/subndx/";

/// Runtime configuration for all acquisition components.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory all output and checkpoint files are written into.
    pub output_dir: PathBuf,
    /// Records requested per page from the paginated endpoint.
    pub page_size: u32,
    /// Per-request HTTP timeout in milliseconds.
    pub http_timeout_ms: u64,
    /// Deadline for readiness polling after a browser navigation or click.
    pub readiness_timeout_ms: u64,
    /// Interval between readiness polls.
    pub poll_interval_ms: u64,
    /// Paginated launch list endpoint.
    pub spacedevs_url: String,
    /// One-shot launch list endpoint.
    pub spacex_url: String,
    /// Sighting index base URL.
    pub sightings_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data/raw"),
            page_size: 100,
            http_timeout_ms: 30_000,
            readiness_timeout_ms: 15_000,
            poll_interval_ms: 250,
            spacedevs_url: SPACEDEVS_URL.to_string(),
            spacex_url: SPACEX_URL.to_string(),
            sightings_url: SIGHTINGS_URL.to_string(),
        }
    }
}

impl Config {
    /// Checkpoint file for the resumable paginated fetch.
    pub fn checkpoint_path(&self) -> PathBuf {
        self.output_dir.join("spacedevs_state.json")
    }

    /// Final JSON array of paginated launch records.
    pub fn spacedevs_output(&self) -> PathBuf {
        self.output_dir.join("spacedevs_launches.json")
    }

    /// Final JSON array of one-shot launch summaries.
    pub fn spacex_output(&self) -> PathBuf {
        self.output_dir.join("spacex_launches.json")
    }

    /// Final CSV of scraped sighting reports.
    pub fn sightings_output(&self) -> PathBuf {
        self.output_dir.join("sighting_reports.csv")
    }

    /// Create the output directory if it does not exist yet.
    pub fn ensure_output_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "failed to create output directory: {}",
                self.output_dir.display()
            )
        })
    }
}
