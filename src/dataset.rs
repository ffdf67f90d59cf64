// Copyright 2026 Skywatch Contributors
// SPDX-License-Identifier: Apache-2.0

//! Dataset and checkpoint storage for resumable acquisition.
//!
//! A `Dataset` is an ordered sequence of opaque records plus the pagination
//! cursor. The checkpoint file is compact JSON `{"offset": N, "results": [...]}`
//! rewritten in full after every page, so at most one page of work is lost on
//! a crash. Writes go to a temporary file followed by a rename, so a crash
//! mid-write can never truncate previously persisted progress.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// One fetched item: an opaque mapping of named fields.
///
/// Nothing is validated here — field mapping and presence checks happen at
/// the source that produced the record.
pub type Record = serde_json::Map<String, Value>;

/// Ordered records plus the pagination cursor.
///
/// Records stay in fetch order and are never reordered or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// How many records the endpoint has already been asked to skip.
    pub offset: u64,
    /// Fetched records in fetch order.
    pub results: Vec<Record>,
}

impl Dataset {
    /// Number of records collected so far.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no records have been collected yet.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Checkpoint store: one JSON file holding the full dataset.
///
/// Persistence is overwrite-based and idempotent — saving the same dataset
/// twice yields the same file.
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted dataset. A missing file is not an error: it loads
    /// as an empty dataset with the cursor at zero.
    pub fn load(&self) -> Result<Dataset> {
        if !self.path.exists() {
            return Ok(Dataset::default());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read checkpoint: {}", self.path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to parse checkpoint: {}", self.path.display()))
    }

    /// Persist the full dataset with compact encoding.
    ///
    /// Writes a sibling temp file first and renames it into place.
    pub fn save(&self, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create checkpoint directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string(dataset).context("failed to serialize checkpoint")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("failed to write checkpoint temp file: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to move checkpoint into place: {}", self.path.display()))
    }

    /// Delete the checkpoint so the next run starts from scratch.
    pub fn reset(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove checkpoint: {}", self.path.display()))?;
        }
        Ok(())
    }
}
