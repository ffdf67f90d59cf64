// Copyright 2026 Skywatch Contributors
// SPDX-License-Identifier: Apache-2.0

//! Skywatch runtime library — resumable acquisition of launch records and
//! sighting reports.
//!
//! This library crate exposes the core modules for integration testing.

#![allow(dead_code, clippy::new_without_default)]

pub mod cli;
pub mod config;
pub mod dataset;
pub mod export;
pub mod fetch;
pub mod progress;
pub mod scrape;
