// Copyright 2026 Skywatch Contributors
// SPDX-License-Identifier: Apache-2.0

//! Resumable offset-paginated fetch loop.
//!
//! Requests fixed-size pages from a list endpoint (`limit`/`offset` query
//! parameters, JSON object body with a `results` array), appends records in
//! fetch order, and persists the full dataset after every page. A restart
//! picks up at the persisted cursor instead of re-fetching earlier pages.
//!
//! Failure policy: a non-success status or a transport error (after the
//! client's own retries) aborts the loop without raising — whatever was
//! persisted up to the last successful page remains valid and resumable.
//! A page body that is not an object with a `results` array aborts the same
//! way. An individual element of `results` that is not a JSON object is
//! skipped and logged.

use crate::dataset::{CheckpointStore, Dataset};
use crate::fetch::http_client::HttpClient;
use crate::progress::{emit, ProgressEventKind, ProgressSender};
use anyhow::Result;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Run the paginated fetch loop to completion (or abort) and return the
/// accumulated dataset.
///
/// Termination is normal when a page comes back empty (explicit end of data)
/// or shorter than `page_size` (last page). Both a successful full page and
/// a successful short page advance the cursor by `page_size` and persist a
/// snapshot before the loop decides whether to continue.
pub async fn fetch_paginated(
    client: &HttpClient,
    base_url: &str,
    page_size: u32,
    store: &CheckpointStore,
    progress: &Option<ProgressSender>,
    run_id: &str,
) -> Result<Dataset> {
    let mut dataset = store.load()?;
    if dataset.offset > 0 || !dataset.is_empty() {
        info!(
            "resuming from checkpoint: {} records, cursor at {}",
            dataset.len(),
            dataset.offset
        );
    }

    let start = Instant::now();
    let mut pages = 0u32;
    let mut seq = 0u64;

    loop {
        let query = [
            ("limit", page_size.to_string()),
            ("offset", dataset.offset.to_string()),
        ];
        debug!("requesting page at offset {}", dataset.offset);

        let resp = match client.get(base_url, &query).await {
            Ok(r) => r,
            Err(e) => {
                warn!(
                    "transport failure at offset {}: {e:#} — stopping, progress is preserved",
                    dataset.offset
                );
                break;
            }
        };

        if !resp.is_success() {
            warn!(
                "endpoint returned status {} at offset {} — stopping, progress is preserved",
                resp.status, dataset.offset
            );
            break;
        }

        let page: Value = match serde_json::from_str(&resp.body) {
            Ok(v) => v,
            Err(e) => {
                warn!("page body at offset {} is not JSON: {e} — stopping", dataset.offset);
                break;
            }
        };
        let results = match page.get("results").and_then(Value::as_array) {
            Some(r) => r.clone(),
            None => {
                warn!(
                    "page object at offset {} has no results array — stopping",
                    dataset.offset
                );
                break;
            }
        };

        if results.is_empty() {
            info!("empty page at offset {} — end of data", dataset.offset);
            break;
        }

        let page_len = results.len();
        for value in results {
            match value {
                Value::Object(map) => dataset.results.push(map),
                other => warn!("skipping non-object record: {other}"),
            }
        }

        dataset.offset += u64::from(page_size);
        store.save(&dataset)?;
        pages += 1;

        emit(
            progress,
            run_id,
            &mut seq,
            ProgressEventKind::PageFetched {
                offset: dataset.offset,
                page_records: page_len as u32,
                total_records: dataset.len() as u64,
            },
        );
        emit(
            progress,
            run_id,
            &mut seq,
            ProgressEventKind::CheckpointSaved {
                offset: dataset.offset,
                records: dataset.len() as u64,
            },
        );
        info!(
            "page {pages}: {page_len} records, {} total, cursor at {}",
            dataset.len(),
            dataset.offset
        );

        if page_len < page_size as usize {
            info!("short page ({page_len} < {page_size}) — last page reached");
            break;
        }
    }

    emit(
        progress,
        run_id,
        &mut seq,
        ProgressEventKind::FetchComplete {
            records: dataset.len() as u64,
            pages,
            elapsed_ms: start.elapsed().as_millis() as u64,
        },
    );

    Ok(dataset)
}
