// Copyright 2026 Skywatch Contributors
// SPDX-License-Identifier: Apache-2.0

//! Stateful multi-page scrape loop over monthly period tokens.
//!
//! For each period the loop navigates to the month's listing page, polls
//! until the rendered total-count text appears, then walks the table pages
//! through the next-page control until the expected number of rows has been
//! collected or the controls disappear. All waiting is condition polling
//! with a deadline — there are no fixed settle sleeps.
//!
//! Failure policy: anything that goes wrong mid-period (missing table,
//! missing next control, a click or read error) ends only that period's
//! inner loop; rows already collected for the period are kept and the outer
//! loop moves on to the next period. Rows live in memory until the whole
//! run completes.

use crate::config::Config;
use crate::progress::{emit, ProgressEventKind, ProgressSender};
use crate::scrape::driver::PageDriver;
use crate::scrape::parse::{self, NextControl, Sighting, NEXT_CONTROL_ID};
use crate::scrape::periods::{period_range, Period};
use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Listing URL for one period.
pub fn period_url(base: &str, period: &Period) -> String {
    format!("{base}?id=e{}", period.token())
}

/// Poll the driver until `entry_total` can be read, up to the configured
/// deadline. Returns `None` on timeout.
async fn await_entry_total(driver: &mut dyn PageDriver, cfg: &Config) -> Result<Option<u64>> {
    let deadline = Instant::now() + Duration::from_millis(cfg.readiness_timeout_ms);
    loop {
        let html = driver.html().await?;
        if let Some(total) = parse::entry_total(&html) {
            return Ok(Some(total));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        tokio::time::sleep(Duration::from_millis(cfg.poll_interval_ms)).await;
    }
}

/// After a next-page click, poll until the rendered rows differ from the
/// previous view (or the table disappears, which the caller then handles).
/// Returns false on timeout — the page never advanced.
async fn await_page_change(
    driver: &mut dyn PageDriver,
    cfg: &Config,
    previous_first: Option<&Sighting>,
) -> Result<bool> {
    let deadline = Instant::now() + Duration::from_millis(cfg.readiness_timeout_ms);
    loop {
        let html = driver.html().await?;
        let changed = match parse::sighting_rows(&html) {
            // Table gone counts as a change; the outer parse reports it.
            None => true,
            Some(rows) => rows.first() != previous_first,
        };
        if changed {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(Duration::from_millis(cfg.poll_interval_ms)).await;
    }
}

/// Scrape all table pages of one period. Partial results are returned, never
/// discarded.
pub async fn scrape_period(
    driver: &mut dyn PageDriver,
    cfg: &Config,
    period: &Period,
    progress: &Option<ProgressSender>,
    seq: &mut u64,
) -> Result<Vec<Sighting>> {
    let url = period_url(&cfg.sightings_url, period);
    driver.navigate(&url, cfg.http_timeout_ms).await?;

    let total = match await_entry_total(driver, cfg).await? {
        Some(t) => t,
        None => {
            warn!("could not locate entry total for period {period} — skipping");
            emit(
                progress,
                &period.token(),
                seq,
                ProgressEventKind::PeriodSkipped {
                    period: period.token(),
                    reason: "entry total not found".to_string(),
                },
            );
            return Ok(Vec::new());
        }
    };

    info!("period {period}: {total} records expected");
    emit(
        progress,
        &period.token(),
        seq,
        ProgressEventKind::PeriodStarted {
            period: period.token(),
            expected: total,
        },
    );

    let mut rows: Vec<Sighting> = Vec::new();
    loop {
        let html = match driver.html().await {
            Ok(h) => h,
            Err(e) => {
                warn!("failed to read page for period {period}: {e:#} — keeping partial rows");
                break;
            }
        };

        let page_rows = match parse::sighting_rows(&html) {
            Some(r) => r,
            None => {
                warn!("table not found for period {period} — keeping partial rows");
                break;
            }
        };
        if page_rows.is_empty() {
            warn!("table has no rows for period {period}");
            break;
        }

        let first = page_rows.first().cloned();
        rows.extend(page_rows);
        debug!("period {period}: {} of {total} rows collected", rows.len());

        if rows.len() as u64 >= total {
            break;
        }

        match parse::next_control(&html) {
            NextControl::Absent => {
                warn!("next control missing for period {period} — keeping partial rows");
                break;
            }
            NextControl::Disabled => {
                debug!("next control disabled — last page of period {period}");
                break;
            }
            NextControl::Enabled => {}
        }

        if let Err(e) = driver.click(NEXT_CONTROL_ID).await {
            warn!("failed to click next control for period {period}: {e:#}");
            break;
        }
        match await_page_change(driver, cfg, first.as_ref()).await {
            Ok(true) => {}
            Ok(false) => {
                warn!("page did not advance for period {period} — stopping to avoid re-collecting");
                break;
            }
            Err(e) => {
                warn!("failed to read page for period {period}: {e:#} — keeping partial rows");
                break;
            }
        }
    }

    emit(
        progress,
        &period.token(),
        seq,
        ProgressEventKind::PeriodCompleted {
            period: period.token(),
            rows: rows.len() as u64,
            expected: total,
        },
    );
    Ok(rows)
}

/// Scrape every period from `start` to `end` inclusive and return all rows
/// in collection order.
///
/// A period that fails entirely (navigation error and the like) is logged
/// and skipped; the run continues with the next period.
pub async fn scrape_range(
    driver: &mut dyn PageDriver,
    cfg: &Config,
    start: Period,
    end: Period,
    progress: &Option<ProgressSender>,
) -> Result<Vec<Sighting>> {
    let periods = period_range(start, end);
    info!(
        "scraping {} period(s): {} to {}",
        periods.len(),
        start,
        end
    );

    let mut all = Vec::new();
    let mut seq = 0u64;
    for period in &periods {
        info!("scraping period {period}");
        match scrape_period(driver, cfg, period, progress, &mut seq).await {
            Ok(mut rows) => {
                info!("period {period}: collected {} rows", rows.len());
                all.append(&mut rows);
            }
            Err(e) => warn!("period {period} failed: {e:#} — continuing with next period"),
        }
    }

    Ok(all)
}
