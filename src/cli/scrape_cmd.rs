//! `skywatch scrape` — browser-driven sighting scrape over a month range.

use crate::config::Config;
use crate::export;
use crate::scrape::driver::{ChromiumDriver, PageDriver};
use crate::scrape::periods::Period;
use crate::scrape::sightings::scrape_range;
use anyhow::Result;

/// Scrape sightings for the inclusive `from..to` month range. Either bound
/// defaults to the current month when omitted.
pub async fn run(cfg: &Config, from: Option<&str>, to: Option<&str>) -> Result<()> {
    cfg.ensure_output_dir()?;

    let start = match from {
        Some(token) => Period::parse(token)?,
        None => Period::current(),
    };
    let end = match to {
        Some(token) => Period::parse(token)?,
        None => Period::current(),
    };

    let mut driver = ChromiumDriver::new().await?;
    let rows = scrape_range(&mut driver, cfg, start, end, &None).await;
    // Close the browser before reporting either way
    Box::new(driver).close().await?;
    let rows = rows?;

    let out = cfg.sightings_output();
    export::write_sightings_csv(&out, &rows)?;
    println!("Captured {} sighting reports -> {}", rows.len(), out.display());
    Ok(())
}
