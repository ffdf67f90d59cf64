//! `skywatch fetch-spacex` — one-shot launch list fetch.

use crate::config::Config;
use crate::export;
use crate::fetch::spacex::fetch_spacex;
use crate::fetch::HttpClient;
use anyhow::Result;

/// Fetch the full launch list and write the trimmed summaries.
pub async fn run(cfg: &Config) -> Result<()> {
    cfg.ensure_output_dir()?;

    let client = HttpClient::new(cfg.http_timeout_ms);
    let launches = fetch_spacex(&client, &cfg.spacex_url).await?;

    let out = cfg.spacex_output();
    export::write_json_array(&out, &launches)?;
    println!("Captured {} launches -> {}", launches.len(), out.display());
    Ok(())
}
