//! `skywatch fetch` — resumable paginated launch fetch.

use crate::config::Config;
use crate::dataset::CheckpointStore;
use crate::export;
use crate::fetch::{fetch_paginated, HttpClient};
use anyhow::Result;

/// Run the paginated fetch, resuming from the checkpoint unless `fresh`.
pub async fn run(cfg: &Config, fresh: bool) -> Result<()> {
    cfg.ensure_output_dir()?;

    let store = CheckpointStore::new(cfg.checkpoint_path());
    if fresh {
        store.reset()?;
    }

    let client = HttpClient::new(cfg.http_timeout_ms);
    let dataset = fetch_paginated(
        &client,
        &cfg.spacedevs_url,
        cfg.page_size,
        &store,
        &None,
        "spacedevs",
    )
    .await?;

    let out = cfg.spacedevs_output();
    export::write_json_array(&out, &dataset.results)?;
    println!(
        "Captured {} launch records (cursor at {}) -> {}",
        dataset.len(),
        dataset.offset,
        out.display()
    );
    Ok(())
}
