//! `skywatch status` — inspect the paginated fetch checkpoint.

use crate::config::Config;
use crate::dataset::CheckpointStore;
use anyhow::Result;

/// Print the persisted cursor and record count.
pub async fn run(cfg: &Config) -> Result<()> {
    let store = CheckpointStore::new(cfg.checkpoint_path());
    let path = store.path().to_path_buf();

    if !path.exists() {
        println!("No checkpoint at {} — next fetch starts from offset 0", path.display());
        return Ok(());
    }

    let dataset = store.load()?;
    println!("Checkpoint: {}", path.display());
    println!("  records: {}", dataset.len());
    println!("  cursor:  {}", dataset.offset);
    Ok(())
}
