//! CLI subcommand implementations for the skywatch binary.

pub mod fetch_cmd;
pub mod scrape_cmd;
pub mod spacex_cmd;
pub mod status_cmd;
