// Copyright 2026 Skywatch Contributors
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

mod cli;
mod config;
mod dataset;
mod export;
mod fetch;
mod progress;
mod scrape;

use config::Config;

#[derive(Parser)]
#[command(
    name = "skywatch",
    about = "Skywatch — resumable acquisition of launch records and sighting reports",
    version,
    after_help = "Run 'skywatch <command> --help' for details on each command."
)]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Directory for output and checkpoint files
    #[arg(long, global = true, default_value = "data/raw")]
    out: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the paginated launch list, resuming from the checkpoint
    Fetch {
        /// Records requested per page
        #[arg(long, default_value = "100")]
        page_size: u32,
        /// Ignore any existing checkpoint and start from offset 0
        #[arg(long)]
        fresh: bool,
    },
    /// Fetch the unpaginated launch list in one shot
    FetchSpacex,
    /// Scrape sighting reports for a month range
    Scrape {
        /// Start month as yyyymm (defaults to the current month)
        #[arg(long)]
        from: Option<String>,
        /// End month as yyyymm (defaults to the current month)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show the persisted fetch checkpoint
    Status,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing
    let directive = if args.verbose {
        "skywatch=debug"
    } else if args.quiet {
        "skywatch=error"
    } else {
        "skywatch=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cfg = Config {
        output_dir: args.out.clone(),
        ..Config::default()
    };

    let result = match args.command {
        Commands::Fetch { page_size, fresh } => {
            let cfg = Config { page_size, ..cfg };
            cli::fetch_cmd::run(&cfg, fresh).await
        }
        Commands::FetchSpacex => cli::spacex_cmd::run(&cfg).await,
        Commands::Scrape { from, to } => {
            cli::scrape_cmd::run(&cfg, from.as_deref(), to.as_deref()).await
        }
        Commands::Status => cli::status_cmd::run(&cfg).await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "skywatch", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !args.quiet {
            eprintln!("  Error: {e:#}");
        }
        std::process::exit(1);
    }

    result
}
