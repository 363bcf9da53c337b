#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
//! narrowcache CLI - replay narrowing traces through the recency cache
//!
//! Usage:
//!   `narrowcache replay ./session.jsonl`
//!   `narrowcache replay ./session.jsonl --storage-limit 20`
//!   `narrowcache config --config ./narrowcache.toml`

mod replay;
#[cfg(test)]
mod replay_tests;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use narrowcache_core::{LoggingConfig, NarrowCacheConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "narrowcache")]
#[command(
    author,
    version,
    about = "narrowcache CLI - Recency cache for narrowed message lists"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the configuration file
    #[arg(
        short,
        long,
        global = true,
        default_value = "narrowcache.toml",
        env = "NARROWCACHE_CONFIG"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON Lines narrowing trace
    Replay {
        /// Path to the trace file
        trace: PathBuf,

        /// Override cache.storage_limit
        #[arg(long)]
        storage_limit: Option<usize>,

        /// Only print the summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the effective configuration
    Config,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = NarrowCacheConfig::load_from_path(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    if let Commands::Replay {
        storage_limit: Some(limit),
        ..
    } = &cli.command
    {
        config.cache.storage_limit = *limit;
    }
    config.validate()?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Replay { trace, quiet, .. } => {
            tracing::info!(
                trace = %trace.display(),
                storage_limit = config.cache.storage_limit,
                "replaying trace"
            );

            let report = if quiet {
                replay::replay_file(&trace, &config.cache, &mut std::io::sink())?
            } else {
                replay::replay_file(&trace, &config.cache, &mut std::io::stdout().lock())?
            };

            println!("\n{}", "Replay Summary".green().bold());
            println!("  Operations:       {}", report.ops);
            println!("  Messages:         {}", report.messages);
            println!("  Narrows:          {}", report.narrows);
            println!("  Hits:             {}", report.hits.to_string().green());
            println!("  Misses:           {}", report.misses.to_string().yellow());
            println!("  Evictions:        {}", report.stats.evictions);
            println!("  Cached lists:     {}", report.final_len);
            println!("  Hit rate:         {:.1}%", report.stats.hit_rate() * 100.0);
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
