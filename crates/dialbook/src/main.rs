//! Dialbook - interactive phone book

mod menu;
mod seed;
mod validate;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use dialdb::{ContactTable, StoreConfig, DEFAULT_BUCKETS, DEFAULT_CAPACITY};
use tracing::info;

use crate::menu::MenuHandler;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of hash buckets
    #[arg(short, long, default_value_t = DEFAULT_BUCKETS)]
    buckets: usize,

    /// How many recently touched numbers to remember
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    history: usize,

    /// Start with an empty phone book instead of the emergency numbers
    #[arg(long)]
    no_seed: bool,

    /// Print listings and history as JSON
    #[arg(long)]
    json: bool,

    /// Log level used when RUST_LOG is unset (logs go to stderr)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(args.log_level.into()),
        )
        .init();

    info!("Starting Dialbook v{}", env!("CARGO_PKG_VERSION"));

    let config = StoreConfig::default()
        .with_buckets(args.buckets)
        .with_tracker_capacity(args.history);
    let mut table = ContactTable::with_config(config).context("invalid phone book size")?;

    if !args.no_seed {
        let added = seed::seed_defaults(&mut table);
        info!(added, "loaded default contacts");
    }
    info!(
        buckets = config.buckets,
        history = config.tracker_capacity,
        "phone book ready"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = MenuHandler::new(table, stdin.lock(), stdout.lock()).json(args.json);
    menu.run()
}
