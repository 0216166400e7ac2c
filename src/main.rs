use anyhow::{Context, Result};
use std::io;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bank_ledger::cli;
use bank_ledger::{Bank, Console, LedgerConfig};

fn main() -> Result<()> {
    let args = cli::parse_args();

    // stdout carries the console, so logs go to stderr
    let filter = args.log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok());
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&filter).with_context(|| format!("invalid log filter `{filter}`"))?)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => LedgerConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => LedgerConfig::default(),
    };
    info!(bank = %config.bank_name, "configuration loaded");

    let stdin = io::stdin();
    let mut console = Console::new(Bank::new(config), stdin.lock(), io::stdout());
    console.run().context("console session failed")?;

    Ok(())
}
