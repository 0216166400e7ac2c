use clap::Parser;
use std::path::PathBuf;

/// interactive single-bank ledger with monthly interest statements
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Record deposits and withdrawals, define interest rules and print monthly statements", long_about = None)]
pub struct CliArgs {
    /// JSON configuration file
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// log filter directive written to stderr, e.g. `debug` or `bank_ledger=trace`
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// filter to install: the flag, then `RUST_LOG`, then `warn`
    pub fn log_filter(&self, env_filter: Option<String>) -> String {
        self.log_level
            .clone()
            .or(env_filter)
            .unwrap_or_else(|| "warn".to_string())
    }
}

pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
