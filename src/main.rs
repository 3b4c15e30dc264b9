//! # Main — CLI Entry Point
//!
//! Parses arguments, initialises logging and hands off to `cli::run`.
//!
//! ## Range Selection
//!
//! Exactly one of:
//! - `--range START STOP`: explicit inclusive interval (endpoints in any order).
//! - `--exp X Y`: the interval `[10^min(X,Y), 10^max(X,Y)]`.
//!
//! Supplying both or neither is a usage error.
//!
//! ## Environment
//!
//! - `LOG_FORMAT=json`: JSON log lines instead of human-readable output.
//! - `RUST_LOG`: log filter (default `info`). Logs go to stderr.
//! - `CORRIDOR_*`: fallbacks for the tuning flags (see `--help`).

mod cli;

use anyhow::Result;
use clap::{ArgGroup, Parser};
use rug::Integer;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "corridor",
    version,
    about = "Rank mod-30 wheel candidates per block and confirm only the top k with Miller-Rabin"
)]
#[command(group(ArgGroup::new("selector").required(true).args(["range", "exp"])))]
struct Cli {
    /// Inclusive search range (endpoints may be given in either order)
    #[arg(long, num_args = 2, value_names = ["START", "STOP"], allow_negative_numbers = true)]
    range: Option<Vec<Integer>>,

    /// Search [10^min(X,Y), 10^max(X,Y)]
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    exp: Option<Vec<u32>>,

    /// Candidates confirmed per block
    #[arg(short, long, env = "CORRIDOR_K", default_value_t = 3,
          value_parser = clap::value_parser!(u64).range(1..))]
    k: u64,

    /// Weight of the learned corridor probability P_log
    #[arg(long, env = "CORRIDOR_ALPHA", default_value_t = 1.0)]
    alpha: f64,

    /// Weight of the entropy baseline E_norm
    #[arg(long, env = "CORRIDOR_BETA", default_value_t = 1.0)]
    beta: f64,

    /// Miller-Rabin rounds (false-positive bound 4^-rounds)
    #[arg(long, env = "CORRIDOR_ROUNDS", default_value_t = 8,
          value_parser = clap::value_parser!(u32).range(1..))]
    rounds: u32,

    /// Sliding window size of the frequency model, in blocks
    #[arg(long, env = "CORRIDOR_WIN", default_value_t = 128,
          value_parser = clap::value_parser!(u64).range(1..))]
    win: u64,

    /// Seed for Miller-Rabin witness selection (random if unset)
    #[arg(long, env = "CORRIDOR_SEED")]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Also print every confirmed prime
    #[arg(long)]
    list: bool,

    /// Seconds between progress log lines (0 disables the reporter)
    #[arg(long, env = "CORRIDOR_REPORT_INTERVAL", default_value_t = 30)]
    report_interval: u64,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Structured logging on stderr: LOG_FORMAT=json for log shippers, human-readable otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::run(&cli)
}
