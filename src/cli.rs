//! # CLI Execution
//!
//! Kept out of `main.rs` so the entry point stays slim: turns parsed
//! arguments into a `SearchRange` and `SearchConfig`, runs the driver with a
//! progress reporter attached, and prints the report.

use anyhow::{bail, Context, Result};
use corridor::progress::Progress;
use corridor::report;
use corridor::{SearchConfig, SearchDriver, SearchRange};
use std::time::{Duration, Instant};
use tracing::info;

use super::Cli;

/// Build the range from whichever selector was given.
fn search_range(cli: &Cli) -> Result<SearchRange> {
    if let Some(values) = &cli.range {
        return match values.as_slice() {
            [a, b] => Ok(SearchRange::new(a.clone(), b.clone())),
            _ => bail!("--range takes exactly two integers"),
        };
    }
    if let Some(values) = &cli.exp {
        return match values.as_slice() {
            [x, y] => Ok(SearchRange::from_exponents(*x, *y)),
            _ => bail!("--exp takes exactly two exponents"),
        };
    }
    bail!("one of --range or --exp is required")
}

fn search_config(cli: &Cli) -> Result<SearchConfig> {
    let config = SearchConfig {
        k: usize::try_from(cli.k).context("k does not fit in usize")?,
        alpha: cli.alpha,
        beta: cli.beta,
        rounds: cli.rounds,
        window: usize::try_from(cli.win).context("window does not fit in usize")?,
        seed: cli.seed,
    };
    config.validate()?;
    Ok(config)
}

pub fn run(cli: &Cli) -> Result<()> {
    let range = search_range(cli)?;
    let config = search_config(cli)?;

    let progress = Progress::new();
    let reporter = (cli.report_interval > 0)
        .then(|| progress.start_reporter(Duration::from_secs(cli.report_interval)));

    let started = Instant::now();
    let mut driver = SearchDriver::new(&config, config.witnesses());
    let result = driver.run(&range, Some(&*progress));
    let elapsed = started.elapsed();

    progress.stop();
    if let Some(handle) = reporter {
        handle.thread().unpark();
        let _ = handle.join();
    }

    let output = if cli.json {
        report::render_json(&config, &result, elapsed, cli.list)
            .context("failed to serialise report")?
    } else {
        report::render_text(&config, &result, elapsed, cli.list)
    };
    println!("{}", output.trim_end());

    info!(elapsed_ms = elapsed.as_millis() as u64, "done");
    Ok(())
}
