//! Text and JSON renderings of a finished search.

use serde::Serialize;
use std::fmt::Write;
use std::time::Duration;

use crate::primality::false_positive_bound;
use crate::search::{SearchConfig, SearchReport};

/// JSON shape of a report. Integers are decimal strings so values beyond
/// `u64` survive the round trip through any JSON reader.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub k: usize,
    pub alpha: f64,
    pub beta: f64,
    pub window: usize,
    pub rounds: u32,
    pub seed: Option<u64>,
    pub tested: String,
    pub found: usize,
    pub first_found: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primes: Option<Vec<String>>,
    pub false_positive_bound: f64,
    pub blocks_scored: u64,
    pub blocks_skipped: u64,
    pub interrupted: bool,
    pub elapsed_secs: f64,
}

impl ReportSummary {
    pub fn new(
        config: &SearchConfig,
        report: &SearchReport,
        elapsed: Duration,
        include_primes: bool,
    ) -> Self {
        ReportSummary {
            k: config.k,
            alpha: config.alpha,
            beta: config.beta,
            window: config.window,
            rounds: config.rounds,
            seed: config.seed,
            tested: report.tested.to_string(),
            found: report.found(),
            first_found: report.first_found.iter().map(|p| p.to_string()).collect(),
            primes: include_primes.then(|| report.primes.iter().map(|p| p.to_string()).collect()),
            false_positive_bound: false_positive_bound(config.rounds),
            blocks_scored: report.blocks_scored,
            blocks_skipped: report.blocks_skipped,
            interrupted: report.interrupted,
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }
}

/// Human-readable summary; `include_primes` appends the full list.
pub fn render_text(
    config: &SearchConfig,
    report: &SearchReport,
    elapsed: Duration,
    include_primes: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "k per block: {}  |  alpha={}  beta={}  |  window={}",
        config.k, config.alpha, config.beta, config.window
    );
    let _ = writeln!(out, "Numbers tested (top-k): {}", report.tested);
    let _ = writeln!(out, "Probable primes found: {}", report.found());
    if report.first_found.is_empty() {
        let _ = writeln!(out, "First 4 found: (none)");
    } else {
        let _ = writeln!(out, "First 4 found:");
        for p in &report.first_found {
            let _ = writeln!(out, "  {}  (Prob. ≈ 1 - 4^-{})", p, config.rounds);
        }
    }
    if report.interrupted {
        let _ = writeln!(out, "Search interrupted before the end of the range.");
    }
    if include_primes && !report.primes.is_empty() {
        let _ = writeln!(out, "All probable primes:");
        for p in &report.primes {
            let _ = writeln!(out, "  {}", p);
        }
    }
    let _ = writeln!(out, "Elapsed: {:.3} s", elapsed.as_secs_f64());
    out
}

pub fn render_json(
    config: &SearchConfig,
    report: &SearchReport,
    elapsed: Duration,
    include_primes: bool,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ReportSummary::new(config, report, elapsed, include_primes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rug::Integer;

    fn sample() -> SearchReport {
        SearchReport {
            tested: Integer::from(12),
            primes: [101u32, 103, 107, 109, 113]
                .iter()
                .map(|&p| Integer::from(p))
                .collect(),
            first_found: [101u32, 103, 107, 109]
                .iter()
                .map(|&p| Integer::from(p))
                .collect(),
            blocks_scored: 4,
            blocks_skipped: 0,
            interrupted: false,
        }
    }

    #[test]
    fn text_report_echoes_config_and_counts() {
        let text = render_text(
            &SearchConfig::default(),
            &sample(),
            Duration::from_millis(1234),
            false,
        );
        assert!(text.contains("k per block: 3"));
        assert!(text.contains("alpha=1  beta=1"));
        assert!(text.contains("window=128"));
        assert!(text.contains("Numbers tested (top-k): 12"));
        assert!(text.contains("Probable primes found: 5"));
        assert!(text.contains("  101  (Prob. ≈ 1 - 4^-8)"));
        assert!(!text.contains("  113  (Prob."));
        assert!(text.contains("Elapsed: 1.234 s"));
        assert!(!text.contains("All probable primes"));
    }

    #[test]
    fn text_report_without_primes() {
        let text = render_text(
            &SearchConfig::default(),
            &SearchReport::default(),
            Duration::ZERO,
            true,
        );
        assert!(text.contains("First 4 found: (none)"));
        assert!(text.contains("Elapsed: 0.000 s"));
    }

    #[test]
    fn text_report_lists_all_primes_on_request() {
        let text = render_text(&SearchConfig::default(), &sample(), Duration::ZERO, true);
        assert!(text.contains("All probable primes:\n  101\n  103\n  107\n  109\n  113\n"));
    }

    #[test]
    fn json_report_uses_decimal_strings() {
        let mut report = sample();
        report.tested = Integer::from(u64::MAX) * 4u32;
        let json = render_json(&SearchConfig::default(), &report, Duration::ZERO, false).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["tested"], "73786976294838206460");
        assert_eq!(v["found"], 5);
        assert_eq!(v["first_found"][0], "101");
        assert!(v.get("primes").is_none());
        assert_eq!(v["false_positive_bound"], 1.0 / 65536.0);
    }
}
