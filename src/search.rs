//! # Search — Block-by-Block Corridor Driver
//!
//! Walks the requested range one 30-wide block at a time:
//!
//! 1. Generate the block's 8 corridor candidates and keep those in range.
//! 2. Skip the block if none remain (no scoring, no model update).
//! 3. Rank the survivors with the scorer and keep the top `k`.
//! 4. Confirm each selected candidate with Miller–Rabin.
//! 5. Feed the block's confirmed primes (possibly none) back into the model.
//!
//! 2, 3 and 5 divide the wheel modulus and are never candidates, so when they
//! fall inside the range they are tested up front, before the first block.
//! They count towards `tested` but never reach the frequency model.
//!
//! The model is created fresh for every `run` and lives only inside the
//! driver; nothing persists between searches.

use anyhow::{ensure, Result};
use rug::ops::Pow;
use rug::Integer;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::entropy::entropy_norm;
use crate::model::{LocalFrequencyModel, DEFAULT_WINDOW};
use crate::primality::{MillerRabin, RandomWitnesses, WitnessSource, DEFAULT_ROUNDS};
use crate::progress::Progress;
use crate::scorer::{Candidate, ScoreWeights, Scorer};
use crate::wheel::{self, WHEEL, WHEEL_PRIMES};

/// Default number of candidates confirmed per block.
pub const DEFAULT_K: usize = 3;

/// Number of leading primes kept in [`SearchReport::first_found`].
pub const FIRST_FOUND_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Candidates confirmed per block.
    pub k: usize,
    /// Weight of the learned corridor probability.
    pub alpha: f64,
    /// Weight of the entropy baseline.
    pub beta: f64,
    /// Miller–Rabin rounds.
    pub rounds: u32,
    /// Sliding window size, in blocks.
    pub window: usize,
    /// Witness RNG seed; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            k: DEFAULT_K,
            alpha: 1.0,
            beta: 1.0,
            rounds: DEFAULT_ROUNDS,
            window: DEFAULT_WINDOW,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.k >= 1, "k must be at least 1 (got {})", self.k);
        ensure!(self.rounds >= 1, "rounds must be at least 1 (got {})", self.rounds);
        ensure!(self.window >= 1, "window must be at least 1 (got {})", self.window);
        ensure!(
            self.alpha.is_finite() && self.alpha >= 0.0,
            "alpha must be a finite non-negative number (got {})",
            self.alpha
        );
        ensure!(
            self.beta.is_finite() && self.beta >= 0.0,
            "beta must be a finite non-negative number (got {})",
            self.beta
        );
        Ok(())
    }

    pub fn weights(&self) -> ScoreWeights {
        ScoreWeights {
            alpha: self.alpha,
            beta: self.beta,
        }
    }

    /// Witness source for this configuration.
    pub fn witnesses(&self) -> RandomWitnesses {
        match self.seed {
            Some(seed) => RandomWitnesses::seeded(seed),
            None => RandomWitnesses::from_entropy(),
        }
    }
}

/// Inclusive search interval, normalised so `2 <= start`.
/// `stop < start` means the range is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRange {
    pub start: Integer,
    pub stop: Integer,
}

impl SearchRange {
    /// Order the endpoints and clamp the lower one to 2.
    pub fn new(a: Integer, b: Integer) -> Self {
        let (start, stop) = if a <= b { (a, b) } else { (b, a) };
        let start = if start < 2 { Integer::from(2) } else { start };
        SearchRange { start, stop }
    }

    /// `[10^min(x, y), 10^max(x, y)]`.
    pub fn from_exponents(x: u32, y: u32) -> Self {
        SearchRange::new(
            Integer::from(10u32).pow(x.min(y)),
            Integer::from(10u32).pow(x.max(y)),
        )
    }

    pub fn contains(&self, n: &Integer) -> bool {
        *n >= self.start && *n <= self.stop
    }

    pub fn is_empty(&self) -> bool {
        self.stop < self.start
    }
}

/// What happened inside one non-empty block.
#[derive(Debug, Clone)]
pub struct BlockOutcome {
    pub base: Integer,
    /// Candidates handed to the tester, in rank order.
    pub selected: Vec<Candidate>,
    /// Selected candidates that passed, in rank order.
    pub confirmed: Vec<Integer>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchReport {
    /// Numbers handed to the primality tester.
    pub tested: Integer,
    /// Confirmed probable primes in discovery order.
    pub primes: Vec<Integer>,
    /// The first (up to) four confirmed primes.
    pub first_found: Vec<Integer>,
    /// Blocks that produced at least one in-range candidate.
    pub blocks_scored: u64,
    /// Blocks with no in-range candidate.
    pub blocks_skipped: u64,
    /// Set when a stop request ended the search early.
    pub interrupted: bool,
}

impl SearchReport {
    pub fn found(&self) -> usize {
        self.primes.len()
    }

    fn record(&mut self, prime: Integer) {
        if self.first_found.len() < FIRST_FOUND_LEN {
            self.first_found.push(prime.clone());
        }
        self.primes.push(prime);
    }
}

pub struct SearchDriver<W: WitnessSource> {
    k: usize,
    window: usize,
    scorer: Scorer,
    tester: MillerRabin,
    witnesses: W,
    model: LocalFrequencyModel,
}

impl<W: WitnessSource> SearchDriver<W> {
    pub fn new(config: &SearchConfig, witnesses: W) -> Self {
        SearchDriver {
            k: config.k,
            window: config.window,
            scorer: Scorer::new(config.weights()),
            tester: MillerRabin::new(config.rounds),
            witnesses,
            model: LocalFrequencyModel::new(config.window),
        }
    }

    /// The frequency model as left by the last block processed.
    pub fn model(&self) -> &LocalFrequencyModel {
        &self.model
    }

    pub fn witnesses(&self) -> &W {
        &self.witnesses
    }

    /// Search `range` from scratch. With a `progress` handle, counters are
    /// updated per block and a stop request ends the loop between blocks.
    pub fn run(&mut self, range: &SearchRange, progress: Option<&Progress>) -> SearchReport {
        self.model = LocalFrequencyModel::new(self.window);
        let mut report = SearchReport::default();

        info!(
            start = %range.start,
            stop = %range.stop,
            k = self.k,
            alpha = self.scorer.weights().alpha,
            beta = self.scorer.weights().beta,
            rounds = self.tester.rounds(),
            window = self.window,
            "corridor search starting"
        );

        for p in WHEEL_PRIMES {
            let n = Integer::from(p);
            if !range.contains(&n) {
                continue;
            }
            report.tested += 1u32;
            if self.tester.is_probable_prime(&n, &mut self.witnesses) {
                debug!(prime = p, "wheel prime confirmed");
                report.record(n);
            }
        }

        let mut base = wheel::block_base(&range.start);
        while base <= range.stop {
            if progress.is_some_and(|p| p.is_stop_requested()) {
                info!(base = %base, "stop requested, ending search");
                report.interrupted = true;
                break;
            }

            match self.search_block(&base, range) {
                Some(outcome) => {
                    report.blocks_scored += 1;
                    report.tested += outcome.selected.len() as u64;
                    if let Some(p) = progress {
                        p.record_block(
                            format!("block {}", outcome.base),
                            outcome.selected.len() as u64,
                            outcome.confirmed.len() as u64,
                        );
                    }
                    for prime in outcome.confirmed {
                        report.record(prime);
                    }
                }
                None => report.blocks_skipped += 1,
            }

            base += WHEEL;
        }

        info!(
            tested = %report.tested,
            found = report.found(),
            blocks = report.blocks_scored,
            skipped = report.blocks_skipped,
            interrupted = report.interrupted,
            "corridor search complete"
        );
        report
    }

    /// Process the block at `base`. Returns `None`, leaving the model
    /// untouched, when no candidate of the block lies in `range`.
    pub fn search_block(&mut self, base: &Integer, range: &SearchRange) -> Option<BlockOutcome> {
        let in_range: Vec<Integer> = wheel::candidates(base)
            .into_iter()
            .filter(|c| range.contains(c))
            .collect();
        if in_range.is_empty() {
            return None;
        }

        let e_norm = entropy_norm(base);
        let selected = self.scorer.top_k(&self.model, in_range, e_norm, self.k);

        let mut confirmed = Vec::new();
        for cand in &selected {
            if self.tester.is_probable_prime(&cand.value, &mut self.witnesses) {
                confirmed.push(cand.value.clone());
            }
        }

        debug!(
            base = %base,
            e_norm,
            selected = ?selected.iter().map(|c| c.value.to_string()).collect::<Vec<_>>(),
            confirmed = confirmed.len(),
            "block scored"
        );

        self.model.update(base, &confirmed);
        Some(BlockOutcome {
            base: base.clone(),
            selected,
            confirmed,
        })
    }
}

/// Run a complete search with witnesses drawn per `config.seed`.
pub fn search(range: &SearchRange, config: &SearchConfig) -> SearchReport {
    SearchDriver::new(config, config.witnesses()).run(range, None)
}
