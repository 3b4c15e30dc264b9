//! # Model — Online Corridor Frequency Estimate
//!
//! Tracks how often each corridor residue has recently produced a confirmed
//! prime. The state is a FIFO window of up to `W` per-block snapshots plus a
//! running aggregate equal to the element-wise sum of the snapshots currently
//! in the window. Pushing into a full window evicts the oldest snapshot and
//! subtracts its counts first.
//!
//! The probability estimate is Laplace-smoothed over the 8 corridors and falls
//! back to the uniform prior `1/8` while the window holds no confirmed primes.
//!
//! Only the primes the driver actually confirmed are fed back, i.e. the
//! tested top-k subset of each block, never all 8 wheel positions.

use rug::Integer;
use std::collections::VecDeque;

use crate::wheel::{self, RESIDUES};

/// Default sliding window size, in blocks.
pub const DEFAULT_WINDOW: usize = 128;

/// Confirmed-prime counts per corridor for one block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrequencySnapshot {
    counts: [u32; 8],
}

impl FrequencySnapshot {
    /// Count the corridor residues of `primes` relative to `base`.
    /// Values whose offset is not a corridor residue are ignored.
    pub fn from_block(base: &Integer, primes: &[Integer]) -> Self {
        let mut snap = FrequencySnapshot::default();
        for p in primes {
            let offset = Integer::from(p - base).mod_u(wheel::WHEEL);
            if let Some(idx) = wheel::corridor_index(offset) {
                snap.counts[idx] += 1;
            }
        }
        snap
    }

    /// Count for corridor `residue` (0 for non-corridor residues).
    pub fn get(&self, residue: u32) -> u32 {
        wheel::corridor_index(residue).map_or(0, |i| self.counts[i])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Sliding-window residue frequency estimator. Owned by a single search.
#[derive(Debug, Clone)]
pub struct LocalFrequencyModel {
    capacity: usize,
    window: VecDeque<FrequencySnapshot>,
    aggregate: [u64; 8],
}

impl Default for LocalFrequencyModel {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl LocalFrequencyModel {
    /// New empty model. A window of 0 is treated as 1.
    pub fn new(window: usize) -> Self {
        let capacity = window.max(1);
        LocalFrequencyModel {
            capacity,
            window: VecDeque::with_capacity(capacity),
            aggregate: [0; 8],
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of snapshots currently held.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Record the primes confirmed in the block at `base`. An empty slice still
    /// consumes a window slot.
    pub fn update(&mut self, base: &Integer, confirmed: &[Integer]) {
        self.push(FrequencySnapshot::from_block(base, confirmed));
    }

    /// Append a snapshot, evicting the oldest when the window is full.
    pub fn push(&mut self, snapshot: FrequencySnapshot) {
        if self.window.len() == self.capacity {
            if let Some(old) = self.window.pop_front() {
                for (agg, &c) in self.aggregate.iter_mut().zip(old.counts.iter()) {
                    *agg -= c as u64;
                }
            }
        }
        for (agg, &c) in self.aggregate.iter_mut().zip(snapshot.counts.iter()) {
            *agg += c as u64;
        }
        self.window.push_back(snapshot);
    }

    /// Aggregate count for corridor `residue` across the window.
    pub fn count(&self, residue: u32) -> u64 {
        wheel::corridor_index(residue).map_or(0, |i| self.aggregate[i])
    }

    /// Sum of the aggregate over all corridors.
    pub fn total(&self) -> u64 {
        self.aggregate.iter().sum()
    }

    /// Iterate `(residue, aggregate count)` in ascending residue order.
    pub fn counts(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        RESIDUES.iter().copied().zip(self.aggregate.iter().copied())
    }

    /// Snapshots in the window, oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = &FrequencySnapshot> {
        self.window.iter()
    }

    /// Smoothed probability that `candidate`'s corridor yields a prime.
    pub fn probability(&self, candidate: &Integer) -> f64 {
        self.residue_probability(wheel::residue(candidate))
    }

    /// Same as [`probability`](Self::probability), keyed by residue.
    pub fn residue_probability(&self, residue: u32) -> f64 {
        let classes = RESIDUES.len() as f64;
        let total = self.total();
        if total == 0 {
            return 1.0 / classes;
        }
        (self.count(residue) as f64 + 1.0) / (total as f64 + classes)
    }
}
