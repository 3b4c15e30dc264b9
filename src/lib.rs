//! # corridor — Wheel-Corridor Probable-Prime Search
//!
//! Searches an integer interval for probable primes without testing every
//! candidate. Each 30-wide block contributes the 8 integers coprime to 30;
//! those are ranked by a blend of an online per-residue frequency estimate
//! and a magnitude-only entropy baseline, and only the top `k` per block are
//! confirmed with Miller–Rabin. Confirmed primes feed back into the
//! frequency model over a sliding window of blocks.
//!
//! This is an exploratory heuristic, not a primality oracle: it skips
//! candidates by design and its confirmations are probabilistic.
//!
//! ## Modules
//!
//! - [`wheel`] — mod-30 corridor candidates per block
//! - [`entropy`] — theoretical density baseline `E_norm`
//! - [`model`] — sliding-window residue frequency estimate `P_log`
//! - [`scorer`] — score blend and deterministic top-k selection
//! - [`primality`] — Miller–Rabin with injectable witness sources
//! - [`search`] — the block-iteration driver and its report
//! - [`progress`] — progress counters, reporter thread, stop signal
//! - [`report`] — text and JSON output

pub mod entropy;
pub mod model;
pub mod primality;
pub mod progress;
pub mod report;
pub mod scorer;
pub mod search;
pub mod wheel;

pub use model::{FrequencySnapshot, LocalFrequencyModel};
pub use primality::{FixedWitnesses, MillerRabin, RandomWitnesses, WitnessSource};
pub use scorer::{Candidate, ScoreWeights, Scorer};
pub use search::{search, SearchConfig, SearchDriver, SearchRange, SearchReport};
