//! # Scorer — Candidate Ranking and Top-k Selection
//!
//! Each candidate of a block is scored as
//!
//! ```text
//! S(c) = alpha · P_log(c) + beta · E_norm(base)
//! ```
//!
//! and the block's candidates are ordered by descending score, ties going to
//! the larger candidate. The first `k` of that ordering are the only ones the
//! driver hands to the primality tester.

use rug::Integer;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::model::LocalFrequencyModel;
use crate::wheel;

/// Non-negative blend weights for the two score terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub alpha: f64,
    pub beta: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            alpha: 1.0,
            beta: 1.0,
        }
    }
}

/// A wheel candidate with its corridor residue and ranking score.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub value: Integer,
    pub residue: u32,
    pub score: f64,
}

impl Candidate {
    /// Descending score, then descending value.
    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.value.cmp(&self.value))
    }
}

pub struct Scorer {
    weights: ScoreWeights,
}

impl Scorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Scorer { weights }
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Score of a single candidate given the block's entropy baseline.
    pub fn score(&self, model: &LocalFrequencyModel, candidate: &Integer, entropy_norm: f64) -> f64 {
        self.weights.alpha * model.probability(candidate) + self.weights.beta * entropy_norm
    }

    /// Score every candidate and return them in rank order.
    pub fn rank(
        &self,
        model: &LocalFrequencyModel,
        candidates: Vec<Integer>,
        entropy_norm: f64,
    ) -> Vec<Candidate> {
        let mut scored: Vec<Candidate> = candidates
            .into_iter()
            .map(|value| Candidate {
                residue: wheel::residue(&value),
                score: self.score(model, &value, entropy_norm),
                value,
            })
            .collect();
        scored.sort_by(Candidate::rank_cmp);
        scored
    }

    /// The best `k` candidates in rank order; all of them if fewer than `k`.
    pub fn top_k(
        &self,
        model: &LocalFrequencyModel,
        candidates: Vec<Integer>,
        entropy_norm: f64,
        k: usize,
    ) -> Vec<Candidate> {
        let mut ranked = self.rank(model, candidates, entropy_norm);
        ranked.truncate(k);
        ranked
    }
}
