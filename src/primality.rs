//! # Primality — Miller–Rabin Confirmation
//!
//! Probabilistic compositeness test over `rug::Integer`. After trial division
//! by the primes below 30, `n - 1` is written as `d · 2^s` with `d` odd and
//! `rounds` witnesses are drawn from `[2, n-2]`. Each witness either passes
//! (`a^d ≡ ±1`, or some `a^(d·2^j) ≡ -1` for `j < s`) or proves `n` composite,
//! which ends the test immediately.
//!
//! A composite survives a single uniformly random witness with probability at
//! most 1/4, so the false-positive rate is bounded by `4^-rounds`.
//!
//! ## Witness Sources
//!
//! Witness selection goes through the [`WitnessSource`] trait so tests can
//! replay fixed witnesses. [`RandomWitnesses`] wraps GMP's Mersenne Twister
//! (`rug::rand::RandState`) and is reproducible when seeded.

use rug::rand::RandState;
use rug::Integer;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default number of Miller–Rabin rounds.
pub const DEFAULT_ROUNDS: u32 = 8;

/// Primes handled by trial division before the witness rounds.
pub const SMALL_PRIMES: [u32; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// Supplies Miller–Rabin witnesses.
pub trait WitnessSource {
    /// A witness in `[2, n-2]`. Only called with `n > 4`.
    fn next_witness(&mut self, n: &Integer) -> Integer;
}

/// Uniform witnesses from a GMP Mersenne Twister.
pub struct RandomWitnesses {
    state: RandState<'static>,
}

impl RandomWitnesses {
    /// Deterministic stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        let mut state = RandState::new();
        state.seed(&Integer::from(seed));
        RandomWitnesses { state }
    }

    /// Seeded from the system clock.
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::seeded(nanos ^ (std::process::id() as u64).rotate_left(32))
    }
}

impl WitnessSource for RandomWitnesses {
    fn next_witness(&mut self, n: &Integer) -> Integer {
        // [0, n-3) + 2 = [2, n-2]
        let span = Integer::from(n - 3u32);
        span.random_below(&mut self.state) + 2u32
    }
}

/// Replays a fixed witness list cyclically. Each value is folded into
/// `[2, n-2]` so any list is valid for any `n > 4`.
pub struct FixedWitnesses {
    witnesses: Vec<Integer>,
    next: usize,
}

impl FixedWitnesses {
    pub fn new<I, T>(witnesses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        Integer: From<T>,
    {
        FixedWitnesses {
            witnesses: witnesses.into_iter().map(Integer::from).collect(),
            next: 0,
        }
    }

    /// Witnesses handed out so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl WitnessSource for FixedWitnesses {
    fn next_witness(&mut self, n: &Integer) -> Integer {
        let span = Integer::from(n - 3u32);
        let raw = match self.witnesses.len() {
            0 => Integer::new(),
            len => self.witnesses[self.next % len].clone(),
        };
        self.next += 1;
        let mut a = Integer::from(&raw - 2u32) % &span;
        if a < 0 {
            a += &span;
        }
        a + 2u32
    }
}

/// Upper bound on the probability a composite passes `rounds` witnesses.
pub fn false_positive_bound(rounds: u32) -> f64 {
    0.25f64.powi(rounds.min(i32::MAX as u32) as i32)
}

/// Miller–Rabin tester with a fixed round count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MillerRabin {
    rounds: u32,
}

impl Default for MillerRabin {
    fn default() -> Self {
        MillerRabin::new(DEFAULT_ROUNDS)
    }
}

impl MillerRabin {
    pub fn new(rounds: u32) -> Self {
        MillerRabin { rounds }
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// `true` if `n` is a probable prime, `false` if it is certainly composite
    /// or below 2.
    pub fn is_probable_prime(&self, n: &Integer, witnesses: &mut dyn WitnessSource) -> bool {
        if *n < 2 {
            return false;
        }
        for &p in &SMALL_PRIMES {
            if *n == p {
                return true;
            }
            if n.is_divisible_u(p) {
                return false;
            }
        }

        // n - 1 = d · 2^s, d odd
        let n_minus_1 = Integer::from(n - 1u32);
        let s = n_minus_1.find_one(0).unwrap_or(0);
        let d = Integer::from(&n_minus_1 >> s);

        for _ in 0..self.rounds {
            let a = witnesses.next_witness(n);
            if !witness_passes(a, &d, s, n, &n_minus_1) {
                return false;
            }
        }
        true
    }
}

/// One Miller–Rabin round for witness `a`.
fn witness_passes(a: Integer, d: &Integer, s: u32, n: &Integer, n_minus_1: &Integer) -> bool {
    let mut x = a;
    if !x.pow_mod_mut(d, n) {
        return false;
    }
    if x == 1 || x == *n_minus_1 {
        return true;
    }
    for _ in 1..s {
        x.square_mut();
        x %= n;
        if x == *n_minus_1 {
            return true;
        }
    }
    false
}
