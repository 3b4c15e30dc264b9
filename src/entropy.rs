//! # Entropy — Theoretical Density Baseline
//!
//! A data-independent measure of how unconstrained candidate density is at
//! magnitude `n`:
//!
//! ```text
//! E(n)      = ln C(30, 8) + ln(n / ln n)
//! E_norm(n) = E(n) / max(E(n), 1)
//! ```
//!
//! `C(30, 8) = 5 852 925` counts the ways to pick 8 residue classes out of 30.
//! Logarithms are taken from the mantissa/exponent split of the integer, so
//! `n` may be far larger than `f64::MAX`.

use rug::Integer;
use std::f64::consts::LN_2;

/// C(30, 8).
pub const RESIDUE_CLASS_COUNT: u64 = 5_852_925;

/// Natural logarithm of an arbitrarily large positive integer.
pub fn ln_integer(n: &Integer) -> f64 {
    let (mantissa, exp) = n.to_f64_exp();
    mantissa.ln() + exp as f64 * LN_2
}

/// Unnormalized baseline `E(n)`. Returns 0 for `n < 3`.
pub fn entropy(n: &Integer) -> f64 {
    if *n < 3 {
        return 0.0;
    }
    let ln_n = ln_integer(n);
    (RESIDUE_CLASS_COUNT as f64).ln() + (ln_n - ln_n.ln())
}

/// Normalized baseline in `[0, 1]`; 0 for `n < 3`.
pub fn entropy_norm(n: &Integer) -> f64 {
    let e = entropy(n);
    if e <= 0.0 {
        return 0.0;
    }
    e / e.max(1.0)
}
