//! # Wheel — Mod-30 Corridor Candidates
//!
//! Every integer above 5 that is coprime to 30 = 2·3·5 lies in one of eight
//! residue classes ("corridors"). A block is the span `[base, base + 29]` for
//! a multiple-of-30 `base`; its candidates are `base + r` for each corridor
//! residue `r`, so only 8 of every 30 integers are ever considered.
//!
//! 2, 3 and 5 divide the modulus and never appear as wheel candidates; the
//! search driver handles them separately.

use rug::Integer;

/// Wheel modulus (2·3·5).
pub const WHEEL: u32 = 30;

/// Residues coprime to 30, ascending.
pub const RESIDUES: [u32; 8] = [1, 7, 11, 13, 17, 19, 23, 29];

/// Primes dividing the wheel modulus. Never produced as wheel candidates.
pub const WHEEL_PRIMES: [u32; 3] = [2, 3, 5];

// Map residue → index into RESIDUES (255 = not a corridor)
const RES_TO_IDX: [u8; 30] = [
    255, 0, 255, 255, 255, 255, 255, 1, 255, 255, 255, 2, 255, 3, 255, 255, 255, 4, 255, 5, 255,
    255, 255, 6, 255, 255, 255, 255, 255, 7,
];

/// Index of `residue` in [`RESIDUES`], or `None` if it is not coprime to 30.
pub fn corridor_index(residue: u32) -> Option<usize> {
    match RES_TO_IDX.get(residue as usize) {
        Some(&idx) if idx != 255 => Some(idx as usize),
        _ => None,
    }
}

/// `n mod 30`, always in `[0, 30)`.
pub fn residue(n: &Integer) -> u32 {
    n.mod_u(WHEEL)
}

/// Round `n` down to the nearest multiple of 30.
pub fn block_base(n: &Integer) -> Integer {
    Integer::from(n - residue(n))
}

/// The 8 corridor candidates of the block starting at `base`, ascending.
pub fn candidates(base: &Integer) -> [Integer; 8] {
    RESIDUES.map(|r| Integer::from(base + r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rug::ops::Pow;

    #[test]
    fn residues_are_exactly_the_units_mod_30() {
        let units: Vec<u32> = (0..WHEEL)
            .filter(|&r| Integer::from(r).gcd(&Integer::from(WHEEL)) == 1)
            .collect();
        assert_eq!(units, RESIDUES.to_vec());
    }

    #[test]
    fn corridor_index_round_trips() {
        for (i, &r) in RESIDUES.iter().enumerate() {
            assert_eq!(corridor_index(r), Some(i));
        }
        for r in [0u32, 2, 3, 5, 9, 15, 25, 28, 30, 31] {
            assert_eq!(corridor_index(r), None, "{} is not a corridor", r);
        }
    }

    #[test]
    fn candidates_of_block_zero() {
        let got: Vec<u32> = candidates(&Integer::new())
            .iter()
            .map(|c| c.to_u32().unwrap())
            .collect();
        assert_eq!(got, vec![1, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn candidates_of_large_block() {
        let base = Integer::from(10u32).pow(40) * 30u32;
        let cands = candidates(&base);
        for (c, &r) in cands.iter().zip(RESIDUES.iter()) {
            assert_eq!(residue(c), r);
            assert_eq!(Integer::from(c - &base), r);
        }
    }

    #[test]
    fn block_base_rounds_down() {
        assert_eq!(block_base(&Integer::from(0)), 0);
        assert_eq!(block_base(&Integer::from(29)), 0);
        assert_eq!(block_base(&Integer::from(30)), 30);
        assert_eq!(block_base(&Integer::from(101)), 90);
        assert_eq!(block_base(&Integer::from(200)), 180);
    }
}
