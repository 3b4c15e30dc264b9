//! End-to-end driver scenarios through the public library API.

use corridor::primality::{FixedWitnesses, WitnessSource};
use corridor::progress::Progress;
use corridor::wheel;
use corridor::{search, SearchConfig, SearchDriver, SearchRange};
use rug::integer::IsPrime;
use rug::ops::Pow;
use rug::Integer;

fn range(a: u64, b: u64) -> SearchRange {
    SearchRange::new(Integer::from(a), Integer::from(b))
}

fn config(k: usize, window: usize) -> SearchConfig {
    SearchConfig {
        k,
        window,
        seed: Some(7),
        ..SearchConfig::default()
    }
}

fn sorted(values: &[Integer]) -> Vec<u64> {
    let mut v: Vec<u64> = values.iter().map(|p| p.to_u64().unwrap()).collect();
    v.sort_unstable();
    v
}

/// Counts how many times the tester asked for a witness.
struct CountingWitnesses {
    inner: FixedWitnesses,
    calls: usize,
}

impl WitnessSource for CountingWitnesses {
    fn next_witness(&mut self, n: &Integer) -> Integer {
        self.calls += 1;
        self.inner.next_witness(n)
    }
}

#[test]
fn primes_to_100_with_k_8() {
    let report = search(&range(2, 100), &config(8, 128));
    assert_eq!(
        sorted(&report.primes),
        vec![
            2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83,
            89, 97
        ]
    );
    assert_eq!(report.found(), 25);
    assert_eq!(report.first_found.len(), 4);
}

#[test]
fn k_3_window_4_on_100_to_200() {
    let report = search(&range(100, 200), &config(3, 4));
    let non_empty_blocks = 4u32; // 90, 120, 150, 180
    assert_eq!(report.tested, 3 * non_empty_blocks);
    assert_eq!(report.blocks_scored, u64::from(non_empty_blocks));
    assert_eq!(report.blocks_skipped, 0);
}

#[test]
fn discovery_order_is_block_order() {
    let report = search(&range(1_000, 5_000), &config(3, 16));
    // Blocks are visited in ascending order, so block bases never decrease
    let bases: Vec<Integer> = report.primes.iter().map(wheel::block_base).collect();
    for pair in bases.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    assert_eq!(&report.primes[..4], &report.first_found[..]);
}

#[test]
fn confirmed_primes_are_real_primes() {
    let report = search(&range(10_000, 20_000), &config(4, 32));
    assert!(report.found() > 0);
    for p in &report.primes {
        assert_ne!(p.is_probably_prime(30), IsPrime::No, "{} is composite", p);
    }
}

#[test]
fn same_seed_same_report() {
    let a = search(&range(50_000, 60_000), &config(2, 8));
    let b = search(&range(50_000, 60_000), &config(2, 8));
    assert_eq!(a, b);
}

#[test]
fn exponent_range_beyond_u64() {
    // [10^25, 10^25 + a few blocks] via an explicit range, and the exponent
    // constructor on the same magnitude.
    let start = Integer::from(10u32).pow(25);
    let stop = Integer::from(&start + 600u32);
    let report = search(&SearchRange::new(start.clone(), stop.clone()), &config(3, 8));
    for p in &report.primes {
        assert!(*p >= start && *p <= stop);
        assert_ne!(p.is_probably_prime(30), IsPrime::No);
    }
    assert!(report.tested > 0);

    let r = SearchRange::from_exponents(26, 25);
    assert_eq!(r.start, start);
    assert_eq!(r.stop, Integer::from(10u32).pow(26));
}

#[test]
fn witness_source_is_pluggable() {
    let cfg = config(3, 8);
    let mut driver = SearchDriver::new(
        &cfg,
        CountingWitnesses {
            inner: FixedWitnesses::new([2u32, 3, 5, 7]),
            calls: 0,
        },
    );
    let report = driver.run(&range(100, 400), None);
    assert!(report.found() > 0);
    // Every prime above 29 consumes all 8 rounds
    assert!(driver.witnesses().calls >= report.found() * 8);
}

#[test]
fn model_is_fresh_for_each_run() {
    let cfg = config(3, 4);
    let mut driver = SearchDriver::new(&cfg, cfg.witnesses());
    let first = driver.run(&range(100, 1_000), None);
    let mut other = SearchDriver::new(&cfg, cfg.witnesses());
    other.run(&range(5_000, 9_000), None);
    let second = other.run(&range(100, 1_000), None);
    assert_eq!(first, second);
}

#[test]
fn interrupted_search_returns_partial_report() {
    let progress = Progress::new();
    progress.request_stop();
    let cfg = config(3, 4);
    let mut driver = SearchDriver::new(&cfg, cfg.witnesses());
    let report = driver.run(&range(2, 1_000), Some(&*progress));
    assert!(report.interrupted);
    // Wheel primes are tested before the first block boundary check
    assert_eq!(report.tested, 3);
    assert!(driver.model().is_empty());
}
