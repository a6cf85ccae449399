//! End-to-end solver behaviour: outcomes, budgets, metrics, parallel parity.

use super::*;
use crate::cycle::verify_cycle;
use crate::testing::{Counting, TableHash};
use proptest::prelude::*;

/// Small search limits so hash-derived graphs stay fast under test.
fn quick(n: u32, k: u64) -> SolveCfg {
    SolveCfg {
        max_starts_per_bin: Some(16),
        step_budget: 2_000,
        ..SolveCfg::new(n, k)
    }
}

fn ring_cycle(table: &TableHash, n: u32, offset: u64) -> Vec<EdgeTriple> {
    let g = GraphView::new(table, n);
    (offset..offset + CYCLE_LEN as u64).map(|e| g.triple(e)).collect()
}

/// `two_rings` in bin 0 (edges 0..84) and again in bin 1 (edges 128..212)
/// on nodes shifted by 100.
fn rings_in_both_bins() -> TableHash {
    let mut t = TableHash::two_rings(7).0;
    let shifted: Vec<(u64, u64)> = t[..2 * CYCLE_LEN]
        .iter()
        .map(|&(u, v)| (u + 100, v + 100))
        .collect();
    t.extend(shifted);
    t.extend((128 + 2 * CYCLE_LEN as u64..256).map(|e| (e, e)));
    TableHash(t)
}

#[test]
fn smoke_zero_header_small_graph() {
    let cfg = SolveCfg {
        time_budget: Some(Duration::from_millis(50)),
        ..SolveCfg::new(8, 2)
    };
    let res = solve(&[0u8; 32], &cfg).unwrap();
    assert_eq!(res.found, res.outcome == Outcome::Found);
    assert_eq!(res.metrics.attempts, 1);
    assert!(res.metrics.edges_touched > 0);
    assert!(res.metrics.hashes_computed > 0);
    if res.found {
        assert!(verify_cycle(&[0u8; 32], 8, &res.cycle));
    } else {
        assert!(res.cycle.is_empty());
    }
}

#[test]
fn invalid_config_hashes_nothing() {
    let hash = Counting::new(TableHash::two_rings(7));
    let configs = [
        SolveCfg::new(7, 0),
        SolveCfg::new(0, 1),
        SolveCfg::new(64, 1),
        SolveCfg::new(63, 1),
    ];
    for cfg in configs {
        let err = solve_with(&hash, &cfg).unwrap_err();
        assert!(matches!(err, SolveError::InvalidConfig { .. }));
    }
    assert_eq!(hash.calls(), 0);
    assert!(solve(&[0u8; 65], &SolveCfg::new(8, 2)).is_err());
    assert!(solve(&[0u8; 32], &SolveCfg::new(63, 1)).is_err());
}

#[test]
fn finds_ring_in_single_bin() {
    let table = TableHash::two_rings(7);
    let res = solve_with(&table, &SolveCfg::new(7, 1)).unwrap();
    assert!(res.found);
    assert_eq!(res.outcome, Outcome::Found);
    assert_eq!(res.cycle, ring_cycle(&table, 7, 0));
    assert!(verify_with(&table, 7, &res.cycle));
    assert_eq!(res.metrics.edges_touched, 128);
    assert_eq!(res.metrics.candidates, 1);
    assert!(res.metrics.hashes_computed >= 4 * 128 + VERIFY_HASHES);
    assert!(res.peak_memory_estimate > 0);
}

#[test]
fn bin_local_degrees_can_miss_a_cycle() {
    // Split in two bins, no bin sees both rings whole, so trimming drops the
    // ring edges whose partner lives in the other bin.
    let table = TableHash::two_rings(7);
    let cfg = SolveCfg {
        max_attempts: 3,
        ..SolveCfg::new(7, 2)
    };
    let res = solve_with(&table, &cfg).unwrap();
    assert!(!res.found);
    assert_eq!(res.outcome, Outcome::Exhausted);
    assert!(res.cycle.is_empty());
    assert_eq!(res.metrics.attempts, 3);
    assert_eq!(res.metrics.edges_touched, 3 * 128);
}

#[test]
fn first_verified_bin_wins() {
    let table = rings_in_both_bins();
    let res = solve_with(&table, &SolveCfg::new(8, 2)).unwrap();
    assert!(res.found);
    assert_eq!(res.cycle, ring_cycle(&table, 8, 0));
    // Bin 1 is never examined.
    assert_eq!(res.metrics.edges_touched, 128);
}

#[test]
fn parallel_bins_report_the_sequential_cycle() {
    let table = rings_in_both_bins();
    let seq = solve_with(&table, &SolveCfg::new(8, 2)).unwrap();
    for threads in [2, 4] {
        let cfg = SolveCfg {
            threads,
            ..SolveCfg::new(8, 2)
        };
        let par = solve_with(&table, &cfg).unwrap();
        assert_eq!(par.outcome, seq.outcome);
        assert_eq!(par.cycle, seq.cycle);
    }
}

#[test]
fn parallel_matches_sequential_on_hashed_graph() {
    let header = [0x5au8; 32];
    let seq = solve(&header, &quick(10, 4)).unwrap();
    let par = solve(
        &header,
        &SolveCfg {
            threads: 3,
            ..quick(10, 4)
        },
    )
    .unwrap();
    assert_eq!(seq.found, par.found);
    assert_eq!(seq.cycle, par.cycle);
}

#[test]
fn zero_budget_stops_after_first_bin() {
    let cfg = SolveCfg {
        time_budget: Some(Duration::ZERO),
        max_attempts: 5,
        ..quick(16, 64)
    };
    let res = solve(&[1u8; 32], &cfg).unwrap();
    assert_ne!(res.outcome, Outcome::Exhausted);
    if res.outcome == Outcome::TimedOut {
        assert!(!res.found);
        assert_eq!(res.metrics.edges_touched, 1024);
        assert_eq!(res.metrics.attempts, 1);
    }
}

#[test]
fn zero_budget_parallel_times_out() {
    let cfg = SolveCfg {
        time_budget: Some(Duration::ZERO),
        threads: 2,
        ..quick(12, 8)
    };
    let res = solve(&[2u8; 32], &cfg).unwrap();
    assert_eq!(res.outcome, Outcome::TimedOut);
    assert!(!res.found);
}

#[test]
fn budget_bounds_wall_clock() {
    let budget = Duration::from_millis(20);
    let cfg = SolveCfg {
        time_budget: Some(budget),
        max_attempts: 1_000,
        ..quick(14, 256)
    };
    let res = solve(&[3u8; 32], &cfg).unwrap();
    if !res.found {
        assert_eq!(res.outcome, Outcome::TimedOut);
        assert!(res.elapsed >= budget);
        // One 64-edge bin of overrun is tiny; leave room for slow CI.
        assert!(res.elapsed < budget + Duration::from_secs(2));
    }
}

#[test]
fn repeated_solves_are_deterministic() {
    let cfg = SolveCfg {
        max_attempts: 2,
        seed: 17,
        ..quick(10, 2)
    };
    let a = solve(&[9u8; 32], &cfg).unwrap();
    let b = solve(&[9u8; 32], &cfg).unwrap();
    assert_eq!(a.outcome, b.outcome);
    assert_eq!(a.cycle, b.cycle);
    assert_eq!(a.metrics, b.metrics);
    if !a.found {
        assert_eq!(a.metrics.attempts, 2);
    }
}

#[test]
fn more_bins_than_edges_skips_empty_bins() {
    let table = TableHash::two_rings(7);
    let res = solve_with(&table, &SolveCfg::new(7, 1_000)).unwrap();
    assert_eq!(res.outcome, Outcome::Exhausted);
    assert_eq!(res.metrics.edges_touched, 128);
}

#[test]
fn trimming_charges_endpoint_hashes() {
    let hash = Counting::new(TableHash::two_rings(7));
    let cfg = SolveCfg {
        trim_rounds: 1,
        ..SolveCfg::new(7, 2)
    };
    let res = solve_with(&hash, &cfg).unwrap();
    assert_eq!(res.metrics.hashes_computed, hash.calls());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn any_found_cycle_verifies(
        header in proptest::collection::vec(any::<u8>(), 32),
        k in 1u64..4,
    ) {
        let res = solve(&header, &quick(9, k)).unwrap();
        prop_assert_eq!(res.found, !res.cycle.is_empty());
        if res.found {
            prop_assert!(verify_cycle(&header, 9, &res.cycle));
        }
    }
}
