//! End-to-end coverage runs: the driver loop must terminate with a
//! covering array and consistent bookkeeping at every step.

use weft_engine::{Array, RowHeuristic};
use weft_test_utils::{check_invariants, check_terminal_flags, pairwise_binary, strength_one};

/// Drive `add_row` until completion, checking invariants after every
/// commit. Panics if the score fails to reach zero within `cap` rows.
fn run_to_completion(array: &mut Array, cap: usize) {
    array.add_random_row().unwrap();
    check_invariants(array);
    while array.score() > 0 {
        assert!(
            array.num_rows() < cap,
            "no completion after {cap} rows (score {})",
            array.score(),
        );
        array.add_row().unwrap();
        check_invariants(array);
    }
    check_terminal_flags(array);
}

#[test]
fn pairwise_binary_terminates_quickly() {
    for seed in [0, 1, 7, 42] {
        let mut array = Array::build(pairwise_binary(seed)).unwrap();
        run_to_completion(&mut array, 32);
        // Optimal is 4-5 rows; the greedy construction stays in the
        // same neighbourhood.
        assert!(array.num_rows() <= 12, "took {} rows", array.num_rows());
    }
}

#[test]
fn every_pair_appears_in_some_row() {
    let mut array = Array::build(pairwise_binary(3)).unwrap();
    run_to_completion(&mut array, 32);

    let rows: Vec<Vec<u32>> = array.rows().map(<[u32]>::to_vec).collect();
    for (c1, c2) in [(0, 1), (0, 2), (1, 2)] {
        for v1 in 0..2u32 {
            for v2 in 0..2u32 {
                assert!(
                    rows.iter().any(|r| r[c1] == v1 && r[c2] == v2),
                    "pair ({c1}={v1}, {c2}={v2}) never appears",
                );
            }
        }
    }
}

#[test]
fn strength_one_completes_in_exactly_level_count_rows() {
    // At strength 1 the greedy seed always picks an uncovered level per
    // factor, so four-level factors finish in exactly four rows, from
    // any seed.
    for seed in [0, 5, 99] {
        let mut array = Array::build(strength_one(seed)).unwrap();
        array.add_random_row().unwrap();
        while array.score() > 0 {
            array.add_row_with(RowHeuristic::Coverage).unwrap();
            check_invariants(&array);
        }
        check_terminal_flags(&array);
        assert_eq!(array.num_rows(), 4);
    }
}

#[test]
fn finished_array_dumps_one_line_per_row() {
    let mut array = Array::build(pairwise_binary(11)).unwrap();
    run_to_completion(&mut array, 32);

    let dump = array.to_string();
    assert_eq!(dump.lines().count(), array.num_rows());
    for line in dump.lines() {
        assert_eq!(line.split('\t').count(), 3);
    }
}
