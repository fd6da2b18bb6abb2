//! Clone isolation and determinism for look-ahead scoring.

use weft_core::Verbosity;
use weft_engine::Array;
use weft_test_utils::{check_invariants, mixed_levels, pairwise_binary};

#[test]
fn identically_seeded_arrays_stay_in_lockstep() {
    let mut a = Array::build(mixed_levels(314)).unwrap();
    let mut b = Array::build(mixed_levels(314)).unwrap();
    a.add_random_row().unwrap();
    b.add_random_row().unwrap();
    for _ in 0..3 {
        a.add_row().unwrap();
        b.add_row().unwrap();
    }
    assert_eq!(a.score(), b.score());
    assert_eq!(a.breakdown(), b.breakdown());
    let rows_a: Vec<Vec<u32>> = a.rows().map(<[u32]>::to_vec).collect();
    let rows_b: Vec<Vec<u32>> = b.rows().map(<[u32]>::to_vec).collect();
    assert_eq!(rows_a, rows_b);
}

#[test]
fn clone_tracks_the_original_until_diverged() {
    let mut array = Array::build(mixed_levels(2718)).unwrap();
    array.add_random_row().unwrap();
    array.add_row().unwrap();
    array.add_row().unwrap();

    // The clone carries the full state, including the RNG, so the same
    // next row falls out of both.
    let mut copy = array.clone();
    assert_eq!(copy.score(), array.score());
    array.add_row().unwrap();
    copy.add_row().unwrap();
    assert_eq!(copy.score(), array.score());
    assert_eq!(copy.breakdown(), array.breakdown());
    let rows_a: Vec<Vec<u32>> = array.rows().map(<[u32]>::to_vec).collect();
    let rows_b: Vec<Vec<u32>> = copy.rows().map(<[u32]>::to_vec).collect();
    assert_eq!(rows_a, rows_b);
}

#[test]
fn mutating_a_clone_leaves_the_original_alone() {
    let mut array = Array::build(mixed_levels(99)).unwrap();
    array.add_random_row().unwrap();
    array.add_row().unwrap();

    let score = array.score();
    let breakdown = array.breakdown();
    let rows: Vec<Vec<u32>> = array.rows().map(<[u32]>::to_vec).collect();

    let mut copy = array.clone();
    for _ in 0..4 {
        copy.add_random_row().unwrap();
    }
    check_invariants(&copy);

    assert_eq!(array.score(), score);
    assert_eq!(array.breakdown(), breakdown);
    let rows_after: Vec<Vec<u32>> = array.rows().map(<[u32]>::to_vec).collect();
    assert_eq!(rows_after, rows);
    check_invariants(&array);
}

#[test]
fn clones_are_forced_silent() {
    let mut params = pairwise_binary(5);
    params.output = Verbosity::Verbose;
    let array = Array::build(params).unwrap();
    assert_eq!(array.params().output, Verbosity::Verbose);
    assert_eq!(array.clone().params().output, Verbosity::Silent);
}
