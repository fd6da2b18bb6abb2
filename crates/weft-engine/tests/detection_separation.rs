//! End-to-end detection runs: completion must guarantee the separation
//! margin between every interaction and every disjoint d-set.

use weft_engine::Array;
use weft_test_utils::{check_invariants, check_terminal_flags, detection_margin_one};

#[test]
fn detection_run_reaches_full_separation() {
    let mut array = Array::build(detection_margin_one(42)).unwrap();
    array.add_random_row().unwrap();
    while array.score() > 0 {
        assert!(
            array.num_rows() < 200,
            "no completion after 200 rows (score {})",
            array.score(),
        );
        array.add_row().unwrap();
        check_invariants(&array);
    }
    check_terminal_flags(&array);

    // The definition, checked directly: every interaction's rows exceed
    // every disjoint d-set's rows by at least the margin.
    for (_, inter) in array.interactions().iter() {
        for (sid, set) in array.dsets().iter() {
            if inter.sets.contains(&sid) {
                continue;
            }
            let separation = inter.rows.difference(&set.rows).count();
            assert!(
                separation >= 1,
                "separation {separation} below margin for a disjoint pair",
            );
        }
        assert!(inter.is_detectable);
    }
}

#[test]
fn margin_zero_detection_follows_coverage() {
    // With a zero margin, an interaction becomes detectable the first
    // time it appears, so completion coincides with full coverage plus
    // location.
    let mut params = detection_margin_one(9);
    params.margin = 0;
    let mut array = Array::build(params).unwrap();
    array.add_random_row().unwrap();
    while array.score() > 0 {
        assert!(array.num_rows() < 200);
        array.add_row().unwrap();
    }
    check_invariants(&array);
    check_terminal_flags(&array);
    for (_, inter) in array.interactions().iter() {
        assert_eq!(inter.is_detectable, inter.is_covered);
    }
}

#[test]
fn detection_counters_start_with_margin_budget() {
    let array = Array::build(detection_margin_one(0)).unwrap();
    // 12 interactions, each disjoint from 11 of the 12 singleton d-sets,
    // margin 1: a single sits in 4 interactions and owes one unit per
    // disjoint pairing of each.
    for (_, single) in array.catalog().singles() {
        assert_eq!(single.detection_issues, 4 * 11);
    }
    assert_eq!(array.detection_problems(), 12);
    check_invariants(&array);
}
