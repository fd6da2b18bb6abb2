//! Structural invariant checks for an array mid-construction.
//!
//! [`check_invariants`] asserts everything that must hold after any
//! sequence of committed rows: the score identity, row-set consistency
//! for all three entity kinds, and the coverage/locatable/detectable
//! flag definitions. Panics with a descriptive message on violation, so
//! the suites can call it inside loops and property tests.

use std::collections::BTreeSet;

use weft_core::RowId;
use weft_engine::Array;

/// Assert every structural invariant of `array`.
pub fn check_invariants(array: &Array) {
    check_score_identity(array);
    check_row_sets(array);
    check_coverage_flags(array);
    check_location_flags(array);
    check_detection_flags(array);
}

/// The authoritative bookkeeping identity: the score equals the three
/// global problem counters plus every single's outstanding issues.
fn check_score_identity(array: &Array) {
    let mut sum = array.coverage_problems()
        + array.location_problems()
        + array.detection_problems();
    for (_, single) in array.catalog().singles() {
        sum += single.coverage_issues + single.location_issues + single.detection_issues;
    }
    assert_eq!(
        array.score(),
        sum,
        "score identity broken: score {} vs problem/issue sum {}",
        array.score(),
        sum,
    );
}

/// Singles hold exactly their matching rows; interaction rows are the
/// intersection of their singles'; d-set rows are the union of their
/// members'.
fn check_row_sets(array: &Array) {
    let rows: Vec<&[u32]> = array.rows().collect();

    for (id, single) in array.catalog().singles() {
        let expected: BTreeSet<RowId> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row[single.factor.0 as usize] == single.value)
            .map(|(k, _)| RowId(k as u32))
            .collect();
        assert_eq!(single.rows, expected, "row set of single {id} is wrong");
    }

    for (id, inter) in array.interactions().iter() {
        let mut expected: Option<BTreeSet<RowId>> = None;
        for &s in &inter.singles {
            let member = &array.catalog().single(s).rows;
            expected = Some(match expected {
                None => member.clone(),
                Some(acc) => acc.intersection(member).copied().collect(),
            });
        }
        let expected = expected.unwrap_or_default();
        assert_eq!(inter.rows, expected, "row set of interaction {id} is wrong");
    }

    for (id, set) in array.dsets().iter() {
        let mut expected: BTreeSet<RowId> = BTreeSet::new();
        for &m in &set.members {
            expected.extend(array.interactions().get(m).rows.iter().copied());
        }
        assert_eq!(set.rows, expected, "row set of d-set {id} is wrong");
    }
}

/// `is_covered` tracks row-set emptiness exactly, and the global counter
/// tracks the uncovered population.
fn check_coverage_flags(array: &Array) {
    let mut uncovered = 0i64;
    for (id, inter) in array.interactions().iter() {
        assert_eq!(
            inter.is_covered,
            !inter.rows.is_empty(),
            "coverage flag of interaction {id} is wrong",
        );
        if !inter.is_covered {
            uncovered += 1;
        }
    }
    assert_eq!(array.coverage_problems(), uncovered);
    assert_eq!(array.is_covering(), uncovered == 0);
}

/// Conflict edges are symmetric, and a d-set that has appeared is
/// locatable exactly when its conflict set is empty. A d-set that has
/// never appeared cannot be locatable and holds no conflicts.
fn check_location_flags(array: &Array) {
    for (id, set) in array.dsets().iter() {
        for &partner in &set.conflicts {
            assert!(
                array.dsets().get(partner).conflicts.contains(&id),
                "conflict between d-sets {id} and {partner} is one-sided",
            );
        }
        if set.rows.is_empty() {
            assert!(!set.is_locatable, "unseen d-set {id} marked locatable");
            assert!(set.conflicts.is_empty(), "unseen d-set {id} holds conflicts");
        } else {
            assert_eq!(
                set.is_locatable,
                set.conflicts.is_empty(),
                "locatable flag of d-set {id} is wrong",
            );
        }
    }
    if array.params().objective.wants_location() {
        let pending = array.dsets().iter().filter(|(_, s)| !s.is_locatable).count() as i64;
        assert_eq!(array.location_problems(), pending);
        assert_eq!(array.is_locating(), pending == 0);
    }
}

/// Detection margins track the definition `|I.rows \ T.rows|` while an
/// interaction still has detection work, and a covered interaction is
/// detectable exactly when every separation has reached the configured
/// margin. Once detectable, the recorded margins freeze (the update
/// short-circuits) but the live separations can only keep growing, so
/// the definition stays satisfied. Uncovered interactions are never
/// detectable.
fn check_detection_flags(array: &Array) {
    if !array.params().objective.wants_detection() {
        return;
    }
    let margin = array.params().margin as i64;
    for (id, inter) in array.interactions().iter() {
        if !inter.is_covered {
            assert!(!inter.is_detectable, "uncovered interaction {id} detectable");
            continue;
        }
        let mut all_separated = true;
        for (&sid, &recorded) in &inter.margins {
            let set_rows = &array.dsets().get(sid).rows;
            let actual = inter.rows.difference(set_rows).count() as i64;
            if inter.is_detectable {
                assert!(
                    recorded >= margin && actual >= margin,
                    "detectable interaction {id} under-separated from d-set {sid}",
                );
            } else {
                assert_eq!(
                    recorded, actual,
                    "margin of interaction {id} vs d-set {sid} is wrong",
                );
                if recorded < margin {
                    all_separated = false;
                }
            }
        }
        if !inter.is_detectable {
            assert!(
                !all_separated,
                "interaction {id} fully separated but not marked detectable",
            );
        }
    }
    let pending = array
        .interactions()
        .iter()
        .filter(|(_, i)| !i.is_detectable)
        .count() as i64;
    assert_eq!(array.detection_problems(), pending);
    assert_eq!(array.is_detecting(), pending == 0);
}

/// Assert that a finished array (score zero) carries the terminal flags
/// its objective requires.
pub fn check_terminal_flags(array: &Array) {
    assert_eq!(array.score(), 0);
    assert!(array.is_covering());
    if array.params().objective.wants_location() {
        assert!(array.is_locating());
    }
    if array.params().objective.wants_detection() {
        assert!(array.is_detecting());
    }
}
