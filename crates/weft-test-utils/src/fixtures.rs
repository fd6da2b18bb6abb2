//! Canonical parameter sets used across the test suites.

use weft_core::{ArrayParams, Objective, Verbosity};

/// Three binary factors at strength 2: the smallest interesting covering
/// array (12 interactions).
pub fn pairwise_binary(seed: u64) -> ArrayParams {
    let mut params = ArrayParams::new(vec![2, 2, 2], 2);
    params.seed = seed;
    params.output = Verbosity::Silent;
    params
}

/// Mixed levels at strength 2 with location enabled; the workhorse for
/// invariant fuzzing.
pub fn mixed_levels(seed: u64) -> ArrayParams {
    let mut params = ArrayParams::new(vec![3, 3, 2, 2], 2);
    params.objective = Objective::Location;
    params.seed = seed;
    params.output = Verbosity::Silent;
    params
}

/// Three binary factors with detection at margin 1.
pub fn detection_margin_one(seed: u64) -> ArrayParams {
    let mut params = ArrayParams::new(vec![2, 2, 2], 2);
    params.objective = Objective::Detection;
    params.margin = 1;
    params.seed = seed;
    params.output = Verbosity::Silent;
    params
}

/// Five four-level factors at strength 1; completes in exactly as many
/// rows as the level count.
pub fn strength_one(seed: u64) -> ArrayParams {
    let mut params = ArrayParams::new(vec![4, 4, 4, 4, 4], 1);
    params.seed = seed;
    params.output = Verbosity::Silent;
    params
}
