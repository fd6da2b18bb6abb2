//! Shared configuration helpers for the weft benchmarks.

#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use weft_core::{ArrayParams, Objective, Verbosity};
use weft_engine::Array;

/// A mid-sized locating configuration: six ternary factors, pairwise
/// strength, singleton d-sets.
pub fn reference_params(seed: u64) -> ArrayParams {
    let mut params = ArrayParams::new(vec![3; 6], 2);
    params.objective = Objective::Location;
    params.seed = seed;
    params.output = Verbosity::Silent;
    params
}

/// A reference array with a handful of rows already committed, for
/// benchmarking steady-state row construction.
pub fn warmed_array(seed: u64, rows: usize) -> Array {
    let mut array = Array::build(reference_params(seed)).expect("reference params are valid");
    array.add_random_row().expect("first row commits");
    for _ in 1..rows {
        array.add_row().expect("row construction succeeds");
    }
    array
}
