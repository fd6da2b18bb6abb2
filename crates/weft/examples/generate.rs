//! End-to-end generation example: the driver loop the engine expects.
//!
//! Demonstrates: build params → Array → seed with a random row → add rows
//! until the score hits zero → dump the finished array.

use weft::prelude::*;

fn main() {
    println!("=== Weft generation example ===\n");

    // A detecting array over three binary factors: pairwise coverage,
    // singleton location sets, one row of separation.
    let mut params = ArrayParams::new(vec![2, 2, 2], 2);
    params.objective = Objective::Detection;
    params.margin = 1;
    params.seed = 42;
    params.verbosity = Verbosity::Verbose;

    let mut array = Array::build(params).unwrap();
    let start = array.breakdown();
    println!(
        "{} problems to solve ({} coverage, {} location, {} detection)",
        start.score, start.coverage, start.location, start.detection,
    );

    array.add_random_row().unwrap();
    while array.score() > 0 {
        let heuristic = array.select_heuristic();
        array.add_row_with(heuristic).unwrap();

        if array.params().verbosity == Verbosity::Verbose {
            let snap = array.breakdown();
            println!(
                "  row {:>3} ({:?}): score={:>5}, {:>5.1}% complete",
                snap.num_rows,
                heuristic,
                snap.score,
                snap.completion() * 100.0,
            );
        }
    }

    println!(
        "\nDone in {} rows: covering={}, locating={}, detecting={}\n",
        array.num_rows(),
        array.is_covering(),
        array.is_locating(),
        array.is_detecting(),
    );
    print!("{array}");
}
