//! Weft: greedy construction of covering, locating, and detecting test
//! arrays over categorical factors.
//!
//! This is the top-level facade crate re-exporting the public API from
//! the weft sub-crates. For most users, adding `weft` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use weft::prelude::*;
//!
//! // A pairwise covering array over four factors: 3, 3, 2, and 2 levels.
//! let mut params = ArrayParams::new(vec![3, 3, 2, 2], 2);
//! params.seed = 42;
//!
//! let mut array = Array::build(params).unwrap();
//! array.add_random_row().unwrap();
//! while array.score() > 0 {
//!     array.add_row().unwrap();
//! }
//!
//! assert!(array.is_covering());
//! // Tab-separated rows, ready for file output.
//! let dump = array.to_string();
//! assert_eq!(dump.lines().count(), array.num_rows());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `weft-core` | IDs, parameters, objectives, error types |
//! | [`engine`] | `weft-engine` | The array state machine and row heuristics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, parameters, and errors (`weft-core`).
pub use weft_core as types;

/// The array state machine and row heuristics (`weft-engine`).
pub use weft_engine as engine;

/// Common imports for typical weft usage.
///
/// ```rust
/// use weft::prelude::*;
/// ```
pub mod prelude {
    // Parameters and enums
    pub use weft_core::{ArrayParams, Objective, Verbosity};

    // IDs
    pub use weft_core::{DSetId, FactorId, InteractionId, RowId, SingleId};

    // Errors
    pub use weft_core::{BuildError, CommitError, ParamsError};

    // Engine
    pub use weft_engine::{Array, RowHeuristic, ScoreBreakdown};
}
