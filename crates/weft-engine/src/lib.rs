//! Row-construction engine for covering, locating, and detecting arrays.
//!
//! An [`Array`] is built from validated [`ArrayParams`](weft_core::ArrayParams)
//! and grown one row at a time: [`Array::add_random_row`] seeds the first
//! row, then [`Array::add_row`] appends greedily chosen rows until
//! [`Array::score`] reaches zero, at which point the array satisfies the
//! configured objective. All scoring and cross-referenced bookkeeping is
//! self-contained; callers only drive the loop.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod breakdown;
pub mod catalog;
pub mod dsets;
pub mod heuristics;
pub mod interactions;

pub use array::Array;
pub use breakdown::ScoreBreakdown;
pub use catalog::{Catalog, Factor, Single};
pub use dsets::{DSet, DSetIndex};
pub use heuristics::RowHeuristic;
pub use interactions::{Interaction, InteractionIndex};
