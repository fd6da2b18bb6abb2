//! Shared fixtures and invariant checks for weft test suites.
//!
//! Kept out of the engine crate so every test suite (unit, integration,
//! bench) exercises the same canonical parameter sets and the same
//! structural checks.

#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod fixtures;
pub mod invariants;

pub use fixtures::{detection_margin_one, mixed_levels, pairwise_binary, strength_one};
pub use invariants::{check_invariants, check_terminal_flags};
