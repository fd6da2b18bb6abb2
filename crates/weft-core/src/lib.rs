//! Core types for the weft combinatorial test-array generator.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! strongly-typed entity IDs, the construction parameters and their
//! validation, the property-objective and don't-care enums, and the
//! error types shared by the engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod params;

// Re-export core types at crate root for convenience.
pub use error::{BuildError, CommitError, ParamsError};
pub use id::{DSetId, FactorId, InteractionId, MemberInteractions, MemberSingles, RowId, SingleId};
pub use params::{ArrayParams, DontCareLevel, Objective, Verbosity};
