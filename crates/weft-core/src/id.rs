//! Strongly-typed identifiers for array entities.
//!
//! Every entity kind (factor, single, interaction, d-set, row) lives in its
//! own arena inside the engine and is addressed by one of these newtypes.
//! IDs are dense indexes assigned in enumeration order, which is fully
//! determined by the construction parameters; two arrays built from the same
//! parameters assign identical IDs to identical entities.

use smallvec::SmallVec;
use std::fmt;

/// Identifies a factor (column) of the array under construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FactorId(pub u32);

impl fmt::Display for FactorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FactorId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a single, i.e. one (factor, level) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SingleId(pub u32);

impl fmt::Display for SingleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SingleId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a t-way interaction (t singles from t distinct factors).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InteractionId(pub u32);

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for InteractionId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a d-set (an unordered set of d distinct interactions).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DSetId(pub u32);

impl fmt::Display for DSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DSetId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Index of a committed row.
///
/// Assigned monotonically as rows are appended; rows are never removed or
/// reordered, so a `RowId` stays valid for the life of the array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u32);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RowId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Member singles of an interaction, in strictly ascending factor order.
///
/// Inline capacity 4 covers the common strengths (t <= 4) without heap
/// allocation; higher strengths spill transparently.
pub type MemberSingles = SmallVec<[SingleId; 4]>;

/// Member interactions of a d-set, in enumeration order.
pub type MemberInteractions = SmallVec<[InteractionId; 4]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_as_plain_numbers() {
        assert_eq!(FactorId(3).to_string(), "3");
        assert_eq!(SingleId(17).to_string(), "17");
        assert_eq!(InteractionId(0).to_string(), "0");
        assert_eq!(DSetId(42).to_string(), "42");
        assert_eq!(RowId(7).to_string(), "7");
    }

    #[test]
    fn ids_order_by_index() {
        assert!(RowId(1) < RowId(2));
        assert!(DSetId(0) < DSetId(10));
        assert_eq!(SingleId::from(5u32), SingleId(5));
    }
}
