//! Error types for array construction and row commits.
//!
//! Organized by subsystem: parameter validation, entity enumeration, and
//! the row-commit update path. None of these are retried; a build error
//! means nothing was allocated, and a commit error means the array's
//! internal bookkeeping is no longer trustworthy.

use std::error::Error;
use std::fmt;

use crate::id::DSetId;

// ── ParamsError ────────────────────────────────────────────────────

/// Parameter-domain violations caught by `ArrayParams::validate()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamsError {
    /// The level list is empty.
    NoFactors,
    /// A factor has fewer than two levels.
    LevelTooSmall {
        /// Column index of the offending factor.
        factor: usize,
        /// The configured level count.
        level: u32,
    },
    /// Strength is zero or exceeds the factor count.
    StrengthOutOfRange {
        /// The configured strength.
        strength: u32,
        /// Number of factors available.
        num_factors: usize,
    },
    /// D-set magnitude is zero.
    SetSizeZero,
    /// D-set magnitude exceeds the number of enumerated interactions.
    /// Only detectable once the interaction count is known, so this is
    /// raised by `Array::build` rather than `validate()`.
    SetSizeTooLarge {
        /// The configured d-set magnitude.
        set_size: u32,
        /// How many interactions the parameters produce.
        num_interactions: usize,
    },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFactors => write!(f, "at least one factor is required"),
            Self::LevelTooSmall { factor, level } => {
                write!(f, "factor {factor} has {level} levels, minimum is 2")
            }
            Self::StrengthOutOfRange { strength, num_factors } => {
                write!(f, "strength {strength} outside [1, {num_factors}]")
            }
            Self::SetSizeZero => write!(f, "d-set magnitude must be at least 1"),
            Self::SetSizeTooLarge { set_size, num_interactions } => {
                write!(f, "d-set magnitude {set_size} exceeds {num_interactions} interactions")
            }
        }
    }
}

impl Error for ParamsError {}

// ── BuildError ─────────────────────────────────────────────────────

/// Errors from `Array::build`.
///
/// Construction either completes fully or fails before allocating the
/// entity arenas; there is no partially built array to recover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// The parameters failed validation.
    Params(ParamsError),
    /// An entity enumeration would exceed the ID space or memory budget.
    CapacityExceeded {
        /// Which enumeration blew up ("interactions", "d-sets", "margins").
        entity: &'static str,
        /// The count the parameters imply, saturated at `u128::MAX` when
        /// even the checked arithmetic overflowed.
        requested: u128,
        /// The largest supported count.
        limit: u64,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Params(e) => write!(f, "invalid parameters: {e}"),
            Self::CapacityExceeded { entity, requested, limit } => {
                write!(f, "{entity} enumeration needs {requested} entries, limit is {limit}")
            }
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Params(e) => Some(e),
            Self::CapacityExceeded { .. } => None,
        }
    }
}

impl From<ParamsError> for BuildError {
    fn from(e: ParamsError) -> Self {
        Self::Params(e)
    }
}

// ── CommitError ────────────────────────────────────────────────────

/// Internal invariant violations detected while committing a row.
///
/// These only fire on bugs in the counter bookkeeping. Once one is
/// returned the array's counters may be inconsistent and the caller
/// should discard the array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitError {
    /// A recovered column combination resolved to no known interaction.
    UnknownInteraction {
        /// The fingerprint that failed to resolve.
        fingerprint: String,
    },
    /// A conflict edge existed on one d-set but not its partner.
    ConflictDesync {
        /// The d-set whose conflict list held the edge.
        set: DSetId,
        /// The partner missing the reciprocal edge.
        partner: DSetId,
    },
    /// The location-problem counter reached zero while a d-set in the
    /// current row was still unresolved.
    LocationUnderflow {
        /// The d-set whose resolution exhausted the counter.
        set: DSetId,
    },
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownInteraction { fingerprint } => {
                write!(f, "no interaction matches fingerprint {fingerprint:?}")
            }
            Self::ConflictDesync { set, partner } => {
                write!(f, "conflict between d-sets {set} and {partner} is not symmetric")
            }
            Self::LocationUnderflow { set } => {
                write!(f, "location problems exhausted with d-set {set} still pending")
            }
        }
    }
}

impl Error for CommitError {}
