//! Construction parameters and their validation.
//!
//! [`ArrayParams`] is the input to `Array::build` in the engine crate.
//! The engine assumes a validated parameter set; `validate()` is the
//! boundary where an external parser should send caller input first.

use crate::error::ParamsError;

// ── Objective ──────────────────────────────────────────────────────

/// The combinatorial property the finished array must satisfy.
///
/// Each objective subsumes the previous one: a locating array is covering,
/// and a detecting array is both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Objective {
    /// Every t-way interaction appears in at least one row (CA).
    Coverage,
    /// Additionally, any two distinct d-sets of interactions appear in
    /// distinct row sets (LA).
    Location,
    /// Additionally, every interaction's rows exceed any disjoint d-set's
    /// rows by more than the separation margin (DA).
    Detection,
}

impl Objective {
    /// Whether this objective requires the location bookkeeping.
    pub fn wants_location(self) -> bool {
        !matches!(self, Self::Coverage)
    }

    /// Whether this objective requires the detection bookkeeping.
    pub fn wants_detection(self) -> bool {
        matches!(self, Self::Detection)
    }
}

// ── DontCareLevel ──────────────────────────────────────────────────

/// Per-factor progress tag: which issue classes the factor has exhausted.
///
/// Advances monotonically as a factor's singles run out of coverage, then
/// location, then detection issues. A factor whose tag has reached the
/// level matching the array's [`Objective`] is a "don't care": the row
/// seeding heuristics assign it freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum DontCareLevel {
    /// The factor still has coverage issues.
    None,
    /// Coverage issues are exhausted.
    Coverage,
    /// Coverage and location issues are exhausted.
    CoverageLocation,
    /// All issue classes are exhausted.
    All,
}

impl DontCareLevel {
    /// The tag a factor must reach to count as a don't care under `objective`.
    pub fn required_for(objective: Objective) -> Self {
        match objective {
            Objective::Coverage => Self::Coverage,
            Objective::Location => Self::CoverageLocation,
            Objective::Detection => Self::All,
        }
    }

    /// Whether a factor tagged `self` is a don't care under `objective`.
    pub fn satisfies(self, objective: Objective) -> bool {
        self >= Self::required_for(objective)
    }
}

// ── Verbosity ──────────────────────────────────────────────────────

/// How much console reporting an external driver should produce.
///
/// The engine never prints; it exposes counters and score breakdowns and
/// leaves rendering to the driver. Look-ahead clones force their output
/// setting to [`Verbosity::Silent`] so simulated commits stay quiet no
/// matter how the driver interprets these settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// No output.
    Silent,
    /// Progress summaries.
    #[default]
    Normal,
    /// Per-row detail.
    Verbose,
}

// ── ArrayParams ────────────────────────────────────────────────────

/// Everything needed to build an array and drive row construction.
#[derive(Clone, Debug)]
pub struct ArrayParams {
    /// Level count per factor, in column order. Each entry must be >= 2.
    pub levels: Vec<u32>,
    /// Interaction strength t; must satisfy `1 <= t <= levels.len()`.
    pub strength: u32,
    /// D-set magnitude d; must be >= 1. Ignored for [`Objective::Coverage`].
    pub set_size: u32,
    /// Separation margin delta for detection.
    pub margin: u64,
    /// The property the finished array must satisfy.
    pub objective: Objective,
    /// Caller's row-count estimate. Informational only; construction does
    /// not preallocate or terminate based on it.
    pub row_hint: u32,
    /// Seed for the array's own RNG.
    pub seed: u64,
    /// Driver-facing reporting detail.
    pub verbosity: Verbosity,
    /// Driver-facing output mode (row dumps and progress lines).
    pub output: Verbosity,
    /// Extra diagnostic output from the driver.
    pub debug: bool,
}

impl ArrayParams {
    /// Parameters for a covering array over `levels` at strength `strength`,
    /// with every other knob at its default.
    pub fn new(levels: Vec<u32>, strength: u32) -> Self {
        Self {
            levels,
            strength,
            set_size: 1,
            margin: 0,
            objective: Objective::Coverage,
            row_hint: 0,
            seed: 0,
            verbosity: Verbosity::Normal,
            output: Verbosity::Normal,
            debug: false,
        }
    }

    /// Number of factors (columns).
    pub fn num_factors(&self) -> usize {
        self.levels.len()
    }

    /// Check the parameter-domain preconditions.
    ///
    /// The engine's `Array::build` calls this first; external parsers
    /// should call it at the boundary so bad input fails before any
    /// enumeration work starts.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.levels.is_empty() {
            return Err(ParamsError::NoFactors);
        }
        for (factor, &level) in self.levels.iter().enumerate() {
            if level < 2 {
                return Err(ParamsError::LevelTooSmall { factor, level });
            }
        }
        if self.strength == 0 || self.strength as usize > self.levels.len() {
            return Err(ParamsError::StrengthOutOfRange {
                strength: self.strength,
                num_factors: self.levels.len(),
            });
        }
        if self.set_size == 0 {
            return Err(ParamsError::SetSizeZero);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_validate() {
        let params = ArrayParams::new(vec![2, 2, 2], 2);
        assert!(params.validate().is_ok());
        assert_eq!(params.num_factors(), 3);
    }

    #[test]
    fn strength_one_is_legal() {
        let params = ArrayParams::new(vec![4, 4, 4, 4, 4], 1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_empty_levels() {
        let params = ArrayParams::new(vec![], 1);
        assert!(matches!(params.validate(), Err(ParamsError::NoFactors)));
    }

    #[test]
    fn rejects_unary_factor() {
        let params = ArrayParams::new(vec![2, 1, 3], 2);
        assert!(matches!(
            params.validate(),
            Err(ParamsError::LevelTooSmall { factor: 1, level: 1 })
        ));
    }

    #[test]
    fn rejects_strength_beyond_factor_count() {
        let params = ArrayParams::new(vec![2, 2], 3);
        assert!(matches!(
            params.validate(),
            Err(ParamsError::StrengthOutOfRange { strength: 3, num_factors: 2 })
        ));
        let params = ArrayParams::new(vec![2, 2], 0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_zero_set_size() {
        let mut params = ArrayParams::new(vec![2, 2], 2);
        params.set_size = 0;
        assert!(matches!(params.validate(), Err(ParamsError::SetSizeZero)));
    }

    #[test]
    fn dont_care_progression_matches_objective() {
        assert!(DontCareLevel::Coverage.satisfies(Objective::Coverage));
        assert!(!DontCareLevel::Coverage.satisfies(Objective::Location));
        assert!(DontCareLevel::CoverageLocation.satisfies(Objective::Location));
        assert!(!DontCareLevel::CoverageLocation.satisfies(Objective::Detection));
        assert!(DontCareLevel::All.satisfies(Objective::Detection));
        assert!(!DontCareLevel::None.satisfies(Objective::Coverage));
    }

    #[test]
    fn objective_subsumption() {
        assert!(!Objective::Coverage.wants_location());
        assert!(Objective::Location.wants_location());
        assert!(!Objective::Location.wants_detection());
        assert!(Objective::Detection.wants_location());
        assert!(Objective::Detection.wants_detection());
    }
}
