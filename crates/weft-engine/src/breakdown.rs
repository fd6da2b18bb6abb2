//! Per-property score snapshots for driver-side reporting.
//!
//! The engine never prints. An external driver polls [`ScoreBreakdown`]
//! after each row and renders it according to the configured verbosity.

/// Remaining-work snapshot taken after a commit.
///
/// The per-property components each combine the global problem counter
/// with the singles' share of the same property, so
/// `coverage + location + detection == score` at every quiescent point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// Total outstanding problems.
    pub score: i64,
    /// Problems the array started with.
    pub total_problems: i64,
    /// Outstanding coverage work (problems plus singles' share).
    pub coverage: i64,
    /// Outstanding location work (problems plus singles' share).
    pub location: i64,
    /// Outstanding detection work (problems plus singles' share).
    pub detection: i64,
    /// Global coverage problems remaining.
    pub coverage_problems: i64,
    /// Global location problems remaining.
    pub location_problems: i64,
    /// Global detection problems remaining.
    pub detection_problems: i64,
    /// Whether every interaction is covered.
    pub is_covering: bool,
    /// Whether every d-set is locatable.
    pub is_locating: bool,
    /// Whether every interaction is detectable.
    pub is_detecting: bool,
    /// Rows committed so far.
    pub num_rows: usize,
}

impl ScoreBreakdown {
    /// Fraction of the initial problem budget already solved, in [0, 1].
    pub fn completion(&self) -> f64 {
        if self.total_problems == 0 {
            return 1.0;
        }
        (self.total_problems - self.score) as f64 / self.total_problems as f64
    }
}
