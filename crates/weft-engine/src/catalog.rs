//! Factor and single catalog.
//!
//! Enumerates every (factor, level) pair up front and holds the per-single
//! issue counters the row heuristics read. Singles are arena-stored and
//! addressed by [`SingleId`]; the layout is contiguous per factor, so the
//! single for a (factor, value) pair is an O(1) lookup.

use std::collections::BTreeSet;

use weft_core::{FactorId, RowId, SingleId};

// ── Single ─────────────────────────────────────────────────────────

/// One (factor, value) pair and its outstanding-issue counters.
///
/// Counters are signed: the paired increment/decrement sequences in the
/// location and detection updates legitimately take them negative for the
/// duration of a single commit.
#[derive(Clone, Debug)]
pub struct Single {
    /// Owning factor.
    pub factor: FactorId,
    /// Level value within the factor, 0-based.
    pub value: u32,
    /// Indexes of committed rows assigning `value` to `factor`.
    pub rows: BTreeSet<RowId>,
    /// Outstanding coverage problems touching this single.
    pub coverage_issues: i64,
    /// Outstanding location problems touching this single.
    pub location_issues: i64,
    /// Outstanding detection problems touching this single.
    pub detection_issues: i64,
}

impl Single {
    fn new(factor: FactorId, value: u32) -> Self {
        Self {
            factor,
            value,
            rows: BTreeSet::new(),
            coverage_issues: 0,
            location_issues: 0,
            detection_issues: 0,
        }
    }

    /// Fingerprint fragment identifying this single within one array.
    ///
    /// Interaction fingerprints are concatenations of these fragments in
    /// factor order, and row-interaction recovery rebuilds them the same
    /// way, so the format is load-bearing.
    pub fn fingerprint(&self) -> String {
        fingerprint(self.factor, self.value)
    }

    /// Combined issue weight used by the greedy row seed. Detection issues
    /// weigh triple.
    pub fn issue_weight(&self) -> i64 {
        self.coverage_issues + self.location_issues + 3 * self.detection_issues
    }
}

/// Fingerprint fragment for a (factor, value) pair.
pub(crate) fn fingerprint(factor: FactorId, value: u32) -> String {
    format!("f{factor},{value}")
}

// ── Factor ─────────────────────────────────────────────────────────

/// A factor and its singles, indexed by level value.
#[derive(Clone, Debug)]
pub struct Factor {
    /// Column index.
    pub id: FactorId,
    /// Singles for levels `0..level`, in value order.
    pub singles: Vec<SingleId>,
}

impl Factor {
    /// Number of levels.
    pub fn level(&self) -> u32 {
        self.singles.len() as u32
    }
}

// ── Catalog ────────────────────────────────────────────────────────

/// Arena of all factors and singles for one array.
#[derive(Clone, Debug)]
pub struct Catalog {
    factors: Vec<Factor>,
    singles: Vec<Single>,
}

impl Catalog {
    /// Enumerate the singles for the given per-factor level counts.
    pub fn new(levels: &[u32]) -> Self {
        let mut factors = Vec::with_capacity(levels.len());
        let mut singles = Vec::new();
        for (col, &level) in levels.iter().enumerate() {
            let id = FactorId(col as u32);
            let mut members = Vec::with_capacity(level as usize);
            for value in 0..level {
                members.push(SingleId(singles.len() as u32));
                singles.push(Single::new(id, value));
            }
            factors.push(Factor { id, singles: members });
        }
        Self { factors, singles }
    }

    /// Number of factors.
    pub fn num_factors(&self) -> usize {
        self.factors.len()
    }

    /// Number of singles across all factors.
    pub fn num_singles(&self) -> usize {
        self.singles.len()
    }

    /// The factor at `id`.
    pub fn factor(&self, id: FactorId) -> &Factor {
        &self.factors[id.0 as usize]
    }

    /// Level count of the factor at `id`.
    pub fn level(&self, id: FactorId) -> u32 {
        self.factors[id.0 as usize].level()
    }

    /// The single at `id`.
    pub fn single(&self, id: SingleId) -> &Single {
        &self.singles[id.0 as usize]
    }

    /// Mutable access to the single at `id`.
    pub fn single_mut(&mut self, id: SingleId) -> &mut Single {
        &mut self.singles[id.0 as usize]
    }

    /// The single assigning `value` to `factor`.
    pub fn single_at(&self, factor: FactorId, value: u32) -> SingleId {
        self.factors[factor.0 as usize].singles[value as usize]
    }

    /// All factors in column order.
    pub fn factors(&self) -> impl Iterator<Item = &Factor> {
        self.factors.iter()
    }

    /// All singles with their IDs, in enumeration order.
    pub fn singles(&self) -> impl Iterator<Item = (SingleId, &Single)> {
        self.singles
            .iter()
            .enumerate()
            .map(|(i, s)| (SingleId(i as u32), s))
    }
}
