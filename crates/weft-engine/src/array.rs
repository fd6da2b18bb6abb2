//! Array state, counter bookkeeping, and the row-commit update.
//!
//! [`Array`] owns the catalog, both entity indexes, the committed rows,
//! and the global problem counters. Committing a row flows through
//! [`Array::commit_row`], which updates coverage, detection, and location
//! state in that order; a `keep = false` commit applies every counter
//! effect and then rolls back only the row-membership mutations, which is
//! how look-ahead scoring measures a candidate without keeping it.
//!
//! The authoritative bookkeeping invariant, preserved by every commit:
//! `score` equals the sum of the three global problem counters plus every
//! single's outstanding issues.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;
use std::fmt;

use weft_core::{
    ArrayParams, BuildError, CommitError, DSetId, DontCareLevel, InteractionId, ParamsError,
    RowId, Verbosity,
};

use crate::breakdown::ScoreBreakdown;
use crate::catalog::Catalog;
use crate::dsets::DSetIndex;
use crate::interactions::{InteractionIndex, MAX_ENTITIES};

// ── Array ──────────────────────────────────────────────────────────

/// An array under construction, with all scoring state self-contained.
///
/// Build one with [`Array::build`], seed it with
/// [`Array::add_random_row`], then call [`Array::add_row`] until
/// [`Array::score`] reaches zero. Rows are only ever appended.
#[derive(Debug)]
pub struct Array {
    pub(crate) params: ArrayParams,
    pub(crate) catalog: Catalog,
    pub(crate) interactions: InteractionIndex,
    pub(crate) dsets: DSetIndex,
    pub(crate) rows: Vec<Vec<u32>>,
    /// Column visit order, reshuffled before each constructed row.
    pub(crate) permutation: Vec<usize>,
    /// Per-factor don't-care progression.
    pub(crate) dont_cares: Vec<DontCareLevel>,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) score: i64,
    pub(crate) total_problems: i64,
    pub(crate) coverage_problems: i64,
    pub(crate) location_problems: i64,
    pub(crate) detection_problems: i64,
    pub(crate) is_covering: bool,
    pub(crate) is_locating: bool,
    pub(crate) is_detecting: bool,
}

impl Array {
    /// Build the full entity graph for `params` and initialize the
    /// problem counters for the configured objective.
    ///
    /// Fails fast on invalid parameters or a combinatorial size that
    /// exceeds the ID space; nothing is partially allocated on error.
    pub fn build(params: ArrayParams) -> Result<Self, BuildError> {
        params.validate()?;
        let catalog = Catalog::new(&params.levels);
        let mut interactions = InteractionIndex::enumerate(&catalog, params.strength as usize)?;
        let dsets = if params.objective.wants_location() {
            if params.set_size as usize > interactions.len() {
                return Err(ParamsError::SetSizeTooLarge {
                    set_size: params.set_size,
                    num_interactions: interactions.len(),
                }
                .into());
            }
            DSetIndex::enumerate(&mut interactions, params.set_size as usize)?
        } else {
            DSetIndex::empty()
        };

        let num_factors = params.num_factors();
        let rng = ChaCha8Rng::seed_from_u64(params.seed);
        let mut array = Self {
            params,
            catalog,
            interactions,
            dsets,
            rows: Vec::new(),
            permutation: (0..num_factors).collect(),
            dont_cares: vec![DontCareLevel::None; num_factors],
            rng,
            score: 0,
            total_problems: 0,
            coverage_problems: 0,
            location_problems: 0,
            detection_problems: 0,
            is_covering: false,
            is_locating: false,
            is_detecting: false,
        };

        array.init_coverage_problems();
        if array.params.objective.wants_location() {
            array.init_location_problems();
        }
        if array.params.objective.wants_detection() {
            array.init_detection_problems()?;
        }
        Ok(array)
    }

    /// Every interaction is one coverage problem, plus one issue on each
    /// of its member singles.
    fn init_coverage_problems(&mut self) {
        for i in 0..self.interactions.len() {
            let singles = self.interactions.get(InteractionId(i as u32)).singles.clone();
            for s in singles {
                self.catalog.single_mut(s).coverage_issues += 1;
                self.total_problems += 1;
                self.score += 1;
            }
        }
        let count = self.interactions.len() as i64;
        self.coverage_problems += count;
        self.total_problems += count;
        self.score += count;
    }

    /// Every d-set is one location problem; until it first appears, each
    /// of its flattened member singles carries the full set count as its
    /// share of the budget.
    fn init_location_problems(&mut self) {
        let set_count = self.dsets.len() as i64;
        for i in 0..self.dsets.len() {
            let singles = self.dsets.get(DSetId(i as u32)).singles.clone();
            for s in singles {
                self.catalog.single_mut(s).location_issues += set_count;
                self.total_problems += set_count;
                self.score += set_count;
            }
        }
        self.location_problems += set_count;
        self.total_problems += set_count;
        self.score += set_count;
    }

    /// Every interaction is one detection problem; against each d-set not
    /// containing it the separation margin starts at zero, and each member
    /// single owes `margin` units of work per such pairing.
    fn init_detection_problems(&mut self) -> Result<(), BuildError> {
        let entries = self.interactions.len() as u128 * self.dsets.len() as u128;
        if entries > MAX_ENTITIES as u128 {
            return Err(BuildError::CapacityExceeded {
                entity: "margins",
                requested: entries,
                limit: MAX_ENTITIES,
            });
        }
        let margin = self.params.margin as i64;
        for i in 0..self.interactions.len() {
            let id = InteractionId(i as u32);
            let (member_sets, singles) = {
                let inter = self.interactions.get(id);
                (inter.sets.clone(), inter.singles.clone())
            };
            let mut disjoint = 0i64;
            for (sid, _) in self.dsets.iter() {
                if !member_sets.contains(&sid) {
                    self.interactions.get_mut(id).margins.insert(sid, 0);
                    disjoint += 1;
                }
            }
            let share = margin * disjoint;
            for s in singles {
                self.catalog.single_mut(s).detection_issues += share;
                self.total_problems += share;
                self.score += share;
            }
        }
        let count = self.interactions.len() as i64;
        self.detection_problems += count;
        self.total_problems += count;
        self.score += count;
        Ok(())
    }

    // ── Row operations ─────────────────────────────────────────────

    /// Append a uniformly random row, committing it without any scoring
    /// of the choice. Intended only for the mandatory first row.
    pub fn add_random_row(&mut self) -> Result<RowId, CommitError> {
        let mut row = Vec::with_capacity(self.params.num_factors());
        for col in 0..self.params.num_factors() {
            let level = self.params.levels[col];
            row.push(self.rng.gen_range(0..level));
        }
        self.commit_row(&row, true)
    }

    /// Commit `row`, updating all membership sets, flags, and counters.
    ///
    /// With `keep = false` the counter effects are applied and then the
    /// row-membership insertions are rolled back: the committed row list
    /// is unchanged while the counters read as if the row had been kept.
    /// Look-ahead scoring relies on exactly this to rank candidates by
    /// the signed counter movement.
    pub(crate) fn commit_row(&mut self, row: &[u32], keep: bool) -> Result<RowId, CommitError> {
        let row_id = RowId(self.rows.len() as u32);
        let recovered = self.interactions.row_interactions(row)?;

        // Membership: the new row joins each recovered interaction, its
        // member singles, and every d-set containing any of them.
        let mut row_sets: BTreeSet<DSetId> = BTreeSet::new();
        for &iid in &recovered {
            let singles = self.interactions.get(iid).singles.clone();
            for s in singles {
                self.catalog.single_mut(s).rows.insert(row_id);
            }
            let inter = self.interactions.get_mut(iid);
            inter.rows.insert(row_id);
            let sets = inter.sets.clone();
            for sid in sets {
                self.dsets.get_mut(sid).rows.insert(row_id);
                row_sets.insert(sid);
            }
        }

        // Coverage and detection hang off interactions.
        for &iid in &recovered {
            self.update_coverage(iid);
            if self.params.objective.wants_detection() {
                self.update_detection(iid, &row_sets);
            }
        }

        // Location hangs off d-sets; nothing left to track once locating.
        if self.params.objective.wants_location() && !self.is_locating {
            self.update_location(&row_sets)?;
        }

        if keep {
            self.rows.push(row.to_vec());
        } else {
            for &iid in &recovered {
                let singles = self.interactions.get(iid).singles.clone();
                for s in singles {
                    self.catalog.single_mut(s).rows.remove(&row_id);
                }
                self.interactions.get_mut(iid).rows.remove(&row_id);
            }
            for &sid in &row_sets {
                self.dsets.get_mut(sid).rows.remove(&row_id);
            }
        }
        Ok(row_id)
    }

    fn update_coverage(&mut self, iid: InteractionId) {
        let inter = self.interactions.get_mut(iid);
        if inter.is_covered {
            return;
        }
        inter.is_covered = true;
        let singles = inter.singles.clone();
        for s in singles {
            self.catalog.single_mut(s).coverage_issues -= 1;
            self.score -= 1;
        }
        self.score -= 1;
        self.coverage_problems -= 1;
        if self.coverage_problems == 0 {
            self.is_covering = true;
        }
    }

    fn update_detection(&mut self, iid: InteractionId, row_sets: &BTreeSet<DSetId>) {
        let margin = self.params.margin as i64;
        if self.interactions.get(iid).is_detectable {
            return;
        }
        let singles = self.interactions.get(iid).singles.clone();
        let inter = self.interactions.get_mut(iid);

        // D-sets in this row that do not contain this interaction lose a
        // margin step; margins already at or under the target first take a
        // deficiency unit per member single to balance the uniform credit
        // in the sweep below.
        let others: Vec<DSetId> = row_sets
            .iter()
            .copied()
            .filter(|sid| !inter.sets.contains(sid))
            .collect();
        for sid in others {
            if inter.margins[&sid] <= margin {
                for &s in &singles {
                    self.catalog.single_mut(s).detection_issues += 1;
                    self.score += 1;
                }
            }
            inter.margins[&sid] -= 1;
        }

        // Every margin gains the row that contains this interaction.
        let mut detectable = true;
        for (_, m) in inter.margins.iter_mut() {
            *m += 1;
            if *m < margin {
                detectable = false;
            }
            if *m <= margin {
                for &s in &singles {
                    self.catalog.single_mut(s).detection_issues -= 1;
                    self.score -= 1;
                }
            }
        }

        if detectable {
            inter.is_detectable = true;
            self.score -= 1;
            self.detection_problems -= 1;
            if self.detection_problems == 0 {
                self.is_detecting = true;
            }
        }
    }

    fn update_location(&mut self, row_sets: &BTreeSet<DSetId>) -> Result<(), CommitError> {
        let set_count = self.dsets.len() as i64;
        for &t1 in row_sets {
            if self.dsets.get(t1).is_locatable {
                continue;
            }
            if self.dsets.get(t1).rows.len() == 1 {
                // First appearance: the blanket budget on this set's singles
                // retires, and every other set debuting in the same row is a
                // conflict until a later row separates them.
                let singles = self.dsets.get(t1).singles.clone();
                for &s in &singles {
                    self.catalog.single_mut(s).location_issues -= set_count;
                    self.score -= set_count;
                }
                for &t2 in row_sets {
                    if t2 == t1 || self.dsets.get(t2).rows.len() > 1 {
                        continue;
                    }
                    self.dsets.get_mut(t1).conflicts.insert(t2);
                    for &s in &singles {
                        self.catalog.single_mut(s).location_issues += 1;
                        self.score += 1;
                    }
                }
            } else {
                // Repeat appearance: any recorded conflict absent from this
                // row is now separated.
                let resolved: Vec<DSetId> = self
                    .dsets
                    .get(t1)
                    .conflicts
                    .iter()
                    .copied()
                    .filter(|t2| !row_sets.contains(t2))
                    .collect();
                for &t2 in &resolved {
                    self.detach_conflict(t1, t2)?;
                }
                let solved = resolved.len() as i64;
                if solved > 0 {
                    let singles = self.dsets.get(t1).singles.clone();
                    for &s in &singles {
                        self.catalog.single_mut(s).location_issues -= solved;
                        self.score -= solved;
                    }
                }
            }
            if self.dsets.get(t1).conflicts.is_empty() {
                self.dsets.get_mut(t1).is_locatable = true;
                self.score -= 1;
                self.location_problems -= 1;
                if self.location_problems == 0 {
                    self.is_locating = true;
                }
            }
        }
        Ok(())
    }

    /// Remove the conflict edge between `t1` and `t2`, crediting the
    /// partner's singles and possibly marking the partner locatable.
    ///
    /// `t1` must still be pending in the current row, so the partner
    /// becoming the last outstanding location problem is a bookkeeping
    /// bug, as is a one-sided edge.
    pub(crate) fn detach_conflict(&mut self, t1: DSetId, t2: DSetId) -> Result<(), CommitError> {
        self.dsets.get_mut(t1).conflicts.remove(&t2);
        if !self.dsets.get_mut(t2).conflicts.remove(&t1) {
            return Err(CommitError::ConflictDesync { set: t1, partner: t2 });
        }
        let partner_singles = self.dsets.get(t2).singles.clone();
        for &s in &partner_singles {
            self.catalog.single_mut(s).location_issues -= 1;
            self.score -= 1;
        }
        if self.dsets.get(t2).conflicts.is_empty() {
            self.dsets.get_mut(t2).is_locatable = true;
            self.score -= 1;
            self.location_problems -= 1;
            if self.location_problems == 0 {
                return Err(CommitError::LocationUnderflow { set: t1 });
            }
        }
        Ok(())
    }

    // ── Read-only surface ──────────────────────────────────────────

    /// Construction parameters this array was built from.
    pub fn params(&self) -> &ArrayParams {
        &self.params
    }

    /// Total outstanding problems; zero means the objective is satisfied.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Problems the array started with.
    pub fn total_problems(&self) -> i64 {
        self.total_problems
    }

    /// Global coverage problems remaining.
    pub fn coverage_problems(&self) -> i64 {
        self.coverage_problems
    }

    /// Global location problems remaining.
    pub fn location_problems(&self) -> i64 {
        self.location_problems
    }

    /// Global detection problems remaining.
    pub fn detection_problems(&self) -> i64 {
        self.detection_problems
    }

    /// Whether every interaction is covered.
    pub fn is_covering(&self) -> bool {
        self.is_covering
    }

    /// Whether every d-set is locatable.
    pub fn is_locating(&self) -> bool {
        self.is_locating
    }

    /// Whether every interaction is detectable.
    pub fn is_detecting(&self) -> bool {
        self.is_detecting
    }

    /// Rows committed so far.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The committed row at `id`.
    pub fn row(&self, id: RowId) -> &[u32] {
        &self.rows[id.0 as usize]
    }

    /// All committed rows in commit order.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// The factor/single catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The interaction index.
    pub fn interactions(&self) -> &InteractionIndex {
        &self.interactions
    }

    /// The d-set index (empty for coverage-only arrays).
    pub fn dsets(&self) -> &DSetIndex {
        &self.dsets
    }

    /// Remaining-work snapshot for driver-side reporting.
    pub fn breakdown(&self) -> ScoreBreakdown {
        let mut coverage = self.coverage_problems;
        let mut location = self.location_problems;
        let mut detection = self.detection_problems;
        for (_, single) in self.catalog.singles() {
            coverage += single.coverage_issues;
            location += single.location_issues;
            detection += single.detection_issues;
        }
        ScoreBreakdown {
            score: self.score,
            total_problems: self.total_problems,
            coverage,
            location,
            detection,
            coverage_problems: self.coverage_problems,
            location_problems: self.location_problems,
            detection_problems: self.detection_problems,
            is_covering: self.is_covering,
            is_locating: self.is_locating,
            is_detecting: self.is_detecting,
            num_rows: self.rows.len(),
        }
    }
}

/// Deep copy with no shared mutable state, for look-ahead scoring.
///
/// Entity IDs are enumeration-deterministic, so a field-wise clone
/// reproduces the exact topology and counter state. The clone's output
/// setting is forced silent: simulated commits never report.
impl Clone for Array {
    fn clone(&self) -> Self {
        let mut params = self.params.clone();
        params.output = Verbosity::Silent;
        Self {
            params,
            catalog: self.catalog.clone(),
            interactions: self.interactions.clone(),
            dsets: self.dsets.clone(),
            rows: self.rows.clone(),
            permutation: self.permutation.clone(),
            dont_cares: self.dont_cares.clone(),
            rng: self.rng.clone(),
            score: self.score,
            total_problems: self.total_problems,
            coverage_problems: self.coverage_problems,
            location_problems: self.location_problems,
            detection_problems: self.detection_problems,
            is_covering: self.is_covering,
            is_locating: self.is_locating,
            is_detecting: self.is_detecting,
        }
    }
}

/// Tab-separated dump, one row per line, for driver-side file output.
impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for (i, value) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::Objective;

    fn params(levels: Vec<u32>, strength: u32) -> ArrayParams {
        ArrayParams::new(levels, strength)
    }

    fn score_identity(array: &Array) -> i64 {
        let mut sum =
            array.coverage_problems + array.location_problems + array.detection_problems;
        for (_, single) in array.catalog.singles() {
            sum += single.coverage_issues + single.location_issues + single.detection_issues;
        }
        sum
    }

    #[test]
    fn coverage_construction_counters() {
        let array = Array::build(params(vec![2, 2, 2], 2)).unwrap();
        // C(3,2) * 4 = 12 interactions, two singles each.
        assert_eq!(array.interactions().len(), 12);
        assert_eq!(array.coverage_problems(), 12);
        assert_eq!(array.score(), 36);
        assert_eq!(array.total_problems(), 36);
        assert_eq!(score_identity(&array), array.score());
        assert!(array.dsets().is_empty());
    }

    #[test]
    fn location_construction_counters() {
        let mut p = params(vec![2, 2], 2);
        p.objective = Objective::Location;
        let array = Array::build(p).unwrap();
        // 4 interactions, 4 singleton d-sets of two singles each.
        assert_eq!(array.dsets().len(), 4);
        assert_eq!(array.location_problems(), 4);
        // Coverage share 4 + 8; location share 4 + (4 sets * 2 singles * 4).
        assert_eq!(array.score(), 48);
        assert_eq!(score_identity(&array), array.score());
    }

    #[test]
    fn detection_construction_counters() {
        let mut p = params(vec![2, 2], 2);
        p.objective = Objective::Detection;
        p.margin = 1;
        let array = Array::build(p).unwrap();
        // Each interaction is disjoint from 3 of the 4 singleton d-sets.
        for (_, inter) in array.interactions().iter() {
            assert_eq!(inter.margins.len(), 3);
            assert!(inter.margins.values().all(|&m| m == 0));
        }
        assert_eq!(array.detection_problems(), 4);
        // Location budget 48 plus detection: 4*2*3 margin units + 4.
        assert_eq!(array.score(), 76);
        assert_eq!(score_identity(&array), array.score());
    }

    #[test]
    fn build_rejects_oversized_set_size() {
        let mut p = params(vec![2, 2], 2);
        p.objective = Objective::Location;
        p.set_size = 5;
        assert!(matches!(
            Array::build(p),
            Err(BuildError::Params(ParamsError::SetSizeTooLarge { set_size: 5, num_interactions: 4 }))
        ));
    }

    #[test]
    fn first_random_row_updates_membership_and_score() {
        let mut array = Array::build(params(vec![2, 2, 2], 2)).unwrap();
        let id = array.add_random_row().unwrap();
        assert_eq!(id, RowId(0));
        assert_eq!(array.num_rows(), 1);
        // One row covers C(3,2) = 3 interactions: each retires one problem
        // and one issue per member single.
        assert_eq!(array.coverage_problems(), 9);
        assert_eq!(array.score(), 36 - 3 * 3);
        assert_eq!(score_identity(&array), array.score());
        for &iid in &array.interactions.row_interactions(array.row(id)).unwrap() {
            let inter = array.interactions().get(iid);
            assert!(inter.is_covered);
            assert!(inter.rows.contains(&id));
        }
    }

    #[test]
    fn lookahead_commit_rolls_back_membership_only() {
        let mut array = Array::build(params(vec![2, 2, 2], 2)).unwrap();
        array.commit_row(&[0, 0, 0], true).unwrap();
        let mut probe = array.clone();
        // Differs in every column, so the probe must move the counters.
        let candidate = vec![1, 1, 1];
        probe.commit_row(&candidate, false).unwrap();

        // Counters moved...
        assert_ne!(probe.score(), array.score());
        // ...but no row was kept and no membership survives.
        assert_eq!(probe.num_rows(), 1);
        let ghost = RowId(1);
        for (_, single) in probe.catalog().singles() {
            assert!(!single.rows.contains(&ghost));
        }
        for (_, inter) in probe.interactions().iter() {
            assert!(!inter.rows.contains(&ghost));
        }
    }

    #[test]
    fn lookahead_counters_match_kept_commit() {
        let mut array = Array::build(params(vec![2, 2, 2], 2)).unwrap();
        array.add_random_row().unwrap();

        let mut kept = array.clone();
        let mut dry = array.clone();
        let candidate = vec![0, 1, 1];
        kept.commit_row(&candidate, true).unwrap();
        dry.commit_row(&candidate, false).unwrap();

        assert_eq!(kept.score(), dry.score());
        assert_eq!(kept.coverage_problems(), dry.coverage_problems());
        for ((_, a), (_, b)) in kept.catalog().singles().zip(dry.catalog().singles()) {
            assert_eq!(a.coverage_issues, b.coverage_issues);
        }
        assert_eq!(kept.num_rows(), 2);
        assert_eq!(dry.num_rows(), 1);
    }

    #[test]
    fn clone_is_isolated_and_silent() {
        let mut p = params(vec![2, 2, 2], 2);
        p.seed = 11;
        let mut array = Array::build(p).unwrap();
        array.add_random_row().unwrap();

        let mut copy = array.clone();
        assert_eq!(copy.params().output, Verbosity::Silent);

        let before = array.score();
        copy.commit_row(&[1, 0, 1], true).unwrap();
        assert_eq!(array.score(), before);
        assert_eq!(array.num_rows(), 1);
        // Entity state is also untouched: the clone's second row leaked
        // nowhere into the original.
        for (_, single) in array.catalog().singles() {
            assert!(!single.rows.contains(&RowId(1)));
        }
        for (_, inter) in array.interactions().iter() {
            assert!(!inter.rows.contains(&RowId(1)));
        }
    }

    #[test]
    fn display_emits_tab_separated_rows() {
        let mut array = Array::build(params(vec![2, 2, 2], 2)).unwrap();
        array.commit_row(&[0, 1, 0], true).unwrap();
        array.commit_row(&[1, 0, 1], true).unwrap();
        assert_eq!(array.to_string(), "0\t1\t0\n1\t0\t1\n");
    }

    #[test]
    fn detach_conflict_rejects_one_sided_edges() {
        let mut p = params(vec![2, 2], 2);
        p.objective = Objective::Location;
        let mut array = Array::build(p).unwrap();
        // Fabricate a one-sided conflict edge.
        array.dsets.get_mut(DSetId(0)).conflicts.insert(DSetId(1));
        let err = array.detach_conflict(DSetId(0), DSetId(1)).unwrap_err();
        assert_eq!(err, CommitError::ConflictDesync { set: DSetId(0), partner: DSetId(1) });
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(64))]

        /// The score identity must survive arbitrary configurations and
        /// random row prefixes, including repeated rows.
        #[test]
        fn score_identity_over_random_configs(
            levels in proptest::collection::vec(2u32..4, 2..5),
            strength in 1usize..3,
            locate in proptest::prelude::any::<bool>(),
            seed in proptest::prelude::any::<u64>(),
            rows in 1usize..6,
        ) {
            let strength = strength.min(levels.len()) as u32;
            let mut p = ArrayParams::new(levels, strength);
            p.seed = seed;
            if locate {
                p.objective = Objective::Location;
            }
            let mut array = Array::build(p).unwrap();
            proptest::prop_assert_eq!(score_identity(&array), array.score());
            for _ in 0..rows {
                array.add_random_row().unwrap();
                proptest::prop_assert_eq!(score_identity(&array), array.score());
            }
        }
    }

    #[test]
    fn detach_conflict_rejects_counter_underflow() {
        let mut p = params(vec![2, 2], 2);
        p.objective = Objective::Location;
        let mut array = Array::build(p).unwrap();
        // Symmetric edge, but a location counter that cannot absorb the
        // partner's resolution while t1 is still pending.
        array.dsets.get_mut(DSetId(0)).conflicts.insert(DSetId(1));
        array.dsets.get_mut(DSetId(1)).conflicts.insert(DSetId(0));
        array.location_problems = 1;
        let err = array.detach_conflict(DSetId(0), DSetId(1)).unwrap_err();
        assert_eq!(err, CommitError::LocationUnderflow { set: DSetId(0) });
    }
}
